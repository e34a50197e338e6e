/// Control commands recognized before any keyword matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Summarize,
    ClearHistory,
    ShowHistory,
}

impl Command {
    /// Match normalized text (trimmed, lower-cased) exactly against the command words.
    #[must_use]
    pub fn parse(normalized: &str) -> Option<Self> {
        match normalized {
            "summarize" | "summary" => Some(Self::Summarize),
            "clear history" | "clear" => Some(Self::ClearHistory),
            "history" | "my history" => Some(Self::ShowHistory),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::ClearHistory => "clear",
            Self::ShowHistory => "history",
        }
    }
}

/// Trim and lower-case inbound text for matching.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
