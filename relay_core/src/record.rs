//! Sender identity and stored message records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a conversation party, usually a `whatsapp:+<number>` string.
///
/// Two ids are the same sender only if the strings are byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SenderId(String);

impl SenderId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SenderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SenderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for SenderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Who wrote a stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageOrigin {
    User,
    Bot,
}

impl MessageOrigin {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Bot => "Bot",
        }
    }
}

impl fmt::Display for MessageOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One message in a sender's conversation log. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    timestamp: DateTime<Utc>,
    text: String,
    origin: MessageOrigin,
}

impl MessageRecord {
    /// Create a record stamped with the current time.
    #[must_use]
    pub fn new(text: impl Into<String>, origin: MessageOrigin) -> Self {
        Self::at(Utc::now(), text, origin)
    }

    #[must_use]
    pub fn at(timestamp: DateTime<Utc>, text: impl Into<String>, origin: MessageOrigin) -> Self {
        Self {
            timestamp,
            text: text.into(),
            origin,
        }
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn origin(&self) -> MessageOrigin {
        self.origin
    }

    /// Render as `"<User|Bot>: <text>"`.
    #[must_use]
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.origin, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_equality_is_exact() {
        assert_eq!(SenderId::from("whatsapp:+1555"), SenderId::new("whatsapp:+1555"));
        assert_ne!(SenderId::from("whatsapp:+1555"), SenderId::from("WhatsApp:+1555"));
        assert_ne!(SenderId::from("+1555"), SenderId::from("+1555 "));
    }

    #[test]
    fn transcript_line_uses_origin_label() {
        let user = MessageRecord::new("hello", MessageOrigin::User);
        let bot = MessageRecord::new("Hi there", MessageOrigin::Bot);
        assert_eq!(user.transcript_line(), "User: hello");
        assert_eq!(bot.transcript_line(), "Bot: Hi there");
    }

    #[test]
    fn record_keeps_timestamp() {
        let at = Utc::now();
        let record = MessageRecord::at(at, "x", MessageOrigin::User);
        assert_eq!(record.timestamp(), at);
        assert_eq!(record.origin(), MessageOrigin::User);
        assert_eq!(record.text(), "x");
    }
}
