//! Reply selection: commands, canned replies, remote completion, default.

use relay_core::{ChatMessage, LLMProvider, SenderId};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::command::{Command, normalize};
use crate::replies::{
    BYE_REPLY, CHAT_SYSTEM_PROMPT, DEFAULT_REPLY, HELLO_REPLY, HELP_REPLY, HI_REPLY,
    HISTORY_CLEARED, JOKE_REPLY, NO_HISTORY, REPLY_OPTIONS, THANKS_REPLY, WEATHER_REPLY,
    current_time, history_count,
};
use crate::store::HistoryStore;
use crate::summary::SummaryGenerator;

/// Normalized text must be longer than this many characters to be sent to
/// the completion provider.
pub const MIN_COMPLETION_CHARS: usize = 10;

/// Which rule produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Command(Command),
    Exact,
    Keyword,
    Completion,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub text: String,
    pub source: ReplySource,
}

impl Selection {
    fn new(text: impl Into<String>, source: ReplySource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// Canned reply for an exact trigger word.
#[must_use]
pub fn exact_reply(normalized: &str) -> Option<&'static str> {
    match normalized {
        "hello" => Some(HELLO_REPLY),
        "hi" => Some(HI_REPLY),
        "help" => Some(HELP_REPLY),
        "bye" => Some(BYE_REPLY),
        "thanks" => Some(THANKS_REPLY),
        _ => None,
    }
}

/// First keyword rule contained in the text, checked in fixed order.
#[must_use]
pub fn keyword_reply(normalized: &str) -> Option<Cow<'static, str>> {
    let has = |needle: &str| normalized.contains(needle);

    if has("hello") || has("hi") {
        Some(Cow::Borrowed(HELLO_REPLY))
    } else if has("help") || has("support") {
        Some(Cow::Borrowed(HELP_REPLY))
    } else if has("bye") || has("goodbye") {
        Some(Cow::Borrowed(BYE_REPLY))
    } else if has("thank") {
        Some(Cow::Borrowed(THANKS_REPLY))
    } else if has("joke") {
        Some(Cow::Borrowed(JOKE_REPLY))
    } else if has("weather") {
        Some(Cow::Borrowed(WEATHER_REPLY))
    } else if has("time") {
        Some(Cow::Owned(current_time()))
    } else {
        None
    }
}

pub struct ResponseSelector {
    store: Arc<HistoryStore>,
    provider: Option<Arc<dyn LLMProvider>>,
    summaries: SummaryGenerator,
}

impl ResponseSelector {
    #[must_use]
    pub fn new(store: Arc<HistoryStore>, provider: Option<Arc<dyn LLMProvider>>) -> Self {
        let summaries = SummaryGenerator::new(provider.clone());
        Self {
            store,
            provider,
            summaries,
        }
    }

    #[must_use]
    pub const fn completion_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Choose the reply for `raw` from `sender`. The first matching rule wins.
    pub async fn select(&self, sender: &SenderId, raw: &str) -> Selection {
        let normalized = normalize(raw);

        if let Some(command) = Command::parse(&normalized) {
            info!("[{sender}] Command: {}", command.name());
            let text = self.run_command(command, sender).await;
            return Selection::new(text, ReplySource::Command(command));
        }

        if let Some(text) = exact_reply(&normalized) {
            return Selection::new(text, ReplySource::Exact);
        }

        if let Some(text) = keyword_reply(&normalized) {
            return Selection::new(text, ReplySource::Keyword);
        }

        if normalized.chars().count() > MIN_COMPLETION_CHARS {
            if let Some(text) = self.complete_or_fallback(raw).await {
                return Selection::new(text, ReplySource::Completion);
            }
        }

        Selection::new(DEFAULT_REPLY, ReplySource::Fallback)
    }

    async fn run_command(&self, command: Command, sender: &SenderId) -> String {
        match command {
            Command::Summarize => {
                let log = self.store.get(sender).await;
                self.summaries.summarize(&log).await
            }
            Command::ClearHistory => {
                self.store.clear(sender).await;
                HISTORY_CLEARED.to_string()
            }
            Command::ShowHistory => match self.store.len(sender).await {
                0 => NO_HISTORY.to_string(),
                count => history_count(count),
            },
        }
    }

    /// Ask the completion provider for a reply to the raw message.
    ///
    /// `None` means the caller should use the default reply: the provider is
    /// not configured or the call failed.
    async fn complete_or_fallback(&self, raw: &str) -> Option<String> {
        let Some(provider) = &self.provider else {
            debug!("Completion provider not configured, using default reply");
            return None;
        };

        let messages = [ChatMessage::system(CHAT_SYSTEM_PROMPT), ChatMessage::user(raw)];
        match provider.chat(&messages, &REPLY_OPTIONS).await {
            Ok(response) => Some(response.content),
            Err(e) => {
                warn!("Completion request failed, using default reply: {e}");
                None
            }
        }
    }
}
