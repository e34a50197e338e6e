//! Conversation summaries through the completion provider.

use relay_core::{ChatMessage, LLMProvider, MessageRecord};
use std::sync::Arc;
use tracing::{info, warn};

use crate::replies::{
    SUMMARY_FAILED, SUMMARY_NO_HISTORY, SUMMARY_OPTIONS, SUMMARY_SYSTEM_PROMPT,
    SUMMARY_UNAVAILABLE, summary_prompt, with_summary_header,
};

#[derive(Clone)]
pub struct SummaryGenerator {
    provider: Option<Arc<dyn LLMProvider>>,
}

impl SummaryGenerator {
    #[must_use]
    pub fn new(provider: Option<Arc<dyn LLMProvider>>) -> Self {
        Self { provider }
    }

    /// Summarize a conversation log.
    ///
    /// Always yields user-facing text: provider errors become [`SUMMARY_FAILED`].
    pub async fn summarize(&self, log: &[MessageRecord]) -> String {
        if log.is_empty() {
            return SUMMARY_NO_HISTORY.to_string();
        }
        let Some(provider) = &self.provider else {
            return SUMMARY_UNAVAILABLE.to_string();
        };

        match Self::request_summary(provider.as_ref(), log).await {
            Ok(summary) => {
                info!("Generated summary of {} messages", log.len());
                with_summary_header(&summary)
            }
            Err(e) => {
                warn!("Summary generation failed: {e}");
                SUMMARY_FAILED.to_string()
            }
        }
    }

    async fn request_summary(
        provider: &dyn LLMProvider,
        log: &[MessageRecord],
    ) -> anyhow::Result<String> {
        let messages = [
            ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
            ChatMessage::user(summary_prompt(&render_transcript(log))),
        ];
        let response = provider.chat(&messages, &SUMMARY_OPTIONS).await?;
        Ok(response.content)
    }
}

/// One `"<User|Bot>: <text>"` line per record, oldest first.
#[must_use]
pub fn render_transcript(log: &[MessageRecord]) -> String {
    log.iter()
        .map(MessageRecord::transcript_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replies::SUMMARY_HEADER;
    use crate::testing::ScriptedProvider;
    use relay_core::MessageOrigin;

    fn log() -> Vec<MessageRecord> {
        vec![
            MessageRecord::new("what's a good pasta recipe?", MessageOrigin::User),
            MessageRecord::new("Try cacio e pepe.", MessageOrigin::Bot),
        ]
    }

    #[test]
    fn transcript_joins_lines_in_order() {
        assert_eq!(
            render_transcript(&log()),
            "User: what's a good pasta recipe?\nBot: Try cacio e pepe."
        );
    }

    #[tokio::test]
    async fn empty_log_skips_provider() {
        let provider = ScriptedProvider::replying("unused");
        let generator = SummaryGenerator::new(Some(provider.clone()));

        assert_eq!(generator.summarize(&[]).await, SUMMARY_NO_HISTORY);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn unconfigured_provider_reports_unavailable() {
        let generator = SummaryGenerator::new(None);
        assert_eq!(generator.summarize(&log()).await, SUMMARY_UNAVAILABLE);
    }

    #[tokio::test]
    async fn success_prefixes_header_and_uses_summary_options() {
        let provider = ScriptedProvider::replying("• Pasta recipes");
        let generator = SummaryGenerator::new(Some(provider.clone()));

        let summary = generator.summarize(&log()).await;
        assert_eq!(summary, format!("{SUMMARY_HEADER}\n\n• Pasta recipes"));

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        let (messages, options) = &calls[0];
        assert_eq!(*options, SUMMARY_OPTIONS);
        assert_eq!(messages[0], ChatMessage::system(SUMMARY_SYSTEM_PROMPT));
        assert!(
            messages[1]
                .content
                .contains("User: what's a good pasta recipe?\nBot: Try cacio e pepe.")
        );
    }

    #[tokio::test]
    async fn provider_failure_becomes_text() {
        let generator = SummaryGenerator::new(Some(ScriptedProvider::failing()));
        assert_eq!(generator.summarize(&log()).await, SUMMARY_FAILED);
    }
}
