//! Conversation service: one call per inbound message.
//!
//! The `ConversationService` records the user message, selects a reply and
//! records the reply, holding the sender's turn lock throughout.

use relay_core::{LLMProvider, MessageOrigin, SenderId};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::selector::{ReplySource, ResponseSelector};
use crate::store::HistoryStore;

/// Result of processing one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    /// Reply to deliver to the sender
    pub response: String,
    /// Rule that produced the reply
    pub source: ReplySource,
    /// Records held for the sender after the turn
    pub conversation_length: usize,
}

pub struct ConversationService {
    store: Arc<HistoryStore>,
    selector: ResponseSelector,
}

impl ConversationService {
    #[must_use]
    pub fn new(store: Arc<HistoryStore>, provider: Option<Arc<dyn LLMProvider>>) -> Self {
        info!(
            "Creating conversation service (history limit: {}, completion: {})",
            store.capacity(),
            if provider.is_some() { "enabled" } else { "disabled" }
        );
        let selector = ResponseSelector::new(Arc::clone(&store), provider);
        Self { store, selector }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<HistoryStore> {
        &self.store
    }

    #[must_use]
    pub const fn completion_enabled(&self) -> bool {
        self.selector.completion_enabled()
    }

    /// Process a single conversation turn.
    ///
    /// Stores the raw text as a user message, selects the reply and stores it
    /// as a bot message. Never fails: provider problems surface as reply text.
    pub async fn process_turn(&self, sender: &SenderId, text: &str) -> TurnResult {
        let _turn = self.store.lock_sender(sender).await;

        self.store.append(sender, text, MessageOrigin::User).await;
        let selection = self.selector.select(sender, text).await;
        self.store
            .append(sender, selection.text.as_str(), MessageOrigin::Bot)
            .await;

        let conversation_length = self.store.len(sender).await;
        debug!(
            "[{sender}] Reply via {:?}, {conversation_length} messages stored",
            selection.source
        );

        TurnResult {
            response: selection.text,
            source: selection.source,
            conversation_length,
        }
    }

    /// Run an interactive conversation loop on stdin/stdout as `sender`.
    pub async fn run_interactive(&self, sender: &SenderId) -> anyhow::Result<()> {
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        stdout
            .write_all(
                format!(
                    "=== Chatting as {sender} ===\nType 'exit', 'quit', or Ctrl+C to end the session.\n\n"
                )
                .as_bytes(),
            )
            .await?;

        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let input = line.trim();

            if matches!(input, "exit" | "quit" | "q") {
                break;
            }
            if input.is_empty() {
                continue;
            }

            let result = self.process_turn(sender, input).await;
            stdout
                .write_all(format!("\n{}\n\n", result.response).as_bytes())
                .await?;
        }

        let total = self.store.len(sender).await;
        stdout
            .write_all(format!("\nSession ended. {total} messages stored.\n").as_bytes())
            .await?;
        Ok(())
    }
}
