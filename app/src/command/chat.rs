//! Local conversation command.
//!
//! Runs the same conversation service the webhook uses, without delivering
//! anything through the messaging provider.

use relay_config::Config;
use relay_core::SenderId;
use tracing::info;

use super::conversation_service;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
    /// Sender identity used as the history key
    pub sender: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let service = conversation_service(&config)?;
        let sender = SenderId::from(input.sender);

        if let Some(msg) = input.message {
            let result = service.process_turn(&sender, &msg).await;
            println!("{}", result.response);
            info!(
                "Reply via {:?}, {} messages stored",
                result.source, result.conversation_length
            );
        } else {
            service.run_interactive(&sender).await?;
        }

        Ok(())
    }
}
