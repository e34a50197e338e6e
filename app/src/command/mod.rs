//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use relay_config::Config;
use relay_conversation::{ConversationService, HistoryStore};
use relay_core::LLMProvider;
use relay_providers::{OpenAiProvider, TwilioClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod chat;
mod check;
mod init;
mod serve;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use check::CheckStrategy;
pub use init::InitStrategy;
pub use serve::{ServeInput, ServeStrategy};
pub use version::VersionStrategy;

const TWILIO_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the completion provider when an API key is configured.
fn completion_provider(config: &Config) -> anyhow::Result<Option<Arc<dyn LLMProvider>>> {
    if !config.openai.is_configured() {
        warn!("OPENAI_API_KEY not set: AI replies and summaries are disabled");
        return Ok(None);
    }

    let provider = OpenAiProvider::new(
        config.openai.api_key.clone(),
        config.openai.model.clone(),
        Duration::from_secs(config.openai.timeout_secs),
    )?
    .with_base_url(config.openai.base_url.clone());

    info!("AI replies enabled with model {}", config.openai.model);
    Ok(Some(Arc::new(provider)))
}

/// Build the Twilio client when both credentials are configured.
fn twilio_client(config: &Config) -> anyhow::Result<Option<TwilioClient>> {
    if !config.twilio.is_configured() {
        return Ok(None);
    }
    let client = TwilioClient::new(
        config.twilio.account_sid.clone(),
        config.twilio.auth_token.clone(),
        TWILIO_TIMEOUT,
    )?
    .with_base_url(config.twilio.base_url.clone());
    Ok(Some(client))
}

/// Conversation service with a fresh in-memory history store.
fn conversation_service(config: &Config) -> anyhow::Result<Arc<ConversationService>> {
    let store = Arc::new(HistoryStore::with_capacity(
        config.conversation.history_limit,
    ));
    Ok(Arc::new(ConversationService::new(
        store,
        completion_provider(config)?,
    )))
}

/// Show the first and last four characters of a secret.
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else if chars.is_empty() {
        "NOT SET".to_string()
    } else {
        "***".to_string()
    }
}

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_secret_hides_middle() {
        assert_eq!(mask_secret("ACabcdef12345678"), "ACab...5678");
        assert_eq!(mask_secret("short"), "***");
        assert_eq!(mask_secret(""), "NOT SET");
    }

    #[test]
    fn services_follow_configuration() {
        let mut config = Config::default();
        assert!(completion_provider(&config).unwrap().is_none());
        assert!(twilio_client(&config).unwrap().is_none());

        config.openai.api_key = "sk-test".to_string();
        config.twilio.account_sid = "AC1".to_string();
        config.twilio.auth_token = "tok".to_string();
        config.conversation.history_limit = 10;

        let service = conversation_service(&config).unwrap();
        assert!(service.completion_enabled());
        assert_eq!(service.store().capacity(), 10);
        assert!(twilio_client(&config).unwrap().is_some());
    }
}
