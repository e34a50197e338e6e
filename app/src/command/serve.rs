use relay_config::Config;
use relay_core::MessagingProvider;
use relay_gateway::AppState;
use std::sync::Arc;
use tracing::info;

use super::{conversation_service, twilio_client};

/// Input for the serve command.
#[derive(Debug, Clone)]
pub struct ServeInput {
    /// Optional port (overrides config and `PORT`)
    pub port: Option<u16>,
}

/// Strategy for running the webhook server.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl super::CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(port) = input.port {
            config.server.port = port;
        }

        let service = conversation_service(&config)?;
        let messenger = twilio_client(&config)?
            .map(|client| -> Arc<dyn MessagingProvider> { Arc::new(client) });

        info!("Starting webhook server...");
        relay_gateway::serve(&config.server, AppState::new(service, messenger)).await
    }
}
