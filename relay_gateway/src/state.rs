use relay_conversation::ConversationService;
use relay_core::MessagingProvider;
use std::sync::Arc;
use std::time::Instant;

/// Shared state for gateway handlers.
#[derive(Clone)]
pub struct AppState {
    /// Conversation service owning the history store
    pub service: Arc<ConversationService>,
    /// Outbound delivery; `None` when credentials are missing
    pub messenger: Option<Arc<dyn MessagingProvider>>,
    started_at: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(
        service: Arc<ConversationService>,
        messenger: Option<Arc<dyn MessagingProvider>>,
    ) -> Self {
        Self {
            service,
            messenger,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was created.
    #[must_use]
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    #[must_use]
    pub const fn messaging_enabled(&self) -> bool {
        self.messenger.is_some()
    }
}
