use crate::{AppState, handler};
use axum::Router;
use axum::routing::{get, post};
use relay_config::ServerConfig;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Build the gateway router.
///
/// `POST /` mirrors `POST /webhook` for providers configured with the bare URL.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::index).post(handler::handle_webhook))
        .route("/webhook", post(handler::handle_webhook))
        .route("/health", get(handler::health))
        .route("/test", post(handler::handle_test))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn serve(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;

    info!("🤖 WhatsApp relay running on {addr}");
    info!("📱 Webhook URL: http://localhost:{}/webhook", addr.port());
    info!("💚 Health check: http://localhost:{}/health", addr.port());
    if !state.messaging_enabled() {
        warn!("Twilio credentials missing: replies will not be delivered");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
