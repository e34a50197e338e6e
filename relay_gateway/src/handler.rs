use crate::{AppState, Error, Result};
use axum::extract::{Form, State};
use axum::response::Json;
use chrono::{SecondsFormat, Utc};
use relay_core::{OutboundMessage, SenderId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Sender used by the test endpoint when no phone number is given.
pub const TEST_SENDER: &str = "test-user";

/// Form fields posted by the messaging provider.
#[derive(Debug, Default, Deserialize)]
pub struct WebhookForm {
    #[serde(rename = "Body")]
    pub body: Option<String>,
    #[serde(rename = "From")]
    pub from: Option<String>,
    #[serde(rename = "To")]
    pub to: Option<String>,
}

/// A webhook payload with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub body: String,
    pub from: String,
    pub to: String,
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingField(field))
}

impl WebhookForm {
    /// Reject payloads with a missing or empty `Body`, `From` or `To`.
    pub fn validate(self) -> Result<InboundMessage> {
        Ok(InboundMessage {
            body: required(self.body, "Body")?,
            from: required(self.from, "From")?,
            to: required(self.to, "To")?,
        })
    }
}

/// Receive a message, run a turn and deliver the reply.
pub async fn handle_webhook(
    State(state): State<AppState>,
    Form(form): Form<WebhookForm>,
) -> Result<&'static str> {
    let inbound = form.validate()?;
    info!("[{}] Message: {}", inbound.from, inbound.body);

    let sender = SenderId::from(inbound.from.as_str());
    let turn = state.service.process_turn(&sender, &inbound.body).await;
    info!("[{}] Response: {}", inbound.from, turn.response);

    let Some(messenger) = &state.messenger else {
        warn!("Messaging provider not configured, reply to {} dropped", inbound.from);
        return Err(Error::MessagingUnavailable);
    };

    let reply = OutboundMessage::reply_to(&inbound.from, &inbound.to, turn.response);
    messenger.send(&reply).await.map_err(Error::Delivery)?;
    Ok("Message sent")
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthFeatures {
    pub summarization: bool,
    pub conversation_storage: bool,
    pub whatsapp: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: f64,
    pub features: HealthFeatures,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.uptime_secs(),
        features: HealthFeatures {
            summarization: state.service.completion_enabled(),
            conversation_storage: true,
            whatsapp: state.messaging_enabled(),
        },
    })
}

pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "WhatsApp relay bot is running!",
        "endpoints": {
            "webhook": "/webhook",
            "health": "/health",
            "test": "/test"
        }
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRequest {
    pub message: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResponse {
    pub user_message: String,
    pub bot_response: String,
    pub conversation_length: usize,
}

/// Run a turn without delivering the reply.
pub async fn handle_test(
    State(state): State<AppState>,
    Json(request): Json<TestRequest>,
) -> Result<Json<TestResponse>> {
    let message = required(request.message, "message")?;
    let sender = request
        .phone_number
        .filter(|p| !p.is_empty())
        .map_or_else(|| SenderId::from(TEST_SENDER), SenderId::from);

    let turn = state.service.process_turn(&sender, &message).await;
    Ok(Json(TestResponse {
        user_message: message,
        bot_response: turn.response,
        conversation_length: turn.conversation_length,
    }))
}
