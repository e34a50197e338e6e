#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Domain types and provider seams shared by every relaybot crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod record;

pub use record::{MessageOrigin, MessageRecord, SenderId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Sampling settings for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Hosted chat-completion service.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> anyhow::Result<LLMResponse>;
    fn get_default_model(&self) -> &str;
}

/// A reply on its way back through the messaging provider.
///
/// `from` is the provider-side number the inbound message was addressed to,
/// `to` is the original sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub body: String,
    pub from: String,
    pub to: String,
}

impl OutboundMessage {
    /// Build the reply for an inbound message, swapping the addresses.
    #[must_use]
    pub fn reply_to(inbound_from: &str, inbound_to: &str, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            from: inbound_to.to_string(),
            to: inbound_from.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider-assigned message identifier.
    pub sid: String,
}

/// Service that delivers messages to the end user's chat client.
#[async_trait]
pub trait MessagingProvider: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<DeliveryReceipt>;
}
