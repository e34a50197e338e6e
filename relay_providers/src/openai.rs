use async_trait::async_trait;
use relay_core::{ChatMessage, ChatOptions, LLMProvider, LLMResponse, Usage};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use crate::retry::retry_with_backoff;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry_delays: Vec<Duration>,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String, timeout: Duration) -> anyhow::Result<Self> {
        info!("Creating OpenAiProvider: model={model}");
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            retry_delays: vec![Duration::from_secs(1)],
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Delays between attempts; empty disables retrying.
    #[must_use]
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &serde_json::Value) -> anyhow::Result<LLMResponse> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
            .trim()
            .to_string();

        if content.is_empty() {
            anyhow::bail!("Empty completion content");
        }

        let usage = response["usage"].as_object().map(|u| Usage {
            prompt_tokens: token_count(u, "prompt_tokens"),
            completion_tokens: token_count(u, "completion_tokens"),
            total_tokens: token_count(u, "total_tokens"),
        });

        Ok(LLMResponse { content, usage })
    }
}

/// Missing or out-of-range counts read as zero.
fn token_count(usage: &serde_json::Map<String, Value>, key: &str) -> u32 {
    usage
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

#[async_trait]
impl LLMProvider for OpenAiProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> anyhow::Result<LLMResponse> {
        let request = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": options.max_tokens,
            "temperature": options.temperature,
        });

        info!(
            "Sending completion request: model={}, max_tokens={}, temperature={}",
            self.model, options.max_tokens, options.temperature
        );

        let response =
            retry_with_backoff(|| self.try_send(&request), &self.retry_delays).await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Tokens: {} prompt + {} completion = {} total",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        Ok(response)
    }

    fn get_default_model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const OPTIONS: ChatOptions = ChatOptions {
        max_tokens: 150,
        temperature: 0.7,
    };

    fn provider(server: &MockServer) -> OpenAiProvider {
        OpenAiProvider::new(
            "sk-test".to_string(),
            DEFAULT_MODEL.to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(server.uri())
        .with_retry_delays(Vec::new())
    }

    #[tokio::test]
    async fn chat_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": DEFAULT_MODEL,
                "max_tokens": 150,
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "What is Rust?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": " A language. "}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let messages = [
            ChatMessage::system("be brief"),
            ChatMessage::user("What is Rust?"),
        ];
        let response = provider(&server).chat(&messages, &OPTIONS).await.unwrap();

        assert_eq!(response.content, "A language.");
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(15));
    }

    #[tokio::test]
    async fn chat_fails_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = provider(&server)
            .chat(&[ChatMessage::user("hi")], &OPTIONS)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn chat_fails_on_missing_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": []
            })))
            .mount(&server)
            .await;

        let result = provider(&server)
            .chat(&[ChatMessage::user("hi")], &OPTIONS)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn chat_retries_transient_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": "recovered"}}]
            })))
            .mount(&server)
            .await;

        let response = provider(&server)
            .with_retry_delays(vec![Duration::from_millis(5)])
            .chat(&[ChatMessage::user("hi")], &OPTIONS)
            .await
            .unwrap();
        assert_eq!(response.content, "recovered");
    }

    #[tokio::test]
    async fn chat_tolerates_partial_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": "ok"}}],
                "usage": {"prompt_tokens": 5}
            })))
            .mount(&server)
            .await;

        let response = provider(&server)
            .chat(&[ChatMessage::user("hi")], &OPTIONS)
            .await
            .unwrap();
        assert_eq!(response.content, "ok");
        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 5);
        assert_eq!(usage.completion_tokens, 0);
        assert_eq!(usage.total_tokens, 0);
    }
}
