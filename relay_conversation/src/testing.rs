use async_trait::async_trait;
use relay_core::{ChatMessage, ChatOptions, LLMProvider, LLMResponse};
use std::sync::{Arc, Mutex};

type Call = (Vec<ChatMessage>, ChatOptions);

/// Completion provider returning a fixed outcome and recording every request.
pub struct ScriptedProvider {
    reply: Option<String>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedProvider {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> anyhow::Result<LLMResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), *options));
        match &self.reply {
            Some(content) => Ok(LLMResponse {
                content: content.clone(),
                usage: None,
            }),
            None => anyhow::bail!("provider unavailable"),
        }
    }

    fn get_default_model(&self) -> &str {
        "scripted"
    }
}
