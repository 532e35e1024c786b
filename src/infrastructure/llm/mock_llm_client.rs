use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{ChatTurn, LlmClient, LlmClientError};

/// Canned-response client. Records every call so tests can inspect the prompt
/// and the history that accompanied it.
#[derive(Default)]
pub struct MockLlmClient {
    reply: Option<String>,
    fail: bool,
    calls: Mutex<Vec<MockCall>>,
}

#[derive(Debug, Clone)]
pub struct MockCall {
    pub history: Vec<ChatTurn>,
    pub prompt: String,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn send_message(
        &self,
        history: &[ChatTurn],
        prompt: &str,
    ) -> Result<String, LlmClientError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(MockCall {
                history: history.to_vec(),
                prompt: prompt.to_string(),
            });
        }

        if self.fail {
            return Err(LlmClientError::ApiRequestFailed("mock failure".to_string()));
        }

        Ok(self
            .reply
            .clone()
            .unwrap_or_else(|| "Mock answer".to_string()))
    }
}
