use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ChatTurn, LlmClient, LlmClientError, TurnRole};
use crate::infrastructure::observability::sanitize_prompt;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Chat completions client for OpenAI and servers speaking the same API.
pub struct OpenAiCompatibleClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiCompatibleClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: Option<String>,
        max_tokens: u32,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmClientError::NotConfigured(e.without_url().to_string()))?;

        Ok(Self {
            client,
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| OPENAI_API_BASE.to_string()),
            api_key,
            model,
            max_tokens,
            temperature,
        })
    }

    fn build_messages(history: &[ChatTurn], prompt: &str) -> Vec<ChatMessage> {
        history
            .iter()
            .map(|turn| ChatMessage {
                role: match turn.role {
                    TurnRole::User => "user",
                    TurnRole::Model => "assistant",
                }
                .to_string(),
                content: turn.text.clone(),
            })
            .chain(std::iter::once(ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }))
            .collect()
    }
}

#[async_trait]
impl LlmClient for OpenAiCompatibleClient {
    #[tracing::instrument(skip(self, history, prompt), fields(model = %self.model, turns = history.len()))]
    async fn send_message(
        &self,
        history: &[ChatTurn],
        prompt: &str,
    ) -> Result<String, LlmClientError> {
        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: Self::build_messages(history, prompt),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        tracing::debug!(prompt = %sanitize_prompt(prompt), "Sending chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.without_url().to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.without_url().to_string()))?;

        completion_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))
    }
}
