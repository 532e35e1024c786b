use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::{GeminiClient, MockLlmClient, OpenAiCompatibleClient};

pub struct LlmClientFactory;

#[derive(Debug, thiserror::Error)]
pub enum LlmClientFactoryError {
    #[error("missing API key: {0} provider requires an api key (GEMINI_API_KEY or APP_LLM__API_KEY)")]
    MissingApiKey(&'static str),
    #[error("client initialization failed: {0}")]
    InitializationFailed(#[from] LlmClientError),
}

impl LlmClientFactory {
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, LlmClientFactoryError> {
        let timeout = Duration::from_secs(settings.request_timeout_seconds);

        match settings.provider {
            LlmProvider::Gemini => {
                let key = require_key(settings, "gemini")?;
                tracing::info!(model = %settings.chat_model, "Using Gemini chat client");
                Ok(Arc::new(GeminiClient::new(
                    key,
                    settings.chat_model.clone(),
                    settings.base_url.clone(),
                    settings.max_tokens,
                    settings.temperature,
                    timeout,
                )?))
            }
            LlmProvider::OpenAi => {
                let key = require_key(settings, "openai")?;
                tracing::info!(model = %settings.chat_model, "Using OpenAI-compatible chat client");
                Ok(Arc::new(OpenAiCompatibleClient::new(
                    key,
                    settings.chat_model.clone(),
                    settings.base_url.clone(),
                    settings.max_tokens,
                    settings.temperature,
                    timeout,
                )?))
            }
            LlmProvider::Mock => {
                tracing::warn!("Using mock chat client, responses are canned");
                Ok(Arc::new(MockLlmClient::new()))
            }
        }
    }
}

fn require_key(
    settings: &LlmSettings,
    provider: &'static str,
) -> Result<String, LlmClientFactoryError> {
    Some(settings.api_key.clone())
        .filter(|k| !k.is_empty())
        .ok_or(LlmClientFactoryError::MissingApiKey(provider))
}
