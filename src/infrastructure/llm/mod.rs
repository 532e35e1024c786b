mod gemini_client;
mod llm_client_factory;
mod mock_llm_client;
mod openai_compatible_client;

pub use gemini_client::GeminiClient;
pub use llm_client_factory::{LlmClientFactory, LlmClientFactoryError};
pub use mock_llm_client::{MockCall, MockLlmClient};
pub use openai_compatible_client::OpenAiCompatibleClient;
