use std::time::Duration;

use nexus::application::ports::{ChatTurn, LlmClient, LlmClientError};
use nexus::infrastructure::llm::{GeminiClient, OpenAiCompatibleClient};

const SECRET: &str = "SECRET-KEY-123";
const UNREACHABLE: &str = "http://127.0.0.1:1";

#[tokio::test]
async fn given_unreachable_gemini_endpoint_when_sending_then_error_does_not_expose_api_key() {
    let client = GeminiClient::new(
        SECRET.to_string(),
        "gemini-test".to_string(),
        Some(UNREACHABLE.to_string()),
        16,
        0.1,
        Duration::from_secs(2),
    )
    .unwrap();

    let err = client
        .send_message(&[ChatTurn::user("earlier")], "hello")
        .await
        .unwrap_err();

    assert!(matches!(err, LlmClientError::ApiRequestFailed(_)));
    let rendered = err.to_string();
    assert!(!rendered.contains(SECRET), "leaked key in: {rendered}");
    assert!(!rendered.contains(UNREACHABLE), "leaked url in: {rendered}");
}

#[tokio::test]
async fn given_unreachable_openai_endpoint_when_sending_then_error_omits_request_url() {
    let client = OpenAiCompatibleClient::new(
        SECRET.to_string(),
        "gpt-test".to_string(),
        Some(UNREACHABLE.to_string()),
        16,
        0.1,
        Duration::from_secs(2),
    )
    .unwrap();

    let err = client.send_message(&[], "hello").await.unwrap_err();

    assert!(matches!(err, LlmClientError::ApiRequestFailed(_)));
    assert!(!err.to_string().contains(UNREACHABLE));
}
