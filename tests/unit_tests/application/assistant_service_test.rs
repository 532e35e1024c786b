use std::sync::Arc;
use std::time::Duration;

use nexus::application::ports::{ChatTurn, LlmClient};
use nexus::application::services::{
    AssistantService, ChatHandleCache, ContentFormatter, LanguageDetector, build_prompt,
};
use nexus::domain::{Language, SessionId, SubjectArea};
use nexus::infrastructure::llm::MockLlmClient;

use crate::support::StubIdentifier;

fn assistant(llm: Arc<dyn LlmClient>, language_code: &'static str) -> AssistantService {
    AssistantService::new(
        llm,
        LanguageDetector::new(Arc::new(StubIdentifier::returning(language_code))),
        ContentFormatter::with_defaults(),
        ChatHandleCache::new(10, Duration::from_secs(60)),
    )
}

fn session() -> SessionId {
    SessionId::parse("study-session").unwrap()
}

#[tokio::test]
async fn given_programming_question_when_answering_then_prompt_carries_persona_and_format() {
    let llm = Arc::new(MockLlmClient::new());
    let service = assistant(llm.clone(), "en");

    let reply = service
        .get_response("Explain recursion with python code", &session(), None)
        .await;

    assert!(reply.success);
    assert_eq!(reply.response, "Mock answer");
    assert_eq!(reply.subject_area, Some(SubjectArea::Programming));
    assert_eq!(reply.content_type, Some(SubjectArea::Programming));
    assert_eq!(reply.detected_language, Some(Language::English));
    assert_eq!(reply.session_id, session());

    let calls = llm.calls();
    assert_eq!(calls.len(), 1);
    let prompt = &calls[0].prompt;
    assert!(prompt.starts_with("You are Nexus, a professional AI assistant"));
    assert!(prompt.contains("CONTENT TYPE: PROGRAMMING"));
    assert!(prompt.contains("USER QUERY: Explain recursion with python code"));
    assert!(!prompt.contains("LANGUAGE:"));
}

#[tokio::test]
async fn given_indic_query_when_answering_then_prompt_asks_for_that_language() {
    let llm = Arc::new(MockLlmClient::new());
    let service = assistant(llm.clone(), "ta");

    let reply = service
        .get_response("இயற்பியல் என்றால் என்ன", &session(), None)
        .await;

    assert_eq!(reply.detected_language, Some(Language::Tamil));
    assert!(llm.calls()[0]
        .prompt
        .contains("LANGUAGE: Respond in Tamil while maintaining the formatting structure."));
}

#[tokio::test]
async fn given_second_message_in_session_when_answering_then_history_is_replayed() {
    let llm = Arc::new(MockLlmClient::with_reply("Noted"));
    let service = assistant(llm.clone(), "en");

    service.get_response("first question", &session(), None).await;
    service.get_response("second question", &session(), None).await;

    let calls = llm.calls();
    assert!(calls[0].history.is_empty());
    assert_eq!(calls[1].history.len(), 2);
    assert_eq!(calls[1].history[0], ChatTurn::user(calls[0].prompt.clone()));
    assert_eq!(calls[1].history[1], ChatTurn::model("Noted"));
}

#[tokio::test]
async fn given_different_sessions_when_answering_then_histories_are_isolated() {
    let llm = Arc::new(MockLlmClient::new());
    let service = assistant(llm.clone(), "en");

    service.get_response("hello there", &session(), None).await;
    service
        .get_response("hello again", &SessionId::parse("other").unwrap(), None)
        .await;

    assert!(llm.calls()[1].history.is_empty());
    assert_eq!(service.session_count(), 2);
}

#[tokio::test]
async fn given_file_content_when_answering_then_classified_as_document_analysis() {
    let llm = Arc::new(MockLlmClient::new());
    let service = assistant(llm.clone(), "en");

    let reply = service
        .get_response("Summarize this", &session(), Some("Quarterly report text"))
        .await;

    assert_eq!(reply.subject_area, Some(SubjectArea::DocumentAnalysis));
    let prompt = &llm.calls()[0].prompt;
    assert!(prompt.contains("DOCUMENT CONTENT:\nQuarterly report text..."));
    assert!(prompt.contains("USER QUERY: Summarize this"));
    assert!(prompt.ends_with(
        "Analyze the document and provide a well-structured response following the format requirements above."
    ));
}

#[tokio::test]
async fn given_document_marker_in_query_when_answering_then_classified_as_document_analysis() {
    let service = assistant(Arc::new(MockLlmClient::new()), "en");

    let reply = service
        .get_response("File content: the mitochondria is the powerhouse", &session(), None)
        .await;

    assert_eq!(reply.subject_area, Some(SubjectArea::DocumentAnalysis));
}

#[tokio::test]
async fn given_failing_model_when_answering_then_returns_fallback_without_recording_history() {
    let llm = Arc::new(MockLlmClient::failing());
    let service = assistant(llm.clone(), "en");

    let reply = service.get_response("What is gravity?", &session(), None).await;
    service.get_response("And mass?", &session(), None).await;

    assert!(reply.success);
    assert_eq!(
        reply.response,
        "I encountered an issue generating a response. Please try rephrasing your question."
    );
    assert_eq!(reply.subject_area, Some(SubjectArea::Science));
    assert!(llm.calls()[1].history.is_empty());
}

#[tokio::test]
async fn given_empty_query_without_file_when_answering_then_reports_failure() {
    let llm = Arc::new(MockLlmClient::new());
    let service = assistant(llm.clone(), "en");

    let reply = service.get_response("   ", &session(), Some("  ")).await;

    assert!(!reply.success);
    assert_eq!(
        reply.response,
        "I encountered an error processing your request. Please try again."
    );
    assert!(reply.error.is_some());
    assert!(reply.subject_area.is_none());
    assert!(llm.calls().is_empty());
}

#[tokio::test]
async fn given_known_session_when_clearing_then_handle_is_dropped_and_unknown_still_succeeds() {
    let service = assistant(Arc::new(MockLlmClient::new()), "en");
    service.get_response("hello there", &session(), None).await;

    assert!(service.clear_session(&session()));
    assert_eq!(service.session_count(), 0);
    assert!(service.clear_session(&SessionId::parse("never-seen").unwrap()));
}

#[tokio::test]
async fn given_successful_reply_when_serialized_then_lists_available_formats() {
    let service = assistant(Arc::new(MockLlmClient::new()), "en");

    let reply = service.get_response("hello there", &session(), None).await;
    let value = serde_json::to_value(&reply).unwrap();

    assert_eq!(value["available_formats"], serde_json::json!(["general", "programming"]));
    assert_eq!(value["detected_language"], "en");
    assert_eq!(value["subject_area"], "general");
    assert_eq!(value["session_id"], "study-session");
    assert!(value.get("error").is_none());
}

#[test]
fn given_long_file_content_when_building_prompt_then_excerpt_is_capped() {
    let formatter = ContentFormatter::with_defaults();
    let content = "a".repeat(5000);

    let prompt = build_prompt(
        &formatter,
        "Summarize",
        Language::English,
        SubjectArea::DocumentAnalysis,
        Some(content.as_str()),
    );

    assert!(prompt.contains(&format!("{}...", "a".repeat(2000))));
    assert!(!prompt.contains(&"a".repeat(2001)));
}

#[test]
fn given_plain_query_when_building_prompt_then_ends_with_format_reminder() {
    let formatter = ContentFormatter::with_defaults();

    let prompt = build_prompt(
        &formatter,
        "Tell me about rivers",
        Language::Hindi,
        SubjectArea::General,
        None,
    );

    assert!(prompt.contains("\nLANGUAGE: Respond in Hindi"));
    assert!(prompt.ends_with(
        "USER QUERY: Tell me about rivers\n\nProvide a well-structured response following the format requirements above."
    ));
}
