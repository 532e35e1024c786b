use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::application::ports::LlmClient;
use crate::domain::{Language, SessionId, SubjectArea};

use super::chat_handle_cache::ChatHandleCache;
use super::content_formatter::ContentFormatter;
use super::language_detector::LanguageDetector;
use super::subject_classifier::classify_subject;

const PERSONA_PREAMBLE: &str =
    "You are Nexus, a professional AI assistant that provides structured, copy-friendly responses.";
const FILE_CONTENT_PROMPT_CHARS: usize = 2000;
const DOCUMENT_MARKERS: [&str; 2] = ["file content:", "document content:"];
const GENERATION_FALLBACK: &str =
    "I encountered an issue generating a response. Please try rephrasing your question.";
const FAILURE_RESPONSE: &str = "I encountered an error processing your request. Please try again.";

#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_area: Option<SubjectArea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<SubjectArea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_formats: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub session_id: SessionId,
}

impl AssistantReply {
    fn failed(session_id: &SessionId, error: &OrchestratorError) -> Self {
        Self {
            response: FAILURE_RESPONSE.to_string(),
            detected_language: None,
            subject_area: None,
            content_type: None,
            available_formats: None,
            error: Some(error.to_string()),
            timestamp: Utc::now(),
            success: false,
            session_id: session_id.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("query and file content are both empty")]
    EmptyRequest,
}

/// Classifies a query, prompts the model within the session's conversation and
/// formats the answer.
pub struct AssistantService {
    llm_client: Arc<dyn LlmClient>,
    language_detector: LanguageDetector,
    formatter: RwLock<Arc<ContentFormatter>>,
    handles: ChatHandleCache,
}

impl AssistantService {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        language_detector: LanguageDetector,
        formatter: ContentFormatter,
        handles: ChatHandleCache,
    ) -> Self {
        Self {
            llm_client,
            language_detector,
            formatter: RwLock::new(Arc::new(formatter)),
            handles,
        }
    }

    /// Never fails: provider errors degrade to a canned answer and internal
    /// errors to a reply with `success == false`.
    #[tracing::instrument(skip(self, query, file_content), fields(session_id = %session_id))]
    pub async fn get_response(
        &self,
        query: &str,
        session_id: &SessionId,
        file_content: Option<&str>,
    ) -> AssistantReply {
        match self.try_get_response(query, session_id, file_content).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Assistant response failed");
                AssistantReply::failed(session_id, &e)
            }
        }
    }

    async fn try_get_response(
        &self,
        query: &str,
        session_id: &SessionId,
        file_content: Option<&str>,
    ) -> Result<AssistantReply, OrchestratorError> {
        let file_content = file_content.filter(|c| !c.trim().is_empty());
        if query.trim().is_empty() && file_content.is_none() {
            return Err(OrchestratorError::EmptyRequest);
        }

        let detected_language = self.language_detector.detect(query);
        let subject_area = if file_content.is_some() || mentions_document(query) {
            SubjectArea::DocumentAnalysis
        } else {
            classify_subject(query)
        };

        tracing::debug!(
            language = %detected_language,
            subject = %subject_area,
            has_file = file_content.is_some(),
            "Classified query"
        );

        let formatter = Arc::clone(&*self.formatter.read().await);
        let prompt = build_prompt(
            &formatter,
            query,
            detected_language,
            subject_area,
            file_content,
        );

        let handle = self.handles.get_or_create(session_id);
        let raw_text = {
            let mut handle = handle.lock().await;
            match self.llm_client.send_message(handle.history(), &prompt).await {
                Ok(text) => {
                    handle.record_exchange(&prompt, &text);
                    text
                }
                Err(e) => {
                    tracing::error!(error = %e, "AI generation error");
                    GENERATION_FALLBACK.to_string()
                }
            }
        };

        let response = formatter.format_response(&raw_text, subject_area);

        Ok(AssistantReply {
            response,
            detected_language: Some(detected_language),
            subject_area: Some(subject_area),
            content_type: Some(subject_area),
            available_formats: Some(formatter.available_formats()),
            error: None,
            timestamp: Utc::now(),
            success: true,
            session_id: session_id.clone(),
        })
    }

    /// Idempotent: clearing an unknown session still reports success.
    pub fn clear_session(&self, session_id: &SessionId) -> bool {
        if self.handles.remove(session_id) {
            tracing::info!(session_id = %session_id, "Session cleared");
        }
        true
    }

    pub fn session_count(&self) -> usize {
        self.handles.len()
    }

    pub fn evict_idle_sessions(&self) -> usize {
        self.handles.evict_idle()
    }

    pub async fn reload_formats(&self) -> Vec<String> {
        let mut guard = self.formatter.write().await;
        let reloaded = guard.reload();
        let formats = reloaded.available_formats();
        *guard = Arc::new(reloaded);
        formats
    }

    pub async fn available_formats(&self) -> Vec<String> {
        self.formatter.read().await.available_formats()
    }
}

fn mentions_document(query: &str) -> bool {
    let lowered = query.to_lowercase();
    DOCUMENT_MARKERS.iter().any(|marker| lowered.contains(marker))
}

pub fn build_prompt(
    formatter: &ContentFormatter,
    query: &str,
    language: Language,
    subject_area: SubjectArea,
    file_content: Option<&str>,
) -> String {
    let format_instructions = formatter.get_format_instructions(subject_area.as_str());

    let language_instruction = if language.is_default() {
        String::new()
    } else {
        format!(
            "\nLANGUAGE: Respond in {} while maintaining the formatting structure.",
            language.name()
        )
    };

    match file_content {
        Some(content) => {
            let excerpt: String = content.chars().take(FILE_CONTENT_PROMPT_CHARS).collect();
            format!(
                "{PERSONA_PREAMBLE}\n\n{format_instructions}{language_instruction}\n\nDOCUMENT CONTENT:\n{excerpt}...\n\nUSER QUERY: {query}\n\nAnalyze the document and provide a well-structured response following the format requirements above."
            )
        }
        None => format!(
            "{PERSONA_PREAMBLE}\n\n{format_instructions}{language_instruction}\n\nUSER QUERY: {query}\n\nProvide a well-structured response following the format requirements above."
        ),
    }
}
