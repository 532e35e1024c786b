use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::{RepositoryError, SessionRepository};
use crate::domain::{
    ChatSession, Message, MessageId, MessageMetadata, MessageRole, SessionId, SubjectArea,
};

use super::assistant_service::{AssistantReply, AssistantService};
use super::session_file_store::SessionFileStore;

#[derive(Debug, Clone, Default)]
pub struct SendMessageRequest {
    pub message: String,
    pub session_id: Option<SessionId>,
    pub file_content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryMessage {
    pub id: MessageId,
    #[serde(rename = "type")]
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub metadata: MessageMetadata,
}

impl From<&Message> for HistoryMessage {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            role: message.role,
            content: message.content.clone(),
            timestamp: message.created_at,
            metadata: message.metadata.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    #[serde(rename = "id")]
    pub session_id: SessionId,
    pub title: String,
    pub preview: String,
    pub timestamp: DateTime<Utc>,
    pub messages: Vec<HistoryMessage>,
}

impl From<&ChatSession> for SessionSummary {
    fn from(session: &ChatSession) -> Self {
        Self {
            session_id: session.id.clone(),
            title: session.title(),
            preview: session.preview(),
            timestamp: session.created_at,
            messages: session.messages.iter().map(HistoryMessage::from).collect(),
        }
    }
}

/// Route-level chat flow: persistence around the assistant.
pub struct ChatService {
    repository: Arc<dyn SessionRepository>,
    assistant: Arc<AssistantService>,
    files: Arc<SessionFileStore>,
}

impl ChatService {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        assistant: Arc<AssistantService>,
        files: Arc<SessionFileStore>,
    ) -> Self {
        Self {
            repository,
            assistant,
            files,
        }
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<AssistantReply, ChatServiceError> {
        let message = request.message.trim().to_string();
        let file_content = request.file_content.filter(|c| !c.trim().is_empty());

        if message.is_empty() && file_content.is_none() {
            return Err(ChatServiceError::Validation("Message is required".to_string()));
        }

        let session_id = request.session_id.unwrap_or_else(SessionId::generate);
        self.repository.ensure_session(&session_id).await?;

        let user_message =
            Message::user(session_id.clone(), message.clone(), file_content.clone());

        let reply = self
            .assistant
            .get_response(&message, &session_id, file_content.as_deref())
            .await;

        let metadata = MessageMetadata::classification(
            reply.detected_language.unwrap_or_default(),
            reply.subject_area.unwrap_or(SubjectArea::General),
        );
        let bot_message = Message::new(
            session_id.clone(),
            MessageRole::Bot,
            reply.response.clone(),
            Some(metadata),
        );
        self.repository.append_messages(&[user_message, bot_message]).await?;

        tracing::info!(
            session_id = %session_id,
            success = reply.success,
            "Chat message processed"
        );

        Ok(reply)
    }

    pub async fn new_session(&self) -> Result<SessionId, ChatServiceError> {
        let session = ChatSession::new(SessionId::generate());
        self.repository.create_session(&session).await?;
        tracing::info!(session_id = %session.id, "New session created");
        Ok(session.id)
    }

    /// Removes the session everywhere it is held. Unknown sessions succeed.
    pub async fn clear_session(&self, session_id: &SessionId) -> Result<(), ChatServiceError> {
        let deleted = self.repository.delete_session(session_id).await?;
        self.assistant.clear_session(session_id);
        let files = self.files.clear(session_id);

        tracing::info!(session_id = %session_id, deleted, files, "Session cleared");
        Ok(())
    }

    pub async fn history(&self) -> Result<Vec<SessionSummary>, ChatServiceError> {
        let sessions = self.repository.list_sessions().await?;
        Ok(sessions.iter().map(SessionSummary::from).collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
