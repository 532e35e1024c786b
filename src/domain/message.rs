use super::{MessageMetadata, MessageRole, SessionId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// A single chat turn. Never updated after creation.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub session_id: SessionId,
    pub role: MessageRole,
    pub content: String,
    pub metadata: Option<MessageMetadata>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        session_id: SessionId,
        role: MessageRole,
        content: String,
        metadata: Option<MessageMetadata>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            session_id,
            role,
            content,
            metadata,
            created_at: Utc::now(),
        }
    }

    pub fn user(session_id: SessionId, content: String, file_content: Option<String>) -> Self {
        let metadata = file_content.map(MessageMetadata::with_file_content);
        Self::new(session_id, MessageRole::User, content, metadata)
    }
}
