use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::{RepositoryError, SessionRepository};
use crate::domain::{ChatSession, Message, SessionId};

/// In-memory repository for tests. Matches the ordering guarantees of the
/// PostgreSQL adapter.
#[derive(Default)]
pub struct MockSessionRepository {
    sessions: RwLock<HashMap<SessionId, ChatSession>>,
    fail: bool,
    message_capacity: Option<usize>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `QueryFailed`.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Stores at most `capacity` messages in total. Appends that would exceed
    /// it fail with `QueryFailed` and store nothing.
    pub fn with_message_capacity(capacity: usize) -> Self {
        Self {
            message_capacity: Some(capacity),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail {
            Err(RepositoryError::QueryFailed("mock failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        self.check()?;
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "session {} already exists",
                session.id
            )));
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn get_session(&self, id: &SessionId) -> Result<Option<ChatSession>, RepositoryError> {
        self.check()?;
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn ensure_session(&self, id: &SessionId) -> Result<(), RepositoryError> {
        self.check()?;
        self.sessions
            .write()
            .await
            .entry(id.clone())
            .or_insert_with(|| ChatSession::new(id.clone()));
        Ok(())
    }

    async fn append_messages(&self, messages: &[Message]) -> Result<(), RepositoryError> {
        self.check()?;
        let Some(first) = messages.first() else {
            return Ok(());
        };
        let mut sessions = self.sessions.write().await;

        if let Some(capacity) = self.message_capacity {
            let stored: usize = sessions.values().map(|s| s.messages.len()).sum();
            if stored + messages.len() > capacity {
                return Err(RepositoryError::QueryFailed(
                    "mock message capacity exceeded".to_string(),
                ));
            }
        }
        if let Some(stray) = messages.iter().find(|m| m.session_id != first.session_id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "message for session {} appended to session {}",
                stray.session_id, first.session_id
            )));
        }

        let session = sessions.get_mut(&first.session_id).ok_or_else(|| {
            RepositoryError::ConstraintViolation(format!(
                "session {} does not exist",
                first.session_id
            ))
        })?;
        for (i, message) in messages.iter().enumerate() {
            let duplicate = session.messages.iter().any(|m| m.id == message.id)
                || messages[..i].iter().any(|m| m.id == message.id);
            if duplicate {
                return Err(RepositoryError::ConstraintViolation(format!(
                    "message {} already exists",
                    message.id.as_uuid()
                )));
            }
        }

        session.messages.extend(messages.iter().cloned());
        session.updated_at = session.updated_at.max(Utc::now());
        Ok(())
    }

    async fn delete_session(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        self.check()?;
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError> {
        self.check()?;
        let mut sessions: Vec<ChatSession> =
            self.sessions.read().await.values().cloned().collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check()
    }
}
