use crate::domain::{ChatSession, Message, SessionId};
use async_trait::async_trait;

use super::RepositoryError;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(&self, session: &ChatSession) -> Result<(), RepositoryError>;

    /// Returns the session with its messages in chronological order.
    async fn get_session(&self, id: &SessionId) -> Result<Option<ChatSession>, RepositoryError>;

    /// Creates the session row when it does not exist yet.
    async fn ensure_session(&self, id: &SessionId) -> Result<(), RepositoryError>;

    /// Appends the messages of one session atomically and bumps its `updated_at`.
    /// Either every message is stored or none is.
    async fn append_messages(&self, messages: &[Message]) -> Result<(), RepositoryError>;

    /// Deletes the session and its messages. Returns whether a row was removed.
    async fn delete_session(&self, id: &SessionId) -> Result<bool, RepositoryError>;

    /// All sessions, most recently updated first, each with its messages.
    async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError>;

    async fn ping(&self) -> Result<(), RepositoryError>;
}
