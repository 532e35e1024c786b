use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{RepositoryError, SessionRepository};
use crate::domain::{ChatSession, Message, MessageId, MessageMetadata, MessageRole, SessionId};

pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn messages_for(&self, chat_id: i64) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT m.id, c.session_id, m.role, m.content, m.metadata, m.created_at
            FROM messages m
            JOIN chats c ON c.id = m.chat_id
            WHERE m.chat_id = $1
            ORDER BY m.created_at ASC, m.id ASC
            "#,
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.into_iter().map(MessageRow::into_message).collect()
    }
}

#[derive(sqlx::FromRow)]
struct ChatRow {
    id: i64,
    session_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ChatRow {
    fn into_session(self, messages: Vec<Message>) -> Result<ChatSession, RepositoryError> {
        let id = SessionId::parse(self.session_id)
            .map_err(|e| RepositoryError::CorruptRow(format!("chats.session_id: {}", e)))?;

        Ok(ChatSession {
            id,
            messages,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    session_id: String,
    role: String,
    content: String,
    metadata: Option<Json<MessageMetadata>>,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> Result<Message, RepositoryError> {
        let role = self
            .role
            .parse::<MessageRole>()
            .map_err(RepositoryError::CorruptRow)?;
        let session_id = SessionId::parse(self.session_id)
            .map_err(|e| RepositoryError::CorruptRow(format!("chats.session_id: {}", e)))?;

        Ok(Message {
            id: MessageId::from_uuid(self.id),
            session_id,
            role,
            content: self.content,
            metadata: self.metadata.map(|Json(metadata)| metadata),
            created_at: self.created_at,
        })
    }
}

fn query_failed(e: sqlx::Error) -> RepositoryError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
            RepositoryError::ConstraintViolation(db.message().to_string())
        }
        _ => RepositoryError::QueryFailed(e.to_string()),
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self, session), fields(session_id = %session.id))]
    async fn create_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO chats (session_id, created_at, updated_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(session.id.as_str())
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(())
    }

    #[instrument(skip(self), fields(session_id = %id))]
    async fn get_session(&self, id: &SessionId) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query_as::<_, ChatRow>(
            r#"
            SELECT id, session_id, created_at, updated_at
            FROM chats
            WHERE session_id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        match row {
            Some(r) => {
                let messages = self.messages_for(r.id).await?;
                r.into_session(messages).map(Some)
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self), fields(session_id = %id))]
    async fn ensure_session(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO chats (session_id, created_at, updated_at)
            VALUES ($1, $2, $2)
            ON CONFLICT (session_id) DO NOTHING
            "#,
        )
        .bind(id.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(())
    }

    #[instrument(skip(self, messages), fields(count = messages.len()))]
    async fn append_messages(&self, messages: &[Message]) -> Result<(), RepositoryError> {
        let Some(first) = messages.first() else {
            return Ok(());
        };
        let session_id = &first.session_id;
        if let Some(stray) = messages.iter().find(|m| &m.session_id != session_id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "message for session {} appended to session {}",
                stray.session_id, session_id
            )));
        }
        let latest = messages
            .iter()
            .map(|m| m.created_at)
            .fold(first.created_at, std::cmp::max);

        let mut tx = self.pool.begin().await.map_err(query_failed)?;

        let chat_id: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE chats
            SET updated_at = GREATEST(updated_at, $1)
            WHERE session_id = $2
            RETURNING id
            "#,
        )
        .bind(latest)
        .bind(session_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(query_failed)?;

        let chat_id = chat_id.ok_or_else(|| {
            RepositoryError::ConstraintViolation(format!("session {} does not exist", session_id))
        })?;

        for message in messages {
            sqlx::query(
                r#"
                INSERT INTO messages (id, chat_id, role, content, metadata, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(message.id.as_uuid())
            .bind(chat_id)
            .bind(message.role.as_str())
            .bind(&message.content)
            .bind(message.metadata.as_ref().map(Json))
            .bind(message.created_at)
            .execute(&mut *tx)
            .await
            .map_err(query_failed)?;
        }

        tx.commit().await.map_err(query_failed)?;

        Ok(())
    }

    #[instrument(skip(self), fields(session_id = %id))]
    async fn delete_session(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM chats WHERE session_id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError> {
        let chats = sqlx::query_as::<_, ChatRow>(
            r#"
            SELECT id, session_id, created_at, updated_at
            FROM chats
            ORDER BY updated_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT m.id, c.session_id, m.role, m.content, m.metadata, m.created_at
            FROM messages m
            JOIN chats c ON c.id = m.chat_id
            ORDER BY m.created_at ASC, m.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        let mut by_session: HashMap<String, Vec<Message>> = HashMap::new();
        for row in rows {
            let key = row.session_id.clone();
            by_session.entry(key).or_default().push(row.into_message()?);
        }

        chats
            .into_iter()
            .map(|chat| {
                let messages = by_session.remove(&chat.session_id).unwrap_or_default();
                chat.into_session(messages)
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}
