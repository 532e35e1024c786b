use std::fmt;

use serde::Serialize;
use uuid::Uuid;

pub const MAX_SESSION_ID_LENGTH: usize = 64;

/// Opaque caller- or server-generated token identifying a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidSessionId> {
        let raw = raw.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(InvalidSessionId::Empty);
        }
        if trimmed.chars().count() > MAX_SESSION_ID_LENGTH {
            return Err(InvalidSessionId::TooLong(MAX_SESSION_ID_LENGTH));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(InvalidSessionId::InvalidCharacters);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSessionId {
    #[error("session id must not be empty")]
    Empty,
    #[error("session id must be at most {0} characters")]
    TooLong(usize),
    #[error("session id may only contain letters, digits, '-' and '_'")]
    InvalidCharacters,
}
