use super::{Message, MessageRole, SessionId};
use chrono::{DateTime, Utc};

const TITLE_MAX_CHARS: usize = 50;
const PREVIEW_MAX_CHARS: usize = 80;
const UNTITLED: &str = "New Chat";

#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: SessionId,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn first_user_message(&self) -> Option<&Message> {
        self.messages.iter().find(|m| m.role == MessageRole::User)
    }

    pub fn last_bot_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.role == MessageRole::Bot)
    }

    /// First user message, shortened for the sidebar.
    pub fn title(&self) -> String {
        self.first_user_message()
            .map(|m| truncate_with_ellipsis(&m.content, TITLE_MAX_CHARS))
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Last bot answer, or the opening question when nothing was answered yet.
    pub fn preview(&self) -> String {
        self.last_bot_message()
            .or_else(|| self.first_user_message())
            .map(|m| truncate_with_ellipsis(&m.content, PREVIEW_MAX_CHARS))
            .unwrap_or_default()
    }
}

/// Truncates on character boundaries, appending `...` only when text was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
