use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;

use crate::domain::{ParsedContent, SessionId, UploadedFile};

#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    pub file_id: String,
    pub filename: String,
    pub original_filename: String,
    pub file_type: String,
    pub size_bytes: u64,
    pub content: ParsedContent,
    pub uploaded_at: DateTime<Utc>,
}

impl StoredFile {
    pub fn new(file: &UploadedFile, content: ParsedContent) -> Self {
        Self {
            file_id: file.id.as_uuid().to_string(),
            filename: file.filename.clone(),
            original_filename: file.original_filename.clone(),
            file_type: file.extension.clone(),
            size_bytes: file.size_bytes,
            content,
            uploaded_at: Utc::now(),
        }
    }
}

/// Parsed uploads kept in memory per session until the session is cleared.
#[derive(Default)]
pub struct SessionFileStore {
    files: DashMap<SessionId, Vec<StoredFile>>,
}

impl SessionFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, session_id: &SessionId, file: StoredFile) {
        self.files.entry(session_id.clone()).or_default().push(file);
    }

    /// Files in upload order. Unknown sessions yield an empty list.
    pub fn files(&self, session_id: &SessionId) -> Vec<StoredFile> {
        self.files
            .get(session_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn clear(&self, session_id: &SessionId) -> usize {
        self.files
            .remove(session_id)
            .map(|(_, files)| files.len())
            .unwrap_or(0)
    }

    pub fn session_count(&self) -> usize {
        self.files.len()
    }
}
