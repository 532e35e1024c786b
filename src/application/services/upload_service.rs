use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::FileParser;
use crate::domain::{ALLOWED_EXTENSIONS, ParsedContent, SessionId, UploadedFile, extension_of};

use super::session_file_store::{SessionFileStore, StoredFile};

#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub success: bool,
    pub file_id: String,
    pub filename: String,
    pub file_type: String,
    pub content: ParsedContent,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

pub struct UploadService {
    parser: Arc<dyn FileParser>,
    files: Arc<SessionFileStore>,
    max_file_size_bytes: u64,
}

impl UploadService {
    pub fn new(
        parser: Arc<dyn FileParser>,
        files: Arc<SessionFileStore>,
        max_file_size_bytes: u64,
    ) -> Self {
        Self {
            parser,
            files,
            max_file_size_bytes,
        }
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    /// Validates and parses an upload. Parser failures are reported inside the
    /// returned content rather than as an error.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn process(
        &self,
        original_filename: &str,
        data: &[u8],
        session_id: Option<&SessionId>,
    ) -> Result<UploadOutcome, UploadError> {
        if original_filename.trim().is_empty() {
            return Err(UploadError::EmptyFilename);
        }

        let size_bytes = data.len() as u64;
        if size_bytes > self.max_file_size_bytes {
            tracing::warn!(
                size_bytes,
                limit = self.max_file_size_bytes,
                "Upload rejected as too large"
            );
            return Err(UploadError::TooLarge {
                limit: self.max_file_size_bytes,
            });
        }

        let file = UploadedFile::new(original_filename, size_bytes).ok_or_else(|| {
            UploadError::UnsupportedExtension(
                extension_of(original_filename).unwrap_or_default(),
            )
        })?;

        let content = match self.parser.parse(data, &file).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(filename = %file.filename, error = %e, "File parsing failed");
                ParsedContent::failed(file.file_type.content_tag(), &file.filename, e.to_string())
            }
        };

        if let Some(session_id) = session_id {
            self.files.store(session_id, StoredFile::new(&file, content.clone()));
        }

        tracing::info!(
            file_id = %file.id.as_uuid(),
            filename = %file.filename,
            kind = %content.kind,
            "File processed"
        );

        Ok(UploadOutcome {
            success: true,
            file_id: file.id.as_uuid().to_string(),
            filename: file.filename.clone(),
            file_type: file.extension.clone(),
            content,
            timestamp: Utc::now(),
            message: format!("File \"{}\" processed successfully by Nexus!", file.filename),
        })
    }

    pub fn session_files(&self, session_id: &SessionId) -> Vec<StoredFile> {
        self.files.files(session_id)
    }

    pub fn supported_formats() -> &'static [&'static str] {
        &ALLOWED_EXTENSIONS
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file provided")]
    NoFile,
    #[error("No file selected")]
    EmptyFilename,
    #[error("File type not supported: {0:?}. Allowed: {allowed}", allowed = ALLOWED_EXTENSIONS.join(", "))]
    UnsupportedExtension(String),
    #[error("File too large. Maximum size: {}MB", .limit / (1024 * 1024))]
    TooLarge { limit: u64 },
    #[error("invalid multipart body: {0}")]
    Multipart(String),
}
