use async_trait::async_trait;

use crate::domain::{ParsedContent, UploadedFile};

#[async_trait]
pub trait FileParser: Send + Sync {
    async fn parse(&self, data: &[u8], file: &UploadedFile)
    -> Result<ParsedContent, FileParserError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileParserError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in: {0}")]
    NoTextFound(String),
    #[error("{0} not available")]
    ParserUnavailable(String),
}
