use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileParser, FileParserError};
use crate::domain::{FileType, ParsedContent, UploadedFile};

/// Routes each upload to the adapter registered for its file type.
pub struct CompositeFileParser {
    adapters: HashMap<FileType, Arc<dyn FileParser>>,
}

impl CompositeFileParser {
    pub fn new(adapters: Vec<(FileType, Arc<dyn FileParser>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }
}

#[async_trait]
impl FileParser for CompositeFileParser {
    async fn parse(
        &self,
        data: &[u8],
        file: &UploadedFile,
    ) -> Result<ParsedContent, FileParserError> {
        let adapter = self
            .adapters
            .get(&file.file_type)
            .ok_or_else(|| FileParserError::UnsupportedFileType(file.extension.clone()))?;

        adapter.parse(data, file).await
    }
}
