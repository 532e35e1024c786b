use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileParser, FileParserError};
use crate::domain::{ContentDetails, FileType, ParsedContent, UploadedFile, word_count};

use super::text_sanitizer::sanitize_extracted_text;

const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

pub struct PdfAdapter {
    timeout: Duration,
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTRACTION_TIMEOUT)
    }
}

struct ExtractedPdf {
    page_count: usize,
    pages: Vec<(usize, String)>,
}

impl PdfAdapter {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn extract_pages(path: &std::path::Path) -> Result<ExtractedPdf, FileParserError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileParserError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileParserError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);

        for page_index in 0..page_count {
            let text = doc.extract_text(page_index).unwrap_or_default();
            let text = sanitize_extracted_text(&text);

            if !text.is_empty() {
                pages.push((page_index + 1, text));
            }
        }

        Ok(ExtractedPdf { page_count, pages })
    }
}

#[async_trait]
impl FileParser for PdfAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %file.filename))]
    async fn parse(
        &self,
        data: &[u8],
        file: &UploadedFile,
    ) -> Result<ParsedContent, FileParserError> {
        if file.file_type != FileType::Pdf {
            return Err(FileParserError::UnsupportedFileType(file.extension.clone()));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileParserError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            FileParserError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let extracted = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::extract_pages(&temp_path)),
        )
        .await
        .map_err(|_| FileParserError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileParserError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(
            page_count = extracted.page_count,
            pages_with_text = extracted.pages.len(),
            "PDF text extraction complete"
        );

        let full_text = extracted
            .pages
            .iter()
            .map(|(number, text)| format!("--- Page {} ---\n{}", number, text))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(ParsedContent {
            kind: file.file_type.content_tag().to_string(),
            summary: format!(
                "PDF with {} pages processed successfully",
                extracted.page_count
            ),
            details: ContentDetails::Pdf {
                page_count: extracted.page_count,
                word_count: word_count(&full_text),
            },
            text_content: Some(full_text),
        })
    }
}
