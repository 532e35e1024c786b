use async_trait::async_trait;

use crate::application::ports::{FileParser, FileParserError};
use crate::domain::{ContentDetails, FileType, ParsedContent, UploadedFile, word_count};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

pub struct PlainTextAdapter;

impl PlainTextAdapter {
    /// UTF-8 first, then UTF-16 when a byte-order mark says so, then Latin-1,
    /// which accepts any byte sequence.
    pub fn decode(data: &[u8]) -> String {
        if let Some(rest) = data.strip_prefix(&UTF8_BOM) {
            return String::from_utf8_lossy(rest).into_owned();
        }
        if let Some(rest) = data.strip_prefix(&UTF16_LE_BOM) {
            return decode_utf16(rest, u16::from_le_bytes);
        }
        if let Some(rest) = data.strip_prefix(&UTF16_BE_BOM) {
            return decode_utf16(rest, u16::from_be_bytes);
        }

        match std::str::from_utf8(data) {
            Ok(text) => text.to_string(),
            Err(_) => data.iter().map(|&b| b as char).collect(),
        }
    }
}

fn decode_utf16(data: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

#[async_trait]
impl FileParser for PlainTextAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %file.filename))]
    async fn parse(
        &self,
        data: &[u8],
        file: &UploadedFile,
    ) -> Result<ParsedContent, FileParserError> {
        if file.file_type != FileType::Text {
            return Err(FileParserError::UnsupportedFileType(file.extension.clone()));
        }

        let content = Self::decode(data).replace('\0', "");
        let content = content.trim();
        if content.is_empty() {
            return Err(FileParserError::NoTextFound(file.filename.clone()));
        }

        let words = word_count(content);

        Ok(ParsedContent {
            kind: file.file_type.content_tag().to_string(),
            summary: format!("Text file with {} words processed successfully", words),
            text_content: Some(content.to_string()),
            details: ContentDetails::Text {
                word_count: words,
                character_count: content.chars().count(),
                line_count: content.lines().count(),
            },
        })
    }
}
