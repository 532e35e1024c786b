use serde::Serialize;
use serde_json::{Map, Value};

/// Structured result of parsing an upload. Serialized with a `type` tag plus the
/// fields specific to that file family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(flatten)]
    pub details: ContentDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentDetails {
    Text {
        word_count: usize,
        character_count: usize,
        line_count: usize,
    },
    Pdf {
        page_count: usize,
        word_count: usize,
    },
    Docx {
        paragraph_count: usize,
        table_count: usize,
        word_count: usize,
        tables: Vec<Vec<Vec<String>>>,
    },
    Spreadsheet {
        columns: Vec<String>,
        shape: [usize; 2],
        data_preview: Vec<Map<String, Value>>,
        sheet_names: Vec<String>,
    },
    Presentation {
        slides: Vec<SlideContent>,
        total_slides: usize,
    },
    Image {
        metadata: ImageMetadata,
        extracted_text: String,
        has_text: bool,
    },
    Unparsed {
        requires: String,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideContent {
    pub slide_number: usize,
    pub content: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageMetadata {
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub mode: String,
}

impl ParsedContent {
    pub fn unparsed(kind: &str, summary: String, requires: &str) -> Self {
        Self {
            kind: kind.to_string(),
            summary,
            text_content: None,
            details: ContentDetails::Unparsed {
                requires: requires.to_string(),
            },
        }
    }

    pub fn failed(kind: &str, filename: &str, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            kind: kind.to_string(),
            summary: "File processing failed".to_string(),
            text_content: None,
            details: ContentDetails::Failed {
                error: format!("Error processing {}: {}", filename, error),
            },
        }
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
