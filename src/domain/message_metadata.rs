use serde::{Deserialize, Serialize};

use super::{Language, SubjectArea};

/// Optional details stored alongside a message as a JSON blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_area: Option<SubjectArea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,
}

impl MessageMetadata {
    pub fn with_file_content(file_content: String) -> Self {
        Self {
            file_content: Some(file_content),
            ..Self::default()
        }
    }

    pub fn classification(language: Language, subject: SubjectArea) -> Self {
        Self {
            detected_language: Some(language),
            subject_area: Some(subject),
            file_content: None,
        }
    }
}
