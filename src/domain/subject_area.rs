use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectArea {
    Programming,
    Mathematics,
    Science,
    Literature,
    History,
    DocumentAnalysis,
    General,
}

impl SubjectArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectArea::Programming => "programming",
            SubjectArea::Mathematics => "mathematics",
            SubjectArea::Science => "science",
            SubjectArea::Literature => "literature",
            SubjectArea::History => "history",
            SubjectArea::DocumentAnalysis => "document_analysis",
            SubjectArea::General => "general",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SubjectArea::Programming => "💻",
            SubjectArea::Mathematics => "📊",
            SubjectArea::Science => "🔬",
            SubjectArea::Literature => "📖",
            SubjectArea::History => "🏛️",
            SubjectArea::DocumentAnalysis | SubjectArea::General => "🎯",
        }
    }
}

impl FromStr for SubjectArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "programming" => Ok(SubjectArea::Programming),
            "mathematics" => Ok(SubjectArea::Mathematics),
            "science" => Ok(SubjectArea::Science),
            "literature" => Ok(SubjectArea::Literature),
            "history" => Ok(SubjectArea::History),
            "document_analysis" => Ok(SubjectArea::DocumentAnalysis),
            "general" => Ok(SubjectArea::General),
            _ => Err(format!("Invalid subject area: {}", s)),
        }
    }
}

impl fmt::Display for SubjectArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
