use std::fmt;

use serde::{Deserialize, Serialize};

/// Response languages the assistant supports. English is the default; every
/// other variant is an Indic language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "mr")]
    Marathi,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "gu")]
    Gujarati,
    #[serde(rename = "kn")]
    Kannada,
    #[serde(rename = "ml")]
    Malayalam,
    #[serde(rename = "pa")]
    Punjabi,
    #[serde(rename = "or")]
    Odia,
    #[serde(rename = "as")]
    Assamese,
    #[serde(rename = "ur")]
    Urdu,
}

impl Language {
    pub const INDIC: [Language; 12] = [
        Language::Hindi,
        Language::Bengali,
        Language::Telugu,
        Language::Marathi,
        Language::Tamil,
        Language::Gujarati,
        Language::Kannada,
        Language::Malayalam,
        Language::Punjabi,
        Language::Odia,
        Language::Assamese,
        Language::Urdu,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Bengali => "bn",
            Language::Telugu => "te",
            Language::Marathi => "mr",
            Language::Tamil => "ta",
            Language::Gujarati => "gu",
            Language::Kannada => "kn",
            Language::Malayalam => "ml",
            Language::Punjabi => "pa",
            Language::Odia => "or",
            Language::Assamese => "as",
            Language::Urdu => "ur",
        }
    }

    fn iso639_3(&self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::Hindi => "hin",
            Language::Bengali => "ben",
            Language::Telugu => "tel",
            Language::Marathi => "mar",
            Language::Tamil => "tam",
            Language::Gujarati => "guj",
            Language::Kannada => "kan",
            Language::Malayalam => "mal",
            Language::Punjabi => "pan",
            Language::Odia => "ori",
            Language::Assamese => "asm",
            Language::Urdu => "urd",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Bengali => "Bengali",
            Language::Telugu => "Telugu",
            Language::Marathi => "Marathi",
            Language::Tamil => "Tamil",
            Language::Gujarati => "Gujarati",
            Language::Kannada => "Kannada",
            Language::Malayalam => "Malayalam",
            Language::Punjabi => "Punjabi",
            Language::Odia => "Odia",
            Language::Assamese => "Assamese",
            Language::Urdu => "Urdu",
        }
    }

    /// Accepts ISO 639-1 (`hi`) or ISO 639-3 (`hin`) spellings.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        std::iter::once(Language::English)
            .chain(Self::INDIC)
            .find(|lang| lang.code() == code || lang.iso639_3() == code)
    }

    pub fn is_default(&self) -> bool {
        *self == Language::English
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
