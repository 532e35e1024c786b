use std::sync::Arc;

use crate::application::ports::LanguageIdentifier;
use crate::domain::Language;

const MIN_DETECTABLE_CHARS: usize = 3;

/// Tokens that skew statistical detection when users paste code.
const CODE_STOPLIST: &[&str] = &[
    "def", "class", "import", "from", "if", "else", "for", "while", "function", "var", "let",
    "const", "return", "print", "console.log",
];

pub struct LanguageDetector {
    identifier: Arc<dyn LanguageIdentifier>,
}

impl LanguageDetector {
    pub fn new(identifier: Arc<dyn LanguageIdentifier>) -> Self {
        Self { identifier }
    }

    /// Detects one of the supported Indic languages, defaulting to English for
    /// short input, identifier failures and every other language.
    pub fn detect(&self, text: &str) -> Language {
        if text.trim().chars().count() < MIN_DETECTABLE_CHARS {
            return Language::default();
        }

        let lowered = text.to_lowercase();
        let filtered = lowered
            .split_whitespace()
            .filter(|word| !CODE_STOPLIST.contains(word))
            .collect::<Vec<_>>()
            .join(" ");
        let candidate = if filtered.is_empty() { text } else { filtered.as_str() };

        match self.identifier.identify(candidate) {
            Ok(code) => Language::from_code(&code)
                .filter(|lang| Language::INDIC.contains(lang))
                .unwrap_or_default(),
            Err(e) => {
                tracing::debug!(error = %e, "Language identification failed, using default");
                Language::default()
            }
        }
    }
}
