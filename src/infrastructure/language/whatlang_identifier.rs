use crate::application::ports::{LanguageIdentifier, LanguageIdentifierError};

/// Trigram-based identification via `whatlang`. Deterministic for a given input.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangIdentifier;

impl WhatlangIdentifier {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageIdentifier for WhatlangIdentifier {
    fn identify(&self, text: &str) -> Result<String, LanguageIdentifierError> {
        whatlang::detect(text)
            .map(|info| info.lang().code().to_string())
            .ok_or(LanguageIdentifierError::Undetermined)
    }
}
