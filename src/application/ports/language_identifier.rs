/// Statistical language identification over free text.
pub trait LanguageIdentifier: Send + Sync {
    /// Returns the raw ISO 639 code (two or three letters) of the detected language.
    fn identify(&self, text: &str) -> Result<String, LanguageIdentifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LanguageIdentifierError {
    #[error("language could not be determined")]
    Undetermined,
    #[error("identifier failed: {0}")]
    Failed(String),
}
