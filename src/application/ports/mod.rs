mod file_parser;
mod language_identifier;
mod llm_client;
mod repository_error;
mod session_repository;

pub use file_parser::{FileParser, FileParserError};
pub use language_identifier::{LanguageIdentifier, LanguageIdentifierError};
pub use llm_client::{ChatTurn, LlmClient, LlmClientError, TurnRole};
pub use repository_error::RepositoryError;
pub use session_repository::SessionRepository;
