mod assistant_service;
mod chat_handle_cache;
mod chat_service;
mod content_formatter;
mod language_detector;
mod session_file_store;
mod subject_classifier;
mod upload_service;

pub use assistant_service::{AssistantReply, AssistantService, OrchestratorError, build_prompt};
pub use chat_handle_cache::{ChatHandle, ChatHandleCache};
pub use chat_service::{
    ChatService, ChatServiceError, HistoryMessage, SendMessageRequest, SessionSummary,
};
pub use content_formatter::{ContentFormatter, FormatDefinition, parse_definitions};
pub use language_detector::LanguageDetector;
pub use session_file_store::{SessionFileStore, StoredFile};
pub use subject_classifier::{classify_subject, subject_scores};
pub use upload_service::{UploadError, UploadOutcome, UploadService};
