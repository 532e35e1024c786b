mod chat_session;
mod language;
mod message;
mod message_metadata;
mod message_role;
mod parsed_content;
mod session_id;
mod subject_area;
mod uploaded_file;

pub use chat_session::{ChatSession, truncate_with_ellipsis};
pub use language::Language;
pub use message::{Message, MessageId};
pub use message_metadata::MessageMetadata;
pub use message_role::MessageRole;
pub use parsed_content::{ContentDetails, ImageMetadata, ParsedContent, SlideContent, word_count};
pub use session_id::{InvalidSessionId, MAX_SESSION_ID_LENGTH, SessionId};
pub use subject_area::SubjectArea;
pub use uploaded_file::{
    ALLOWED_EXTENSIONS, FileId, FileType, UploadedFile, extension_of, sanitize_filename,
};
