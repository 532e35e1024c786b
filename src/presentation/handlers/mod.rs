mod api_error;
mod chat;
mod files;
mod formats;
mod health;
mod sessions;

pub use api_error::{ApiError, ErrorResponse};
pub use chat::{ChatRequest, chat_handler};
pub use files::{files_status_handler, session_files_handler, upload_handler};
pub use formats::{formats_handler, reload_formats_handler};
pub use health::{API_ENDPOINTS, health_handler, root_handler, status_handler};
pub use sessions::{clear_session_handler, history_handler, new_session_handler};
