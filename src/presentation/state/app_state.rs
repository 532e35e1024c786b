use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{FileParser, LanguageIdentifier, LlmClient, SessionRepository};
use crate::application::services::{
    AssistantService, ChatHandleCache, ChatService, ContentFormatter, LanguageDetector,
    SessionFileStore, UploadService,
};

const DEFAULT_MAX_SESSIONS: usize = 1000;
const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);
const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Runtime limits that shape the services.
#[derive(Debug, Clone, Copy)]
pub struct StateLimits {
    pub max_sessions: usize,
    pub idle_ttl: Duration,
    pub max_file_size_bytes: u64,
}

impl Default for StateLimits {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            idle_ttl: DEFAULT_IDLE_TTL,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub assistant: Arc<AssistantService>,
    pub upload_service: Arc<UploadService>,
    pub repository: Arc<dyn SessionRepository>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        llm_client: Arc<dyn LlmClient>,
        identifier: Arc<dyn LanguageIdentifier>,
        file_parser: Arc<dyn FileParser>,
        formatter: ContentFormatter,
        limits: StateLimits,
    ) -> Self {
        let assistant = Arc::new(AssistantService::new(
            llm_client,
            LanguageDetector::new(identifier),
            formatter,
            ChatHandleCache::new(limits.max_sessions, limits.idle_ttl),
        ));
        let files = Arc::new(SessionFileStore::new());

        let chat_service = Arc::new(ChatService::new(
            Arc::clone(&repository),
            Arc::clone(&assistant),
            Arc::clone(&files),
        ));
        let upload_service = Arc::new(UploadService::new(
            file_parser,
            files,
            limits.max_file_size_bytes,
        ));

        Self {
            chat_service,
            assistant,
            upload_service,
            repository,
        }
    }
}
