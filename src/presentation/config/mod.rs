mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, FormatterSettings, LlmProvider, LlmSettings, LoggingSettings,
    ServerSettings, SessionSettings, Settings, UploadSettings,
};
