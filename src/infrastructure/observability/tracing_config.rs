use crate::presentation::config::{Environment, LoggingSettings};

const DEFAULT_DIRECTIVES: &str = "info,nexus=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: Environment,
    pub json_format: bool,
    pub directives: String,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` forces JSON output regardless of the configured flag.
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        let json_from_env = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let directives = if logging.level.trim().is_empty() {
            DEFAULT_DIRECTIVES.to_string()
        } else {
            logging.level.clone()
        };

        Self {
            environment,
            json_format: logging.enable_json || json_from_env,
            directives,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            directives: DEFAULT_DIRECTIVES.to_string(),
        }
    }
}
