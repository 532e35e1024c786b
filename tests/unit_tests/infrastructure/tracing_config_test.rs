use nexus::infrastructure::observability::TracingConfig;
use nexus::presentation::Environment;
use nexus::presentation::config::LoggingSettings;

#[test]
fn given_blank_level_when_building_config_then_uses_default_directives() {
    let logging = LoggingSettings {
        level: "  ".to_string(),
        enable_json: false,
    };

    let config = TracingConfig::from_settings(Environment::Local, &logging);

    assert_eq!(config.directives, "info,nexus=debug,tower_http=debug");
    assert_eq!(config.environment, Environment::Local);
}

#[test]
fn given_configured_level_and_json_when_building_config_then_both_are_used() {
    let logging = LoggingSettings {
        level: "warn,nexus=info".to_string(),
        enable_json: true,
    };

    let config = TracingConfig::from_settings(Environment::Prod, &logging);

    assert_eq!(config.directives, "warn,nexus=info");
    assert!(config.json_format);
}

#[test]
fn given_environment_names_when_parsing_then_accepts_aliases_case_insensitively() {
    assert_eq!(
        Environment::try_from("PRODUCTION".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(Environment::try_from("test".to_string()), Ok(Environment::Test));
    assert!(Environment::try_from("staging".to_string()).is_err());
}
