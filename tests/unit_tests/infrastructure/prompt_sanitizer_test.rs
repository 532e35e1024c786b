use nexus::infrastructure::observability::sanitize_prompt;

#[test]
fn given_blank_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_it_trimmed() {
    assert_eq!(sanitize_prompt("  What is DNA?  "), "What is DNA?");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_and_reports_length() {
    let prompt = "x".repeat(150);

    let sanitized = sanitize_prompt(&prompt);

    assert_eq!(sanitized, format!("{}... (150 chars total)", "x".repeat(100)));
}

#[test]
fn given_long_multibyte_prompt_when_sanitizing_then_cuts_on_char_boundary() {
    let prompt = "अ".repeat(120);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"अ".repeat(100)));
    assert!(sanitized.ends_with("(120 chars total)"));
}

#[test]
fn given_credentials_in_prompt_when_sanitizing_then_values_are_redacted() {
    let sanitized = sanitize_prompt("call with api_key=abc123 and Bearer sk-secret-value");

    assert_eq!(
        sanitized,
        "call with api_key=[REDACTED] and Bearer [REDACTED]"
    );
}
