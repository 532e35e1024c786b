use std::sync::LazyLock;

use regex::Regex;

const MAX_VISIBLE_CHARS: usize = 100;

static SECRETS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(bearer\s+|(?:api_key|key|password|secret|token)=)[^\s&"']+"#).unwrap()
});

/// Shortens prompt text for logs and redacts credential-looking values.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = match trimmed.char_indices().nth(MAX_VISIBLE_CHARS) {
        Some((idx, _)) => format!("{}... ({} chars total)", &trimmed[..idx], total_chars),
        None => trimmed.to_string(),
    };

    SECRETS.replace_all(&visible, "${1}[REDACTED]").into_owned()
}
