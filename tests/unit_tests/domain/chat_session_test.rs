use nexus::domain::{ChatSession, Message, MessageRole, SessionId, truncate_with_ellipsis};

fn session_id() -> SessionId {
    SessionId::parse("session-1").unwrap()
}

#[test]
fn given_session_without_messages_when_titling_then_returns_placeholder() {
    let session = ChatSession::new(session_id());

    assert_eq!(session.title(), "New Chat");
    assert_eq!(session.preview(), "");
}

#[test]
fn given_long_first_question_when_titling_then_truncates_to_fifty_chars_with_ellipsis() {
    let mut session = ChatSession::new(session_id());
    let question = "x".repeat(60);
    session
        .messages
        .push(Message::user(session_id(), question, None));

    let title = session.title();

    assert_eq!(title, format!("{}...", "x".repeat(50)));
}

#[test]
fn given_short_first_question_when_titling_then_keeps_it_whole() {
    let mut session = ChatSession::new(session_id());
    session
        .messages
        .push(Message::user(session_id(), "What is DNA?".to_string(), None));

    assert_eq!(session.title(), "What is DNA?");
}

#[test]
fn given_answered_session_when_previewing_then_uses_last_bot_message() {
    let mut session = ChatSession::new(session_id());
    session
        .messages
        .push(Message::user(session_id(), "First".to_string(), None));
    session.messages.push(Message::new(
        session_id(),
        MessageRole::Bot,
        "Old answer".to_string(),
        None,
    ));
    session.messages.push(Message::new(
        session_id(),
        MessageRole::Bot,
        "Latest answer".to_string(),
        None,
    ));

    assert_eq!(session.preview(), "Latest answer");
    assert_eq!(session.title(), "First");
}

#[test]
fn given_unanswered_session_when_previewing_then_falls_back_to_question() {
    let mut session = ChatSession::new(session_id());
    session
        .messages
        .push(Message::user(session_id(), "Pending".to_string(), None));

    assert_eq!(session.preview(), "Pending");
}

#[test]
fn given_multibyte_text_when_truncating_then_cuts_on_char_boundary() {
    assert_eq!(truncate_with_ellipsis("héllo wörld", 5), "héllo...");
    assert_eq!(truncate_with_ellipsis("नमस्ते", 100), "नमस्ते");
}
