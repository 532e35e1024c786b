use std::time::Duration;

use nexus::application::ports::{RepositoryError, SessionRepository};
use nexus::domain::{
    ChatSession, Language, Message, MessageMetadata, MessageRole, SessionId, SubjectArea,
};

use crate::helpers::TestPostgres;

fn id(raw: &str) -> SessionId {
    SessionId::parse(raw).unwrap()
}

#[tokio::test]
async fn given_session_ensured_twice_when_fetching_then_single_empty_session_exists() {
    let pg = TestPostgres::new().await;

    pg.repository.ensure_session(&id("twice")).await.unwrap();
    pg.repository.ensure_session(&id("twice")).await.unwrap();

    let sessions = pg.repository.list_sessions().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert!(sessions[0].messages.is_empty());
}

#[tokio::test]
async fn given_existing_session_when_creating_again_then_returns_constraint_violation() {
    let pg = TestPostgres::new().await;
    let session = ChatSession::new(id("dup"));
    pg.repository.create_session(&session).await.unwrap();

    let result = pg.repository.create_session(&session).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[tokio::test]
async fn given_appended_exchange_when_fetching_then_messages_keep_order_and_metadata() {
    let pg = TestPostgres::new().await;
    let session_id = id("exchange");
    pg.repository.ensure_session(&session_id).await.unwrap();

    let question = Message::user(
        session_id.clone(),
        "What is an acid?".to_string(),
        Some("chapter 4 notes".to_string()),
    );
    let answer = Message::new(
        session_id.clone(),
        MessageRole::Bot,
        "Acids donate protons.".to_string(),
        Some(MessageMetadata::classification(
            Language::English,
            SubjectArea::Science,
        )),
    );
    pg.repository
        .append_messages(&[question.clone(), answer])
        .await
        .unwrap();

    let session = pg.repository.get_session(&session_id).await.unwrap().unwrap();

    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[0].id, question.id);
    assert_eq!(session.messages[0].role, MessageRole::User);
    assert_eq!(
        session.messages[0]
            .metadata
            .as_ref()
            .and_then(|m| m.file_content.as_deref()),
        Some("chapter 4 notes")
    );
    assert_eq!(session.messages[1].role, MessageRole::Bot);
    assert_eq!(
        session.messages[1].metadata.as_ref().and_then(|m| m.subject_area),
        Some(SubjectArea::Science)
    );
    assert_eq!(session.title(), "What is an acid?");
    assert_eq!(session.preview(), "Acids donate protons.");
}

#[tokio::test]
async fn given_second_insert_violates_key_when_appending_then_first_message_is_rolled_back() {
    let pg = TestPostgres::new().await;
    let session_id = id("rollback");
    pg.repository.ensure_session(&session_id).await.unwrap();
    let question = Message::user(session_id.clone(), "What is a mole?".to_string(), None);
    let mut answer = Message::new(
        session_id.clone(),
        MessageRole::Bot,
        "A count of particles.".to_string(),
        None,
    );
    answer.id = question.id;

    let result = pg.repository.append_messages(&[question, answer]).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(&pg.pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn given_unknown_session_when_appending_then_returns_constraint_violation() {
    let pg = TestPostgres::new().await;

    let result = pg
        .repository
        .append_messages(&[Message::user(id("ghost"), "hi".to_string(), None)])
        .await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[tokio::test]
async fn given_session_with_messages_when_deleting_then_messages_are_removed_too() {
    let pg = TestPostgres::new().await;
    let session_id = id("doomed");
    pg.repository.ensure_session(&session_id).await.unwrap();
    pg.repository
        .append_messages(&[Message::user(session_id.clone(), "bye".to_string(), None)])
        .await
        .unwrap();

    let deleted = pg.repository.delete_session(&session_id).await.unwrap();
    let deleted_again = pg.repository.delete_session(&session_id).await.unwrap();

    assert!(deleted);
    assert!(!deleted_again);
    assert!(pg.repository.get_session(&session_id).await.unwrap().is_none());
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(&pg.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn given_sessions_with_activity_when_listing_then_most_recent_comes_first() {
    let pg = TestPostgres::new().await;
    pg.repository.ensure_session(&id("older")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    pg.repository.ensure_session(&id("newer")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    pg.repository
        .append_messages(&[Message::user(id("older"), "bump".to_string(), None)])
        .await
        .unwrap();

    let sessions = pg.repository.list_sessions().await.unwrap();
    let order: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(order, vec!["older", "newer"]);
    assert_eq!(sessions[0].messages.len(), 1);
    assert!(sessions[1].messages.is_empty());
}

#[tokio::test]
async fn given_live_database_when_pinging_then_succeeds() {
    let pg = TestPostgres::new().await;

    assert!(pg.repository.ping().await.is_ok());
}
