use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use crate::application::services::{AssistantReply, SendMessageRequest};
use crate::domain::{InvalidSessionId, SessionId};
use crate::presentation::state::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub file_content: Option<String>,
}

/// Blank ids are treated as absent; anything else must be a valid token.
pub(super) fn optional_session_id(raw: Option<String>) -> Result<Option<SessionId>, ApiError> {
    match raw.map(SessionId::parse) {
        None | Some(Err(InvalidSessionId::Empty)) => Ok(None),
        Some(Ok(id)) => Ok(Some(id)),
        Some(Err(e)) => Err(ApiError::BadRequest(format!("Invalid session_id: {}", e))),
    }
}

#[tracing::instrument(skip(state, payload))]
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<AssistantReply>, ApiError> {
    let Json(request) = payload?;
    let session_id = optional_session_id(request.session_id)?;

    let reply = state
        .chat_service
        .send_message(SendMessageRequest {
            message: request.message.unwrap_or_default(),
            session_id,
            file_content: request.file_content,
        })
        .await?;

    Ok(Json(reply))
}
