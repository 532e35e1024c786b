use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::SessionSummary;
use crate::domain::SessionId;
use crate::presentation::state::AppState;

use super::ApiError;
use super::chat::optional_session_id;

#[derive(Serialize)]
pub struct NewSessionResponse {
    pub session_id: SessionId,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ClearSessionRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct ClearSessionResponse {
    pub message: String,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub chat_history: Vec<SessionSummary>,
    pub success: bool,
}

#[tracing::instrument(skip(state))]
pub async fn new_session_handler(
    State(state): State<AppState>,
) -> Result<Json<NewSessionResponse>, ApiError> {
    let session_id = state.chat_service.new_session().await?;

    Ok(Json(NewSessionResponse {
        session_id,
        success: true,
        timestamp: Utc::now(),
    }))
}

/// A missing or blank `session_id` is a successful no-op.
#[tracing::instrument(skip(state, payload))]
pub async fn clear_session_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClearSessionRequest>, JsonRejection>,
) -> Result<Json<ClearSessionResponse>, ApiError> {
    let Json(request) = payload?;

    match optional_session_id(request.session_id)? {
        Some(session_id) => state.chat_service.clear_session(&session_id).await?,
        None => tracing::debug!("Clear requested without a session id"),
    }

    Ok(Json(ClearSessionResponse {
        message: "Session cleared successfully".to_string(),
        success: true,
        timestamp: Utc::now(),
    }))
}

#[tracing::instrument(skip(state))]
pub async fn history_handler(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let chat_history = state.chat_service.history().await?;

    Ok(Json(HistoryResponse {
        chat_history,
        success: true,
    }))
}
