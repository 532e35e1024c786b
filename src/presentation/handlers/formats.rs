use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct FormatsResponse {
    pub formats: Vec<String>,
    pub success: bool,
}

pub async fn formats_handler(State(state): State<AppState>) -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: state.assistant.available_formats().await,
        success: true,
    })
}

#[tracing::instrument(skip(state))]
pub async fn reload_formats_handler(State(state): State<AppState>) -> Json<FormatsResponse> {
    let formats = state.assistant.reload_formats().await;
    tracing::info!(count = formats.len(), "Content formats reloaded");

    Json(FormatsResponse {
        formats,
        success: true,
    })
}
