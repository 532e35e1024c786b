use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::{StoredFile, UploadError, UploadOutcome, UploadService};
use crate::domain::SessionId;
use crate::presentation::state::AppState;

use super::ApiError;
use super::chat::optional_session_id;

const FILE_FIELD: &str = "file";
const SESSION_FIELD: &str = "session_id";

#[derive(Serialize)]
pub struct FilesStatusResponse {
    pub status: String,
    pub supported_formats: Vec<String>,
    pub max_file_size: String,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct SessionFilesResponse {
    pub session_id: SessionId,
    pub files: Vec<StoredFile>,
    pub count: usize,
    pub success: bool,
}

fn multipart_error(e: MultipartError, limit: u64) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge { limit }.into()
    } else {
        UploadError::Multipart(e.body_text()).into()
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadOutcome>, ApiError> {
    let mut multipart = multipart.map_err(|e| UploadError::Multipart(e.body_text()))?;
    let limit = state.upload_service.max_file_size_bytes();
    let mut file = None;
    let mut raw_session_id = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
                file = Some((filename, data));
            }
            Some(SESSION_FIELD) => {
                raw_session_id = Some(field.text().await.map_err(|e| multipart_error(e, limit))?);
            }
            _ => {}
        }
    }

    let (filename, data) = file.ok_or(UploadError::NoFile)?;
    let session_id = optional_session_id(raw_session_id)?;

    tracing::debug!(filename = %filename, size = data.len(), "File upload received");

    let outcome = state
        .upload_service
        .process(&filename, &data, session_id.as_ref())
        .await?;

    Ok(Json(outcome))
}

pub async fn files_status_handler(State(state): State<AppState>) -> Json<FilesStatusResponse> {
    let limit_mb = state.upload_service.max_file_size_bytes() / (1024 * 1024);

    Json(FilesStatusResponse {
        status: "File processing system operational".to_string(),
        supported_formats: UploadService::supported_formats()
            .iter()
            .map(|ext| ext.to_string())
            .collect(),
        max_file_size: format!("{}MB", limit_mb),
        success: true,
        timestamp: Utc::now(),
    })
}

#[tracing::instrument(skip(state))]
pub async fn session_files_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionFilesResponse>, ApiError> {
    let session_id = SessionId::parse(session_id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid session_id: {}", e)))?;

    let files = state.upload_service.session_files(&session_id);

    Ok(Json(SessionFilesResponse {
        session_id,
        count: files.len(),
        files,
        success: true,
    }))
}
