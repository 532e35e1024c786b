use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    chat_handler, clear_session_handler, files_status_handler, formats_handler, health_handler,
    history_handler, new_session_handler, reload_formats_handler, root_handler,
    session_files_handler, status_handler, upload_handler,
};
use crate::presentation::state::AppState;

/// Headroom over the file ceiling for multipart boundaries and the other form fields.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = usize::try_from(state.upload_service.max_file_size_bytes())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(root_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/new-session", post(new_session_handler))
        .route("/api/clear-session", post(clear_session_handler))
        .route("/api/history", get(history_handler))
        .route("/api/files/upload", post(upload_handler))
        .route("/api/files/test", get(files_status_handler))
        .route(
            "/api/files/session/{session_id}",
            get(session_files_handler),
        )
        .route("/api/formats", get(formats_handler))
        .route("/api/formats/reload", post(reload_formats_handler))
        .route("/api/health", get(health_handler))
        .route("/api/status", get(status_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
