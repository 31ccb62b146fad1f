//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::poller::StatusSnapshot;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/status", get(api_status))
        .route("/api/voice", get(api_voice))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The status page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let view = StatusView::from_snapshot(&state.poller.get_status());
    let html = IndexTemplate { view }
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

    Ok(Html(html))
}

/// Current status as JSON.
async fn api_status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    Json(state.poller.get_status())
}

/// Current status as text for a voice assistant.
async fn api_voice(State(state): State<AppState>) -> Json<VoiceResponse> {
    Json(VoiceResponse::from_snapshot(state.poller.get_status()))
}

/// Anything without a route.
async fn not_found(headers: HeaderMap, uri: Uri) -> Response {
    let message = format!("Nothing at {}", uri.path());

    if accepts_html(&headers) {
        let page = ErrorTemplate {
            title: "Not found".to_string(),
            message,
        };
        let html = page
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e));
        return (StatusCode::NOT_FOUND, Html(html)).into_response();
    }

    AppError::NotFound { message }.into_response()
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => {
                error!(error = %message, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
