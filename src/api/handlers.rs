//! Shared server state, error mapping and the health handler

use crate::assistant::NoteAssistant;
use crate::events::EventBus;
use crate::notes::NoteManager;
use crate::store::{BackendKind, StoreError};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

/// Shared server state
pub struct ServerState {
    pub notes: Arc<NoteManager>,
    pub assistant: Arc<NoteAssistant>,
    /// Broadcast of note mutations, feeds `/ws/events`
    pub event_bus: Arc<EventBus>,
}

pub type NotesState = Arc<ServerState>;

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: BackendKind,
    pub model: String,
}

/// Health check handler.
///
/// 200 + `"ok"` when the bound store answers, 503 + `"unhealthy"` otherwise.
pub async fn health(State(state): State<NotesState>) -> (StatusCode, Json<HealthResponse>) {
    let store_ok = state.notes.store().health_check().await.unwrap_or(false);

    let (http_status, status) = if store_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            backend: state.notes.backend_kind(),
            model: state.assistant.model_name().to_string(),
        }),
    )
}

// ============================================================================
// Errors
// ============================================================================

/// API error, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
    /// An upstream service (remote store, language model) failed
    RemoteFailure(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::RemoteFailure(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %message, "Request failed");
        }

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(format!("Note not found: {}", id)),
            StoreError::RemoteFailure(msg) => AppError::RemoteFailure(msg),
        }
    }
}
