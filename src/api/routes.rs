//! API route definitions

use super::assistant_handlers;
use super::handlers::{self, NotesState};
use super::note_handlers;
use super::ws_handlers;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: NotesState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        // ====================================================================
        // Notes
        // ====================================================================
        .route(
            "/api/notes",
            get(note_handlers::list_notes).post(note_handlers::create_note),
        )
        .route("/api/notes/search", get(note_handlers::search_notes))
        .route(
            "/api/notes/{id}",
            get(note_handlers::get_note)
                .patch(note_handlers::update_note)
                .delete(note_handlers::delete_note),
        )
        .route("/api/notes/{id}/preview", get(note_handlers::preview_note))
        // ====================================================================
        // Assistant
        // ====================================================================
        .route(
            "/api/notes/{id}/assistant",
            post(assistant_handlers::ask_assistant),
        )
        .route("/api/assistant/tools", get(assistant_handlers::list_tools))
        .route(
            "/api/assistant/tools/{tool}",
            post(assistant_handlers::run_tool),
        )
        // ====================================================================
        // Events
        // ====================================================================
        .route("/ws/events", get(ws_handlers::ws_events))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
