//! HTTP API for the note service

pub mod assistant_handlers;
pub mod handlers;
pub mod note_handlers;
pub mod routes;
pub mod ws_handlers;

pub use handlers::{AppError, NotesState, ServerState};
pub use routes::create_router;
