//! Trait abstraction for note storage backends

use crate::notes::{CreateNoteRequest, Note, NoteId, UpdateNoteRequest};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors returned by note store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation addressed a note that does not exist.
    #[error("note not found: {0}")]
    NotFound(NoteId),

    /// The remote note service could not be reached or rejected the call.
    #[error("remote note store failure: {0}")]
    RemoteFailure(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for note store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Which backend a store handle talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Remote,
    Mock,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

/// Trait abstracting the note collection.
///
/// Both the remote client and the in-memory mock implement it with the same
/// observable contract, except for `list` ordering which each implementation
/// documents. Consumers hold an `Arc<dyn NoteStore>` and never branch on the
/// backend.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All live notes, in the backend's documented order
    async fn list(&self) -> StoreResult<Vec<Note>>;

    /// The current note, or `None` if no note has this id
    async fn get(&self, id: &NoteId) -> StoreResult<Option<Note>>;

    /// Store a new note and return its freshly allocated id
    async fn create(&self, request: CreateNoteRequest) -> StoreResult<NoteId>;

    /// Apply the present fields and bump `updated_at`.
    ///
    /// Returns `StoreError::NotFound` if the note does not exist.
    async fn update(&self, id: &NoteId, update: UpdateNoteRequest) -> StoreResult<()>;

    /// Remove the note permanently.
    ///
    /// Returns `StoreError::NotFound` if the note does not exist.
    async fn delete(&self, id: &NoteId) -> StoreResult<()>;

    /// Case-insensitive substring search over title and content, in `list` order
    async fn search(&self, term: &str) -> StoreResult<Vec<Note>>;

    /// Whether the backend is reachable
    async fn health_check(&self) -> StoreResult<bool>;

    fn backend_kind(&self) -> BackendKind;
}
