//! Note change events

use crate::notes::NoteId;
use serde::{Deserialize, Serialize};

/// The mutation performed on a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteAction {
    Created,
    Updated,
    Deleted,
}

/// Event emitted after a successful note mutation
///
/// Must be Clone for `tokio::sync::broadcast`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteEvent {
    pub action: NoteAction,
    pub note_id: NoteId,
    /// Changed fields, e.g. `{"title": "..."}` for a title edit
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

impl NoteEvent {
    pub fn new(action: NoteAction, note_id: NoteId) -> Self {
        Self {
            action,
            note_id,
            payload: serde_json::Value::Null,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Sink for note events. Emitting never fails and never blocks.
pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: NoteEvent);

    fn emit_created(&self, note_id: &NoteId, payload: serde_json::Value) {
        self.emit(NoteEvent::new(NoteAction::Created, note_id.clone()).with_payload(payload));
    }

    fn emit_updated(&self, note_id: &NoteId, payload: serde_json::Value) {
        self.emit(NoteEvent::new(NoteAction::Updated, note_id.clone()).with_payload(payload));
    }

    fn emit_deleted(&self, note_id: &NoteId) {
        self.emit(NoteEvent::new(NoteAction::Deleted, note_id.clone()));
    }
}
