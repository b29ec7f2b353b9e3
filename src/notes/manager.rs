//! Note Manager - CRUD operations over the bound note store
//!
//! Wraps the `NoteStore` handle chosen at startup, logs every mutation and
//! emits a `NoteEvent` after each successful one.

use super::models::*;
use crate::events::EventEmitter;
use crate::store::{BackendKind, NoteStore, StoreResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Manager for note operations
pub struct NoteManager {
    store: Arc<dyn NoteStore>,
    event_emitter: Option<Arc<dyn EventEmitter>>,
}

impl NoteManager {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            store,
            event_emitter: None,
        }
    }

    /// Create a new NoteManager with an event emitter
    pub fn with_event_emitter(store: Arc<dyn NoteStore>, emitter: Arc<dyn EventEmitter>) -> Self {
        Self {
            store,
            event_emitter: Some(emitter),
        }
    }

    /// The underlying store handle
    pub fn store(&self) -> &Arc<dyn NoteStore> {
        &self.store
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.store.backend_kind()
    }

    fn emitter(&self) -> Option<&dyn EventEmitter> {
        self.event_emitter.as_deref()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub async fn list_notes(&self) -> StoreResult<Vec<Note>> {
        self.store.list().await
    }

    pub async fn get_note(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        self.store.get(id).await
    }

    pub async fn search_notes(&self, term: &str) -> StoreResult<Vec<Note>> {
        let notes = self.store.search(term).await?;
        tracing::debug!(term = %term, hits = notes.len(), "Searched notes");
        Ok(notes)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub async fn create_note(&self, request: CreateNoteRequest) -> StoreResult<NoteId> {
        let title = request.title.clone();
        let id = self.store.create(request).await?;

        tracing::info!(note_id = %id, title = %title, "Created note");
        if let Some(emitter) = self.emitter() {
            emitter.emit_created(&id, json!({ "title": title }));
        }

        Ok(id)
    }

    pub async fn update_note(&self, id: &NoteId, update: UpdateNoteRequest) -> StoreResult<()> {
        let payload = serde_json::to_value(&update).unwrap_or_default();
        self.store.update(id, update).await?;

        tracing::debug!(note_id = %id, "Updated note");
        if let Some(emitter) = self.emitter() {
            emitter.emit_updated(id, payload);
        }

        Ok(())
    }

    pub async fn delete_note(&self, id: &NoteId) -> StoreResult<()> {
        self.store.delete(id).await?;

        tracing::info!(note_id = %id, "Deleted note");
        if let Some(emitter) = self.emitter() {
            emitter.emit_deleted(id);
        }

        Ok(())
    }
}

/// The manager is itself a store, so views can write through it and still
/// trigger change events.
#[async_trait]
impl NoteStore for NoteManager {
    async fn list(&self) -> StoreResult<Vec<Note>> {
        self.list_notes().await
    }

    async fn get(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        self.get_note(id).await
    }

    async fn create(&self, request: CreateNoteRequest) -> StoreResult<NoteId> {
        self.create_note(request).await
    }

    async fn update(&self, id: &NoteId, update: UpdateNoteRequest) -> StoreResult<()> {
        self.update_note(id, update).await
    }

    async fn delete(&self, id: &NoteId) -> StoreResult<()> {
        self.delete_note(id).await
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Note>> {
        self.search_notes(term).await
    }

    async fn health_check(&self) -> StoreResult<bool> {
        self.store.health_check().await
    }

    fn backend_kind(&self) -> BackendKind {
        self.store.backend_kind()
    }
}
