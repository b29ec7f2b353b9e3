//! Single-note editor bound to the note store

use super::markdown;
use crate::notes::{Note, NoteId, UpdateNoteRequest};
use crate::store::{NoteStore, StoreResult};

/// Editor state for one note.
///
/// Every `set_title`/`set_content` call writes the local buffer and pushes an
/// update carrying only that field. There is no debouncing.
#[derive(Debug, Clone)]
pub struct NoteEditor {
    note_id: NoteId,
    title: String,
    content: String,
    preview: bool,
}

impl NoteEditor {
    pub fn open(note: &Note) -> Self {
        Self {
            note_id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            preview: false,
        }
    }

    pub fn note_id(&self) -> &NoteId {
        &self.note_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub async fn set_title(&mut self, store: &dyn NoteStore, title: impl Into<String>) -> StoreResult<()> {
        self.title = title.into();
        store
            .update(&self.note_id, UpdateNoteRequest::title(self.title.clone()))
            .await
    }

    pub async fn set_content(
        &mut self,
        store: &dyn NoteStore,
        content: impl Into<String>,
    ) -> StoreResult<()> {
        self.content = content.into();
        store
            .update(&self.note_id, UpdateNoteRequest::content(self.content.clone()))
            .await
    }

    /// Replace the buffer with the store's copy. Unsent local state is lost.
    pub fn reconcile(&mut self, note: &Note) {
        self.note_id = note.id.clone();
        self.title = note.title.clone();
        self.content = note.content.clone();
    }

    /// Flip between edit and preview mode, returning the new mode
    pub fn toggle_preview(&mut self) -> bool {
        self.preview = !self.preview;
        self.preview
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    pub fn preview_html(&self) -> String {
        markdown::preview_html(&self.content)
    }
}
