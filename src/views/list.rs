//! Note list with client-side search and selection

use crate::notes::{filter_note_refs, CreateNoteRequest, Note, NoteId};
use crate::store::{NoteStore, StoreResult};

/// Title given to notes created from the list
pub const NEW_NOTE_TITLE: &str = "Untitled Note";

/// Title for display: "Untitled" when empty
pub fn display_title(note: &Note) -> &str {
    if note.title.is_empty() {
        "Untitled"
    } else {
        &note.title
    }
}

/// Short body preview for list rows: first two lines, "Empty note" when empty
pub fn snippet(note: &Note) -> String {
    if note.content.is_empty() {
        return "Empty note".to_string();
    }
    note.content.lines().take(2).collect::<Vec<_>>().join("\n")
}

/// The note list panel state.
///
/// Holds a transient copy of the collection. [`refresh`](Self::refresh)
/// replaces it wholesale with what the store returned.
#[derive(Debug, Default)]
pub struct NoteListView {
    notes: Vec<Note>,
    search_term: String,
    selected: Option<NoteId>,
}

impl NoteListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held collection
    pub fn refresh(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Reload the collection from the store
    pub async fn reload(&mut self, store: &dyn NoteStore) -> StoreResult<()> {
        self.notes = store.list().await?;
        Ok(())
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Notes matching the current search term, in collection order
    pub fn visible(&self) -> Vec<&Note> {
        filter_note_refs(&self.notes, &self.search_term)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn select(&mut self, id: NoteId) {
        self.selected = Some(id);
    }

    pub fn selected_id(&self) -> Option<&NoteId> {
        self.selected.as_ref()
    }

    /// The selected note, if it is still in the collection
    pub fn selected(&self) -> Option<&Note> {
        let id = self.selected.as_ref()?;
        self.notes.iter().find(|n| &n.id == id)
    }

    /// Create an "Untitled Note", reload and select it
    pub async fn create_note(&mut self, store: &dyn NoteStore) -> StoreResult<NoteId> {
        let id = store
            .create(CreateNoteRequest::new(NEW_NOTE_TITLE, "").with_tags(Vec::<String>::new()))
            .await?;
        self.reload(store).await?;
        self.selected = Some(id.clone());
        Ok(id)
    }

    /// Delete a note, dropping the selection if it pointed at it
    pub async fn delete_note(&mut self, store: &dyn NoteStore, id: &NoteId) -> StoreResult<()> {
        store.delete(id).await?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.reload(store).await
    }
}
