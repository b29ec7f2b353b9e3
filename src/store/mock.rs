//! In-memory note store used when no remote backend is configured.

use super::traits::{BackendKind, NoteStore, StoreError, StoreResult};
use crate::notes::{
    filter_notes, now_millis, stamp_after, CreateNoteRequest, Note, NoteId, UpdateNoteRequest,
};
use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::RwLock;

const WELCOME_CONTENT: &str = r#"# Welcome! 👋

This is a demonstration note showing the markdown capabilities of this app.

## Features

- **Markdown Support**: Write in markdown with live preview
- **AI Assistant**: Get help from Gemini AI (configure API key)
- **Real-time Sync**: Powered by Convex backend
- **Search**: Quickly find your notes

## Try it out!

1. Create a new note
2. Edit this note
3. Try the preview mode
4. Use the AI assistant

```javascript
// You can even add code blocks!
console.log('Hello from Note Taking App!');
```

Happy note-taking! ✨"#;

const MEETING_CONTENT: &str = r#"# Team Meeting - Dec 2, 2025

## Attendees
- Alice
- Bob
- Charlie

## Agenda
1. Project updates
2. Sprint planning
3. Technical discussions

## Action Items
- [ ] Review pull requests
- [ ] Update documentation
- [ ] Schedule next meeting"#;

/// In-memory implementation of [`NoteStore`].
///
/// ```rust
/// use note_taking_app::notes::CreateNoteRequest;
/// use note_taking_app::store::{MockNoteStore, NoteStore};
///
/// # tokio_test::block_on(async {
/// let store = MockNoteStore::seeded();
/// let id = store.create(CreateNoteRequest::new("Draft", "")).await.unwrap();
///
/// // Newest first, ahead of the two seed notes
/// let notes = store.list().await.unwrap();
/// assert_eq!(notes[0].id, id);
/// assert_eq!(notes.len(), 3);
/// # });
/// ```
///
/// Ordering: most-recently-created first. New notes are prepended and
/// updates never move a note. Every access goes through one async `RwLock`;
/// mutations are plain state transitions performed while the write guard is
/// held.
pub struct MockNoteStore {
    state: RwLock<MockState>,
}

struct MockState {
    notes: Vec<Note>,
    /// Millisecond value behind the last generated id
    last_issued: i64,
}

impl MockState {
    /// Allocate an id of the form `note<millis>` that was never handed out before
    fn next_id(&mut self) -> NoteId {
        let mut candidate = now_millis().timestamp_millis().max(self.last_issued + 1);
        loop {
            let id = NoteId::new(format!("note{}", candidate));
            if !self.notes.iter().any(|n| n.id == id) {
                self.last_issued = candidate;
                return id;
            }
            candidate += 1;
        }
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|n| &n.id == id)
    }
}

impl MockNoteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_notes(Vec::new())
    }

    /// Create a store holding `notes` in the given order.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            state: RwLock::new(MockState {
                notes,
                last_issued: 0,
            }),
        }
    }

    /// Create a store holding the two example notes shown on first launch.
    pub fn seeded() -> Self {
        Self::with_notes(seed_notes())
    }
}

impl Default for MockNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The welcome note (one hour old) followed by the meeting note (two hours old)
pub fn seed_notes() -> Vec<Note> {
    let now = now_millis();
    let welcome_at = now - Duration::hours(1);
    let meeting_at = now - Duration::hours(2);

    vec![
        Note {
            id: NoteId::new("note1"),
            creation_time: welcome_at,
            title: "Welcome to Note Taking App".to_string(),
            content: WELCOME_CONTENT.to_string(),
            tags: vec!["welcome".to_string(), "demo".to_string()],
            created_at: welcome_at,
            updated_at: welcome_at,
        },
        Note {
            id: NoteId::new("note2"),
            creation_time: meeting_at,
            title: "Meeting Notes".to_string(),
            content: MEETING_CONTENT.to_string(),
            tags: vec!["meeting".to_string(), "work".to_string()],
            created_at: meeting_at,
            updated_at: meeting_at,
        },
    ]
}

#[async_trait]
impl NoteStore for MockNoteStore {
    async fn list(&self) -> StoreResult<Vec<Note>> {
        Ok(self.state.read().await.notes.clone())
    }

    async fn get(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        let state = self.state.read().await;
        Ok(state.notes.iter().find(|n| &n.id == id).cloned())
    }

    async fn create(&self, request: CreateNoteRequest) -> StoreResult<NoteId> {
        let mut state = self.state.write().await;
        let id = state.next_id();
        let note = Note::from_request(id.clone(), request, now_millis());
        state.notes.insert(0, note);
        Ok(id)
    }

    async fn update(&self, id: &NoteId, update: UpdateNoteRequest) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let index = state
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let note = &mut state.notes[index];
        let stamp = stamp_after(note.updated_at);
        note.apply(update, stamp);
        Ok(())
    }

    async fn delete(&self, id: &NoteId) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let index = state
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        state.notes.remove(index);
        Ok(())
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Note>> {
        let notes = self.list().await?;
        Ok(filter_notes(notes, term))
    }

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(true)
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::Mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(notes: &[Note]) -> Vec<String> {
        notes.iter().map(|n| n.id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let store = MockNoteStore::new();
        let id = store
            .create(CreateNoteRequest::new("Title", "Body").with_tags(["x", "y"]))
            .await
            .unwrap();

        let note = store.get(&id).await.unwrap().expect("note should exist");
        assert_eq!(note.title, "Title");
        assert_eq!(note.content, "Body");
        assert_eq!(note.tags, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[tokio::test]
    async fn test_create_without_tags_defaults_to_empty() {
        let store = MockNoteStore::new();
        let id = store.create(CreateNoteRequest::new("", "")).await.unwrap();
        let note = store.get(&id).await.unwrap().unwrap();
        assert!(note.tags.is_empty());
        assert_eq!(note.title, "");
    }

    #[tokio::test]
    async fn test_partial_update_preserves_other_fields() {
        let store = MockNoteStore::new();
        let id = store
            .create(CreateNoteRequest::new("A", "B").with_tags(["t"]))
            .await
            .unwrap();
        let before = store.get(&id).await.unwrap().unwrap();

        store.update(&id, UpdateNoteRequest::title("C")).await.unwrap();

        let after = store.get(&id).await.unwrap().unwrap();
        assert_eq!(after.title, "C");
        assert_eq!(after.content, "B");
        assert_eq!(after.tags, vec!["t".to_string()]);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn test_empty_update_still_bumps_updated_at() {
        let store = MockNoteStore::new();
        let id = store.create(CreateNoteRequest::new("A", "B")).await.unwrap();
        let before = store.get(&id).await.unwrap().unwrap();

        store.update(&id, UpdateNoteRequest::default()).await.unwrap();

        let after = store.get(&id).await.unwrap().unwrap();
        assert_eq!(after.title, "A");
        assert!(after.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn test_rapid_updates_keep_updated_at_increasing() {
        let store = MockNoteStore::new();
        let id = store.create(CreateNoteRequest::new("A", "")).await.unwrap();
        let mut last = store.get(&id).await.unwrap().unwrap().updated_at;
        for ch in ["h", "he", "hel", "hell", "hello"] {
            store.update(&id, UpdateNoteRequest::content(ch)).await.unwrap();
            let now = store.get(&id).await.unwrap().unwrap().updated_at;
            assert!(now > last);
            last = now;
        }
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let store = MockNoteStore::new();
        let id = store.create(CreateNoteRequest::new("A", "B")).await.unwrap();

        store.delete(&id).await.unwrap();
        assert!(store.get(&id).await.unwrap().is_none());

        let err = store.delete(&id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_nonexistent_id_reports_not_found() {
        let store = MockNoteStore::seeded();
        let missing = NoteId::new("nonexistent-id");

        assert!(store.get(&missing).await.unwrap().is_none());
        assert!(matches!(
            store.update(&missing, UpdateNoteRequest::title("x")).await,
            Err(StoreError::NotFound(ref id)) if id == &missing
        ));
        assert!(store.delete(&missing).await.unwrap_err().is_not_found());
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_is_most_recently_created_first() {
        let store = MockNoteStore::seeded();
        let x = store.create(CreateNoteRequest::new("x", "")).await.unwrap();
        let y = store.create(CreateNoteRequest::new("y", "")).await.unwrap();

        let notes = store.list().await.unwrap();
        assert_eq!(
            ids(&notes),
            vec![y.to_string(), x.to_string(), "note1".into(), "note2".into()]
        );
    }

    #[tokio::test]
    async fn test_update_does_not_reorder() {
        let store = MockNoteStore::seeded();
        store
            .update(&NoteId::new("note2"), UpdateNoteRequest::title("Renamed"))
            .await
            .unwrap();

        let notes = store.list().await.unwrap();
        assert_eq!(ids(&notes), vec!["note1", "note2"]);
        assert!(notes[1].updated_at > notes[0].updated_at);
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_never_reused() {
        let store = MockNoteStore::new();
        let mut seen = std::collections::HashSet::new();
        for i in 0..50 {
            let id = store
                .create(CreateNoteRequest::new(format!("n{}", i), ""))
                .await
                .unwrap();
            assert!(id.as_str().starts_with("note"));
            assert!(seen.insert(id.clone()));
            if i % 2 == 0 {
                store.delete(&id).await.unwrap();
            }
        }
        assert_eq!(seen.len(), 50);
    }

    #[tokio::test]
    async fn test_seeded_contents() {
        let store = MockNoteStore::seeded();
        let notes = store.list().await.unwrap();
        assert_eq!(ids(&notes), vec!["note1", "note2"]);
        assert_eq!(notes[0].title, "Welcome to Note Taking App");
        assert_eq!(notes[0].tags, vec!["welcome".to_string(), "demo".to_string()]);
        assert_eq!(notes[1].title, "Meeting Notes");
        assert_eq!(notes[1].tags, vec!["meeting".to_string(), "work".to_string()]);
        assert!(notes[0].created_at > notes[1].created_at);
        for note in &notes {
            assert_eq!(note.created_at, note.updated_at);
        }
    }

    #[tokio::test]
    async fn test_search_seed_notes() {
        let store = MockNoteStore::seeded();

        let meet = store.search("meet").await.unwrap();
        assert_eq!(ids(&meet), vec!["note2"]);

        let upper = store.search("MEET").await.unwrap();
        assert_eq!(ids(&upper), ids(&meet));

        let all = store.search("").await.unwrap();
        assert_eq!(ids(&all), vec!["note1", "note2"]);

        // search never mutates the collection
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_does_not_match_tags() {
        let store = MockNoteStore::seeded();
        assert!(store.search("work").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backend_kind_and_health() {
        let store = MockNoteStore::default();
        assert_eq!(store.backend_kind(), BackendKind::Mock);
        assert!(store.health_check().await.unwrap());
    }
}
