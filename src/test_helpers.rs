//! Test helper factories and mock state builders
#![allow(dead_code)]

use crate::api::NotesState;
use crate::assistant::{AssistantConfig, LanguageModel, MockLanguageModel, NoteAssistant};
use crate::events::EventBus;
use crate::notes::{now_millis, Note, NoteId, NoteManager};
use crate::store::{MockNoteStore, NoteStore, RemoteConfig};
use crate::{AppState, Config};
use std::sync::Arc;

// ============================================================================
// Mock state builders
// ============================================================================

/// AppState over a seeded mock store and a scripted assistant
pub fn mock_app_state() -> AppState {
    mock_app_state_with(
        Arc::new(MockNoteStore::seeded()),
        Arc::new(MockLanguageModel::replying("mock reply")),
    )
}

pub fn mock_app_state_with(store: Arc<dyn NoteStore>, model: Arc<dyn LanguageModel>) -> AppState {
    let event_bus = Arc::new(EventBus::default());
    AppState {
        notes: Arc::new(NoteManager::with_event_emitter(store, event_bus.clone())),
        assistant: Arc::new(NoteAssistant::new(model)),
        event_bus,
        config: Arc::new(Config {
            server_port: 0,
            remote: RemoteConfig::default(),
            assistant: AssistantConfig::default(),
        }),
    }
}

pub fn mock_server_state() -> NotesState {
    mock_app_state().server_state()
}

pub fn mock_server_state_with_model(model: Arc<dyn LanguageModel>) -> NotesState {
    mock_app_state_with(Arc::new(MockNoteStore::seeded()), model).server_state()
}

// ============================================================================
// Factories
// ============================================================================

pub fn test_note(id: &str, title: &str, content: &str) -> Note {
    let now = now_millis();
    Note {
        id: NoteId::new(id),
        creation_time: now,
        title: title.to_string(),
        content: content.to_string(),
        tags: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}
