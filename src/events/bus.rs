//! Event bus for broadcasting note events to WebSocket clients

use super::{EventEmitter, NoteEvent};
use tokio::sync::broadcast;
use tracing::debug;

/// Default broadcast channel capacity
const DEFAULT_CAPACITY: usize = 1024;

/// Event bus that distributes NoteEvents via `tokio::sync::broadcast`
///
/// Fire-and-forget: events emitted while nobody listens are dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<NoteEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NoteEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventEmitter for EventBus {
    fn emit(&self, event: NoteEvent) {
        let action = event.action;
        let note_id = event.note_id.clone();
        if let Ok(n) = self.sender.send(event) {
            debug!(action = ?action, note_id = %note_id, subscribers = n, "NoteEvent emitted");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
