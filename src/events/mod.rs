//! Note change events for real-time WebSocket notifications
//!
//! - `NoteEvent`: emitted after every successful mutation
//! - `EventBus`: broadcast channel feeding `/ws/events`

mod bus;
mod types;

pub use bus::EventBus;
pub use types::{EventEmitter, NoteAction, NoteEvent};
