//! Notes module
//!
//! The note model, the shared search predicate and the manager that fronts
//! the bound note store.

pub mod manager;
pub mod models;
pub mod search;

pub use manager::NoteManager;
pub use models::*;
pub use search::{filter_note_refs, filter_notes, matches_term};
