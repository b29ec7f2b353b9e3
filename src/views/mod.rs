//! Presentation state for browsing and editing notes
//!
//! Views hold transient copies of store data and write back only through a
//! [`NoteStore`](crate::store::NoteStore) handle.

pub mod editor;
pub mod list;
pub mod markdown;

pub use editor::NoteEditor;
pub use list::{display_title, snippet, NoteListView, NEW_NOTE_TITLE};
pub use markdown::{preview_html, render_markdown};
