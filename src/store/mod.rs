//! Note storage backends
//!
//! [`NoteStore`] is the single abstraction over the note collection. It is
//! implemented by [`ConvexNoteStore`] (remote deployment over HTTP) and
//! [`MockNoteStore`] (in-memory, seeded with example notes). The backend is
//! chosen once at startup by [`open_note_store`].

pub mod convex;
pub mod mock;
pub mod selector;
pub mod traits;

pub use convex::{ConvexNoteStore, RemoteFunctions, RemoteOperation};
pub use mock::MockNoteStore;
pub use selector::{
    open_note_store, select_backend, BackendSelection, RemoteConfig, Unconfigured,
    PLACEHOLDER_REMOTE_URL,
};
pub use traits::{BackendKind, NoteStore, StoreError, StoreResult};
