//! Client-side note filtering
//!
//! A linear scan over an already-fetched collection: case-insensitive
//! substring match on title or content. No ranking, no tokenization.

use super::models::Note;

/// True if the lowercased title or content contains the lowercased term.
/// The empty term matches every note.
pub fn matches_term(note: &Note, term: &str) -> bool {
    let needle = term.to_lowercase();
    matches_folded(note, &needle)
}

fn matches_folded(note: &Note, needle: &str) -> bool {
    needle.is_empty()
        || note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
}

/// Keep the notes matching `term`, preserving input order.
pub fn filter_notes(notes: Vec<Note>, term: &str) -> Vec<Note> {
    let needle = term.to_lowercase();
    notes
        .into_iter()
        .filter(|note| matches_folded(note, &needle))
        .collect()
}

/// Borrowing variant of [`filter_notes`] used by the list view.
pub fn filter_note_refs<'a>(notes: &'a [Note], term: &str) -> Vec<&'a Note> {
    let needle = term.to_lowercase();
    notes
        .iter()
        .filter(|note| matches_folded(note, &needle))
        .collect()
}
