//! API handlers for notes

use super::handlers::{AppError, NotesState};
use crate::notes::{CreateNoteRequest, Note, NoteId, UpdateNoteRequest};
use crate::views::NoteEditor;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Query parameters & responses
// ============================================================================

#[derive(Debug, Deserialize, Default)]
pub struct NotesListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct NotesSearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoteResponse {
    pub id: NoteId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub html: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// List notes, optionally filtered by `?search=`
pub async fn list_notes(
    State(state): State<NotesState>,
    Query(query): Query<NotesListQuery>,
) -> Result<Json<Vec<Note>>, AppError> {
    let notes = match query.search.as_deref() {
        Some(term) if !term.is_empty() => state.notes.search_notes(term).await?,
        _ => state.notes.list_notes().await?,
    };
    Ok(Json(notes))
}

pub async fn search_notes(
    State(state): State<NotesState>,
    Query(query): Query<NotesSearchQuery>,
) -> Result<Json<Vec<Note>>, AppError> {
    Ok(Json(state.notes.search_notes(&query.q).await?))
}

pub async fn create_note(
    State(state): State<NotesState>,
    Json(body): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<CreateNoteResponse>), AppError> {
    let id = state.notes.create_note(body).await?;
    Ok((StatusCode::CREATED, Json(CreateNoteResponse { id })))
}

pub async fn get_note(
    State(state): State<NotesState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, AppError> {
    let id = NoteId::new(id);
    state
        .notes
        .get_note(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Note not found: {}", id)))
}

pub async fn update_note(
    State(state): State<NotesState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateNoteRequest>,
) -> Result<StatusCode, AppError> {
    state.notes.update_note(&NoteId::new(id), body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_note(
    State(state): State<NotesState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.notes.delete_note(&NoteId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rendered Markdown of the note body
pub async fn preview_note(
    State(state): State<NotesState>,
    Path(id): Path<String>,
) -> Result<Json<PreviewResponse>, AppError> {
    let id = NoteId::new(id);
    let note = state
        .notes
        .get_note(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Note not found: {}", id)))?;

    Ok(Json(PreviewResponse {
        html: NoteEditor::open(&note).preview_html(),
    }))
}
