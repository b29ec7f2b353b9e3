//! API handlers for the AI assistant

use super::handlers::{AppError, NotesState};
use crate::assistant::{AssistantTool, QuickAction, ToolOutput, Transcript, ASSISTANT_NAME};
use crate::notes::NoteId;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

/// A chat turn. `action` takes precedence over `message`.
#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub message: Option<String>,
    pub action: Option<QuickAction>,
    #[serde(default)]
    pub transcript: Transcript,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub transcript: Transcript,
}

#[derive(Debug, Deserialize, Default)]
pub struct ToolRequest {
    pub content: Option<String>,
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub id: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    pub assistant: &'static str,
    pub tools: Vec<ToolInfo>,
}

/// Describe the assistant and its tools
pub async fn list_tools() -> Json<ToolListResponse> {
    Json(ToolListResponse {
        assistant: ASSISTANT_NAME,
        tools: AssistantTool::ALL
            .into_iter()
            .map(|tool| ToolInfo {
                id: tool.id(),
                description: tool.description(),
            })
            .collect(),
    })
}

/// Continue the assistant conversation about one note
pub async fn ask_assistant(
    State(state): State<NotesState>,
    Path(id): Path<String>,
    Json(body): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, AppError> {
    let id = NoteId::new(id);
    let note = state
        .notes
        .get_note(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Note not found: {}", id)))?;

    let mut transcript = body.transcript;
    match (body.action, body.message) {
        (Some(action), _) => {
            state
                .assistant
                .quick_action(&mut transcript, action, &note.content)
                .await
        }
        (None, Some(message)) => {
            state
                .assistant
                .send(&mut transcript, &message, &note.content)
                .await;
        }
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either message or action is required".into(),
            ))
        }
    }

    Ok(Json(AssistantResponse { transcript }))
}

/// Run one of the assistant tools
pub async fn run_tool(
    State(state): State<NotesState>,
    Path(tool): Path<String>,
    Json(body): Json<ToolRequest>,
) -> Result<Json<ToolOutput>, AppError> {
    let tool: AssistantTool = tool
        .parse()
        .map_err(|e: anyhow::Error| AppError::NotFound(e.to_string()))?;

    let input = match tool {
        AssistantTool::GenerateIdeas => body.topic.or(body.content),
        _ => body.content.or(body.topic),
    }
    .ok_or_else(|| AppError::BadRequest(format!("{} requires content or topic", tool)))?;

    let output = state
        .assistant
        .run_tool(tool, &input)
        .await
        .map_err(|e| AppError::RemoteFailure(format!("{} failed: {}", tool, e)))?;

    Ok(Json(output))
}
