//! HTTP client for a Convex deployment exposing the notes functions
//!
//! Functions are invoked through the public HTTP API:
//! `POST {url}/api/query` and `POST {url}/api/mutation` with a
//! `{"path", "args", "format"}` body.

use super::traits::{BackendKind, NoteStore, StoreError, StoreResult};
use crate::notes::{CreateNoteRequest, Note, NoteId, UpdateNoteRequest};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// An operation the remote deployment is expected to expose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
    ListNotes,
    GetNote,
    CreateNote,
    UpdateNote,
    DeleteNote,
    SearchNotes,
}

/// Function paths (`module:function`) of the remote notes API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemoteFunctions {
    pub list_notes: String,
    pub get_note: String,
    pub create_note: String,
    pub update_note: String,
    pub delete_note: String,
    pub search_notes: String,
}

impl Default for RemoteFunctions {
    fn default() -> Self {
        Self {
            list_notes: "notes:getNotes".into(),
            get_note: "notes:getNote".into(),
            create_note: "notes:createNote".into(),
            update_note: "notes:updateNote".into(),
            delete_note: "notes:deleteNote".into(),
            search_notes: "notes:searchNotes".into(),
        }
    }
}

impl RemoteFunctions {
    pub fn path(&self, op: RemoteOperation) -> &str {
        match op {
            RemoteOperation::ListNotes => &self.list_notes,
            RemoteOperation::GetNote => &self.get_note,
            RemoteOperation::CreateNote => &self.create_note,
            RemoteOperation::UpdateNote => &self.update_note,
            RemoteOperation::DeleteNote => &self.delete_note,
            RemoteOperation::SearchNotes => &self.search_notes,
        }
    }

    /// Whether `op` is mapped to a well-formed `module:function` path.
    ///
    /// Pure inspection of the configured API surface, no network call.
    pub fn exposes(&self, op: RemoteOperation) -> bool {
        match self.path(op).trim().split_once(':') {
            Some((module, function)) => !module.is_empty() && !function.is_empty(),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum CallKind {
    Query,
    Mutation,
}

impl CallKind {
    fn endpoint(self) -> &'static str {
        match self {
            Self::Query => "api/query",
            Self::Mutation => "api/mutation",
        }
    }
}

#[derive(Debug, Serialize)]
struct FunctionCall<'a> {
    path: &'a str,
    args: Value,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum FunctionResponse {
    Success {
        #[serde(default)]
        value: Value,
    },
    Error {
        #[serde(default, rename = "errorMessage")]
        error_message: String,
    },
}

/// Whether a function error means the addressed document does not exist
/// (or the id could never name one). Validator failures count only when
/// they point at the `id` argument.
fn is_missing_document(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("nonexistent document")
        || message.contains("invalid id")
        || (message.contains("does not match validator") && message.contains("path: .id"))
}

/// Remote implementation of [`NoteStore`].
///
/// Ordering: `list` and `search` both return notes by descending
/// `updated_at`, whatever order the deployment answers in. Matching is done
/// by the deployment's search function.
pub struct ConvexNoteStore {
    client: reqwest::Client,
    base_url: String,
    functions: RemoteFunctions,
}

impl ConvexNoteStore {
    pub fn new(base_url: &str, functions: RemoteFunctions) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client for the remote note store")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            functions,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call(&self, kind: CallKind, op: RemoteOperation, args: Value) -> StoreResult<Value> {
        let path = self.functions.path(op);
        let url = format!("{}/{}", self.base_url, kind.endpoint());
        let body = FunctionCall {
            path,
            args,
            format: "json",
        };

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            StoreError::RemoteFailure(format!("Failed to reach {}: {}", url, e))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            StoreError::RemoteFailure(format!("Failed to read response from {}: {}", url, e))
        })?;

        match serde_json::from_str::<FunctionResponse>(&text) {
            Ok(FunctionResponse::Success { value }) => Ok(value),
            Ok(FunctionResponse::Error { error_message }) => {
                tracing::debug!(function = %path, error = %error_message, "Remote function failed");
                Err(StoreError::RemoteFailure(error_message))
            }
            Err(e) if status.is_success() => Err(StoreError::RemoteFailure(format!(
                "Unexpected response from {}: {}",
                path, e
            ))),
            Err(_) => Err(StoreError::RemoteFailure(format!(
                "{} returned {}: {}",
                path,
                status.as_u16(),
                text
            ))),
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(op: RemoteOperation, value: Value) -> StoreResult<T> {
        serde_json::from_value(value).map_err(|e| {
            StoreError::RemoteFailure(format!("Malformed {:?} result: {}", op, e))
        })
    }

    /// Run a query returning a note collection, newest update first
    async fn query_notes(&self, op: RemoteOperation, args: Value) -> StoreResult<Vec<Note>> {
        let value = self.call(CallKind::Query, op, args).await?;
        let mut notes: Vec<Note> = Self::decode(op, value)?;
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }

    /// Map "document does not exist" function errors to `NotFound`
    fn not_found_for(id: &NoteId, err: StoreError) -> StoreError {
        match err {
            StoreError::RemoteFailure(msg) if is_missing_document(&msg) => {
                StoreError::NotFound(id.clone())
            }
            other => other,
        }
    }
}

#[async_trait]
impl NoteStore for ConvexNoteStore {
    async fn list(&self) -> StoreResult<Vec<Note>> {
        self.query_notes(RemoteOperation::ListNotes, json!({})).await
    }

    async fn get(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        let result = self
            .call(CallKind::Query, RemoteOperation::GetNote, json!({ "id": id }))
            .await;

        match result {
            Ok(Value::Null) => Ok(None),
            Ok(value) => Self::decode(RemoteOperation::GetNote, value).map(Some),
            Err(StoreError::RemoteFailure(msg)) if is_missing_document(&msg) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, request: CreateNoteRequest) -> StoreResult<NoteId> {
        let args = serde_json::to_value(&request)
            .map_err(|e| StoreError::RemoteFailure(format!("Failed to encode note: {}", e)))?;
        let value = self
            .call(CallKind::Mutation, RemoteOperation::CreateNote, args)
            .await?;
        let id: NoteId = Self::decode(RemoteOperation::CreateNote, value)?;
        tracing::debug!(note_id = %id, "Created remote note");
        Ok(id)
    }

    async fn update(&self, id: &NoteId, update: UpdateNoteRequest) -> StoreResult<()> {
        let mut args = serde_json::to_value(&update)
            .map_err(|e| StoreError::RemoteFailure(format!("Failed to encode update: {}", e)))?;
        if let Value::Object(ref mut map) = args {
            map.insert("id".to_string(), Value::String(id.to_string()));
        }

        self.call(CallKind::Mutation, RemoteOperation::UpdateNote, args)
            .await
            .map(|_| ())
            .map_err(|e| Self::not_found_for(id, e))
    }

    async fn delete(&self, id: &NoteId) -> StoreResult<()> {
        self.call(CallKind::Mutation, RemoteOperation::DeleteNote, json!({ "id": id }))
            .await
            .map(|_| ())
            .map_err(|e| Self::not_found_for(id, e))
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Note>> {
        self.query_notes(RemoteOperation::SearchNotes, json!({ "searchTerm": term }))
            .await
    }

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(self.list().await.is_ok())
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::Remote
    }
}
