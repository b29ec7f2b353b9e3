//! Startup choice between the remote store and the in-memory mock

use super::convex::{ConvexNoteStore, RemoteFunctions, RemoteOperation};
use super::mock::MockNoteStore;
use super::traits::{BackendKind, NoteStore};
use reqwest::Url;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Endpoint written into fresh project templates, never a real deployment
pub const PLACEHOLDER_REMOTE_URL: &str = "http://localhost:3210";

/// Remote backend settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub url: Option<String>,
    pub functions: RemoteFunctions,
}

impl RemoteConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }
}

/// Why the remote backend cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unconfigured {
    #[error("no remote endpoint configured")]
    MissingEndpoint,

    #[error("remote endpoint is the local development placeholder")]
    PlaceholderEndpoint,

    #[error("remote API does not expose a list-notes operation")]
    MissingListOperation,
}

/// Outcome of backend selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendSelection {
    Remote { url: String },
    Mock(Unconfigured),
}

impl BackendSelection {
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Remote { .. } => BackendKind::Remote,
            Self::Mock(_) => BackendKind::Mock,
        }
    }
}

/// Decide which backend to bind. Pure: no I/O, no logging.
pub fn select_backend(config: &RemoteConfig) -> BackendSelection {
    let url = match config.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => return BackendSelection::Mock(Unconfigured::MissingEndpoint),
    };

    if is_placeholder(url) {
        return BackendSelection::Mock(Unconfigured::PlaceholderEndpoint);
    }

    if !config.functions.exposes(RemoteOperation::ListNotes) {
        return BackendSelection::Mock(Unconfigured::MissingListOperation);
    }

    BackendSelection::Remote {
        url: url.to_string(),
    }
}

/// Whether `url` names the placeholder endpoint. Scheme and host compare
/// case-insensitively and an empty path or a lone `/` are equivalent.
fn is_placeholder(url: &str) -> bool {
    let (Ok(candidate), Ok(placeholder)) = (Url::parse(url), Url::parse(PLACEHOLDER_REMOTE_URL))
    else {
        return false;
    };

    candidate.scheme() == placeholder.scheme()
        && candidate.host_str() == placeholder.host_str()
        && candidate.port_or_known_default() == placeholder.port_or_known_default()
        && candidate.path().trim_matches('/').is_empty()
        && candidate.query().is_none()
}

/// Run backend selection and construct the store handle.
///
/// Called once at startup; the returned handle is shared for the process
/// lifetime.
pub fn open_note_store(config: &RemoteConfig) -> anyhow::Result<Arc<dyn NoteStore>> {
    match select_backend(config) {
        BackendSelection::Remote { url } => {
            tracing::info!(url = %url, "Using remote note store");
            let store = ConvexNoteStore::new(&url, config.functions.clone())?;
            Ok(Arc::new(store))
        }
        BackendSelection::Mock(reason) => {
            tracing::warn!(reason = %reason, "Remote note store unavailable, using in-memory mock");
            Ok(Arc::new(MockNoteStore::seeded()))
        }
    }
}
