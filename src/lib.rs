//! Note Taking App
//!
//! A note service with:
//! - A note store bound at startup to a remote deployment or an in-memory mock
//! - Client-side case-insensitive search
//! - Markdown preview of note bodies
//! - An AI assistant for improving, summarizing and brainstorming on notes
//! - Real-time change events over WebSocket

pub mod api;
pub mod assistant;
pub mod events;
pub mod notes;
pub mod store;
pub mod views;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::Result;
use assistant::{AssistantConfig, NoteAssistant};
use events::EventBus;
use notes::NoteManager;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use store::{RemoteConfig, RemoteFunctions};

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    pub remote: RemoteYamlConfig,
    pub assistant: AssistantYamlConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub port: u16,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Remote note store section. No `url` means the mock store is used.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RemoteYamlConfig {
    pub url: Option<String>,
    pub functions: RemoteFunctions,
}

/// AI assistant section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantYamlConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub simulated_delay_ms: u64,
}

impl Default for AssistantYamlConfig {
    fn default() -> Self {
        let defaults = AssistantConfig::default();
        Self {
            api_key: defaults.api_key,
            model: defaults.model,
            base_url: defaults.base_url,
            simulated_delay_ms: defaults.simulated_delay_ms,
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server_port: u16,
    pub remote: RemoteConfig,
    pub assistant: AssistantConfig,
}

/// First of `names` that is set to a non-empty value
fn env_value(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from a YAML file with env var overrides.
    ///
    /// Priority: env var > YAML value > default.
    /// `yaml_path` defaults to `config.yaml` in the working directory; a
    /// missing or unparsable file falls back to defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        Ok(Self {
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(yaml.server.port),
            remote: RemoteConfig {
                url: env_value(&["CONVEX_URL", "VITE_CONVEX_URL"]).or(yaml.remote.url),
                functions: yaml.remote.functions,
            },
            assistant: AssistantConfig {
                api_key: env_value(&["GEMINI_API_KEY", "GOOGLE_GENERATIVE_AI_API_KEY"])
                    .or(yaml.assistant.api_key),
                model: env_value(&["ASSISTANT_MODEL"]).unwrap_or(yaml.assistant.model),
                base_url: env_value(&["ASSISTANT_BASE_URL"]).unwrap_or(yaml.assistant.base_url),
                simulated_delay_ms: yaml.assistant.simulated_delay_ms,
            },
        })
    }

    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

// ============================================================================
// Application state
// ============================================================================

/// Long-lived services, built once at startup and passed explicitly
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<NoteManager>,
    pub assistant: Arc<NoteAssistant>,
    pub event_bus: Arc<EventBus>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Select the note backend, build the assistant model and wire the event bus
    pub fn new(config: Config) -> Result<Self> {
        let store = store::open_note_store(&config.remote)?;
        let model = assistant::build_language_model(&config.assistant)?;
        let event_bus = Arc::new(EventBus::default());

        Ok(Self {
            notes: Arc::new(NoteManager::with_event_emitter(store, event_bus.clone())),
            assistant: Arc::new(NoteAssistant::new(model)),
            event_bus,
            config: Arc::new(config),
        })
    }

    pub fn server_state(&self) -> api::NotesState {
        Arc::new(api::ServerState {
            notes: self.notes.clone(),
            assistant: self.assistant.clone(),
            event_bus: self.event_bus.clone(),
        })
    }
}

/// Serve the HTTP API until Ctrl+C
pub async fn start_server(state: AppState) -> Result<()> {
    let port = state.config.server_port;
    let app = api::create_router(state.server_state());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(
        port = port,
        backend = %state.notes.backend_kind(),
        model = %state.assistant.model_name(),
        "Note server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
