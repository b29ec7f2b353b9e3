//! AI assistant
//!
//! - `LanguageModel`: text-generation backend (Gemini, simulated, mock)
//! - `NoteAssistant`: chat transcript, quick actions and the three note tools

pub mod agent;
pub mod gemini;
pub mod mock;
pub mod simulated;
pub mod traits;

pub use agent::{
    AssistantTool, ChatMessage, NoteAssistant, QuickAction, Role, ToolOutput, Transcript,
    ASSISTANT_NAME, ERROR_REPLY, NOTE_ASSISTANT_INSTRUCTIONS,
};
pub use gemini::GeminiModel;
pub use mock::MockLanguageModel;
pub use simulated::SimulatedModel;
pub use traits::LanguageModel;

use std::sync::Arc;
use std::time::Duration;

/// Assistant settings resolved from config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub simulated_delay_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: gemini::DEFAULT_MODEL.into(),
            base_url: gemini::DEFAULT_BASE_URL.into(),
            simulated_delay_ms: 1000,
        }
    }
}

/// Gemini when an API key is configured, the simulated model otherwise
pub fn build_language_model(config: &AssistantConfig) -> anyhow::Result<Arc<dyn LanguageModel>> {
    match config.api_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => {
            tracing::info!(model = %config.model, "AI assistant using Gemini");
            Ok(Arc::new(GeminiModel::new(&config.base_url, &config.model, key)?))
        }
        None => {
            tracing::info!("No Gemini API key configured, AI assistant replies are simulated");
            Ok(Arc::new(SimulatedModel::with_delay(Duration::from_millis(
                config.simulated_delay_ms,
            ))))
        }
    }
}
