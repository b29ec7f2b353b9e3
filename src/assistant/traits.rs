//! LanguageModel trait definition
//!
//! Async trait + Send + Sync, shared as `Arc<dyn LanguageModel>`.

use anyhow::Result;
use async_trait::async_trait;

/// Abstract interface for a text-generation model.
///
/// # Implementations
///
/// - [`GeminiModel`](super::GeminiModel): Google Generative Language API
/// - [`SimulatedModel`](super::SimulatedModel): offline canned replies, used
///   when no API key is configured
/// - [`MockLanguageModel`](super::MockLanguageModel): scripted replies for tests
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a reply to `prompt` under the `system` instructions.
    ///
    /// # Errors
    ///
    /// Network failures, API errors and empty completions.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String>;

    /// The model name, for logging and `/health`
    fn model_name(&self) -> &str;
}
