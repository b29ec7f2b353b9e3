//! Offline model used when no API key is configured

use super::traits::LanguageModel;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Replies with a fixed notice quoting the request line of the prompt
/// (its first non-empty line), after a short delay.
#[derive(Debug, Clone)]
pub struct SimulatedModel {
    delay: Duration,
}

impl SimulatedModel {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn reply_for(prompt: &str) -> String {
        let request = prompt
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default();
        format!(
            "I understand you want help with: \"{}\". This is a simulated response. \
             To enable full AI capabilities, configure your Gemini API key in the environment variables.",
            request
        )
    }
}

impl Default for SimulatedModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageModel for SimulatedModel {
    async fn generate(&self, _system: &str, prompt: &str) -> Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::reply_for(prompt))
    }

    fn model_name(&self) -> &str {
        "simulated"
    }
}
