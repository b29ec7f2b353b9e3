//! Scripted language model for tests

use super::traits::LanguageModel;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// Returns a fixed reply (or fails) and records every prompt it receives.
#[derive(Debug, Default)]
pub struct MockLanguageModel {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockLanguageModel {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A model whose every call fails
    pub fn failing() -> Self {
        Self::default()
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn generate(&self, _system: &str, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => anyhow::bail!("mock language model failure"),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
