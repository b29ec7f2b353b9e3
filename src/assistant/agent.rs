//! The note assistant agent: chat transcript, quick actions and tools
//!
//! The assistant only reads note content. Replies land in the transcript or
//! are returned to the caller; nothing is written back to the note store.

use super::traits::LanguageModel;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Agent display name
pub const ASSISTANT_NAME: &str = "Note Assistant";

/// System instructions given to the model on every call
pub const NOTE_ASSISTANT_INSTRUCTIONS: &str = "\
You are a helpful AI assistant for a note-taking app inspired by Obsidian and Notion.
You help users:
- Improve and expand their notes
- Generate summaries
- Suggest connections between notes
- Format content in markdown
- Brainstorm ideas

Always provide helpful, concise, and well-formatted responses.";

/// Transcript entry appended when the model call fails
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

// ============================================================================
// Transcript
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered chat history of one assistant panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<ChatMessage>);

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.0.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.0
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// Quick actions & tools
// ============================================================================

/// One-click prompts offered next to the chat input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickAction {
    Improve,
    Summarize,
    Ideas,
}

impl QuickAction {
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Improve => "Please improve and expand this note",
            Self::Summarize => "Please provide a concise summary of this note",
            Self::Ideas => "Please generate related ideas based on this note",
        }
    }
}

impl FromStr for QuickAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "improve" => Ok(Self::Improve),
            "summarize" => Ok(Self::Summarize),
            "ideas" => Ok(Self::Ideas),
            _ => anyhow::bail!("Unknown quick action: {} (expected improve, summarize or ideas)", s),
        }
    }
}

/// Single-shot tools exposed by the assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantTool {
    ImproveNote,
    SummarizeNote,
    GenerateIdeas,
}

impl AssistantTool {
    pub const ALL: [AssistantTool; 3] =
        [Self::ImproveNote, Self::SummarizeNote, Self::GenerateIdeas];

    pub fn id(self) -> &'static str {
        match self {
            Self::ImproveNote => "improve-note",
            Self::SummarizeNote => "summarize-note",
            Self::GenerateIdeas => "generate-ideas",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ImproveNote => "Improve the content and structure of a note",
            Self::SummarizeNote => "Create a concise summary of note content",
            Self::GenerateIdeas => "Generate ideas based on a topic or existing note",
        }
    }

    fn prompt(self, input: &str) -> String {
        match self {
            Self::ImproveNote => format!(
                "Please improve this note content while maintaining its core message:\n\n{}",
                input
            ),
            Self::SummarizeNote => {
                format!("Please provide a concise summary of this note:\n\n{}", input)
            }
            Self::GenerateIdeas => format!("Generate 5 interesting ideas related to: {}", input),
        }
    }
}

impl fmt::Display for AssistantTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AssistantTool {
    type Err = anyhow::Error;

    /// Accepts the tool id (`improve-note`) or its snake_case form
    fn from_str(s: &str) -> Result<Self> {
        match s.replace('_', "-").as_str() {
            "improve-note" => Ok(Self::ImproveNote),
            "summarize-note" => Ok(Self::SummarizeNote),
            "generate-ideas" => Ok(Self::GenerateIdeas),
            _ => anyhow::bail!("Unknown assistant tool: {}", s),
        }
    }
}

/// Tool result, keyed the way clients expect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Improved {
        #[serde(rename = "improvedContent")]
        improved_content: String,
    },
    Summary {
        summary: String,
    },
    Ideas {
        ideas: String,
    },
}

impl ToolOutput {
    pub fn text(&self) -> &str {
        match self {
            Self::Improved { improved_content } => improved_content,
            Self::Summary { summary } => summary,
            Self::Ideas { ideas } => ideas,
        }
    }
}

// ============================================================================
// Agent
// ============================================================================

/// Chat and tool front-end over a [`LanguageModel`]
pub struct NoteAssistant {
    model: Arc<dyn LanguageModel>,
}

impl NoteAssistant {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    fn chat_prompt(message: &str, note_content: &str) -> String {
        if note_content.is_empty() {
            message.to_string()
        } else {
            format!("{}\n\nCurrent note content:\n{}", message, note_content)
        }
    }

    /// Send a chat message about a note.
    ///
    /// Blank messages are ignored and return `false`. Otherwise the user
    /// message and then the reply (or [`ERROR_REPLY`]) are appended.
    pub async fn send(&self, transcript: &mut Transcript, message: &str, note_content: &str) -> bool {
        if message.trim().is_empty() {
            return false;
        }

        transcript.push(ChatMessage::user(message));
        let prompt = Self::chat_prompt(message, note_content);

        let reply = match self.model.generate(NOTE_ASSISTANT_INSTRUCTIONS, &prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, model = %self.model_name(), "Assistant reply failed");
                ERROR_REPLY.to_string()
            }
        };
        transcript.push(ChatMessage::assistant(reply));
        true
    }

    /// Send the canned prompt of a quick action as a chat message
    pub async fn quick_action(&self, transcript: &mut Transcript, action: QuickAction, note_content: &str) {
        self.send(transcript, action.prompt(), note_content).await;
    }

    /// Run a tool on `input` (note content, or a topic for `GenerateIdeas`)
    pub async fn run_tool(&self, tool: AssistantTool, input: &str) -> Result<ToolOutput> {
        let text = self
            .model
            .generate(NOTE_ASSISTANT_INSTRUCTIONS, &tool.prompt(input))
            .await?;
        tracing::debug!(tool = %tool, chars = text.len(), "Assistant tool completed");

        Ok(match tool {
            AssistantTool::ImproveNote => ToolOutput::Improved {
                improved_content: text,
            },
            AssistantTool::SummarizeNote => ToolOutput::Summary { summary: text },
            AssistantTool::GenerateIdeas => ToolOutput::Ideas { ideas: text },
        })
    }

    pub async fn improve_note(&self, content: &str) -> Result<String> {
        let output = self.run_tool(AssistantTool::ImproveNote, content).await?;
        Ok(output.text().to_string())
    }

    pub async fn summarize_note(&self, content: &str) -> Result<String> {
        let output = self.run_tool(AssistantTool::SummarizeNote, content).await?;
        Ok(output.text().to_string())
    }

    pub async fn generate_ideas(&self, topic: &str) -> Result<String> {
        let output = self.run_tool(AssistantTool::GenerateIdeas, topic).await?;
        Ok(output.text().to_string())
    }
}
