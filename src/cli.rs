//! Note Taking App - CLI Tool
//!
//! Command-line client for a running `notes-server`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use note_taking_app::assistant::{QuickAction, Transcript};
use note_taking_app::notes::{CreateNoteRequest, Note, NoteId, UpdateNoteRequest};
use note_taking_app::views::{display_title, snippet, NoteListView};
use reqwest::{Client, Response};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "notes")]
#[command(about = "CLI for the Note Taking App")]
struct Cli {
    /// Note server URL
    #[arg(long, env = "NOTES_SERVER_URL", default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes
    List {
        /// Only notes whose title or content contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one note as JSON
    Show { id: String },

    /// Create a note
    Create {
        #[arg(short, long, default_value = "Untitled Note")]
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// Update fields of a note
    Update {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        /// Comma-separated tags, replaces the current ones
        #[arg(long)]
        tags: Option<String>,
    },

    /// Delete a note
    Delete { id: String },

    /// Search notes on the server
    Search { term: String },

    /// Print the rendered Markdown of a note
    Preview { id: String },

    /// Ask the AI assistant about a note
    Ask {
        id: String,

        /// Free-form message
        message: Option<String>,

        /// Quick action: improve, summarize or ideas
        #[arg(short, long)]
        action: Option<QuickAction>,
    },
}

fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Turn an error status into an error carrying the server's message
async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body: Value = resp.json().await.unwrap_or_default();
    let message = body["error"].as_str().unwrap_or("request failed");
    anyhow::bail!("{} ({})", message, status.as_u16())
}

fn print_rows<'a>(notes: impl IntoIterator<Item = &'a Note>) {
    println!("{:<24} {:<30} {}", "ID", "TITLE", "PREVIEW");
    println!("{}", "-".repeat(80));
    for note in notes {
        let preview = snippet(note).replace('\n', " ");
        println!(
            "{:<24} {:<30} {}",
            note.id,
            display_title(note),
            preview.chars().take(40).collect::<String>()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new();
    let server = cli.server.trim_end_matches('/');

    match cli.command {
        Commands::List { search } => {
            let notes: Vec<Note> = check(client.get(format!("{}/api/notes", server)).send().await?)
                .await?
                .json()
                .await?;
            let mut view = NoteListView::new();
            view.refresh(notes);
            if let Some(term) = search {
                view.set_search_term(term);
            }
            let visible = view.visible();
            if visible.is_empty() {
                println!("No notes yet");
            } else {
                print_rows(visible);
            }
        }
        Commands::Show { id } => {
            let note: Value = check(client.get(format!("{}/api/notes/{}", server, id)).send().await?)
                .await?
                .json()
                .await?;
            println!("{}", serde_json::to_string_pretty(&note)?);
        }
        Commands::Create {
            title,
            content,
            tags,
        } => {
            let mut body = CreateNoteRequest::new(title, content);
            if let Some(tags) = tags {
                body = body.with_tags(parse_tags(&tags));
            }
            let resp: Value = check(
                client
                    .post(format!("{}/api/notes", server))
                    .json(&body)
                    .send()
                    .await?,
            )
            .await?
            .json()
            .await?;
            println!("Created note: {}", resp["id"].as_str().unwrap_or("-"));
        }
        Commands::Update {
            id,
            title,
            content,
            tags,
        } => {
            let body = UpdateNoteRequest {
                title,
                content,
                tags: tags.as_deref().map(parse_tags),
            };
            check(
                client
                    .patch(format!("{}/api/notes/{}", server, id))
                    .json(&body)
                    .send()
                    .await?,
            )
            .await?;
            println!("Updated note: {}", NoteId::new(id));
        }
        Commands::Delete { id } => {
            check(client.delete(format!("{}/api/notes/{}", server, id)).send().await?).await?;
            println!("Deleted note: {}", id);
        }
        Commands::Search { term } => {
            let notes: Vec<Note> = check(
                client
                    .get(format!("{}/api/notes/search", server))
                    .query(&[("q", term.as_str())])
                    .send()
                    .await?,
            )
            .await?
            .json()
            .await?;
            print_rows(&notes);
        }
        Commands::Preview { id } => {
            let resp: Value = check(
                client
                    .get(format!("{}/api/notes/{}/preview", server, id))
                    .send()
                    .await?,
            )
            .await?
            .json()
            .await?;
            println!("{}", resp["html"].as_str().unwrap_or_default());
        }
        Commands::Ask {
            id,
            message,
            action,
        } => {
            if message.is_none() && action.is_none() {
                anyhow::bail!("Provide a message or --action");
            }
            let body = serde_json::json!({
                "message": message,
                "action": action,
                "transcript": Transcript::new(),
            });
            let resp: Value = check(
                client
                    .post(format!("{}/api/notes/{}/assistant", server, id))
                    .json(&body)
                    .send()
                    .await?,
            )
            .await?
            .json()
            .await?;
            let transcript: Transcript = serde_json::from_value(resp["transcript"].clone())
                .context("Malformed assistant response")?;
            for msg in transcript.messages() {
                println!("[{:?}] {}\n", msg.role, msg.content);
            }
        }
    }

    Ok(())
}
