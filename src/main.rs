//! Note Taking App - Main Server

use anyhow::Result;
use clap::{Parser, Subcommand};
use note_taking_app::{store, AppState, Config};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "notes-server")]
#[command(about = "Note Taking App Server")]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, global = true, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides config.yaml and SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print which note backend would be selected, without starting
    Backend,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,note_taking_app=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_yaml_and_env(Some(&cli.config))?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server_port = port;
            }
            let state = AppState::new(config)?;
            note_taking_app::start_server(state).await
        }
        Commands::Backend => {
            match store::select_backend(&config.remote) {
                store::BackendSelection::Remote { url } => println!("remote ({})", url),
                store::BackendSelection::Mock(reason) => println!("mock ({})", reason),
            }
            Ok(())
        }
    }
}
