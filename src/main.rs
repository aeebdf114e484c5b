use std::sync::Arc;

use anyhow::Context;
use chat_search::api::{AppState, create_router};
use chat_search::config::CONFIG;
use chat_search::search::WebSearch;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about = "Chat assistant backend with web search augmentation")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the chat API and the static UI
    Serve {
        /// Address to bind, overrides BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run one web search and print the response as JSON
    Search { query: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| CONFIG.bind_addr.clone());
            serve(&bind).await
        }
        Command::Search { query } => {
            let response = WebSearch::from_config().search(&query).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
    }
}

async fn serve(bind: &str) -> anyhow::Result<()> {
    let state = AppState::from_config();
    if state.completion.is_none() {
        log::warn!("OPENAI_API_KEY is not set, /api/chat will answer with an error");
    }
    log::info!("search provider: {}", state.web_search.endpoint());

    let app = create_router(Arc::new(state), &CONFIG.static_dir);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;

    log::info!("listening on http://{bind}");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
