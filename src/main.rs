mod cli;
mod server;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use private_journal::config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "private-journal", version, about = "Private journal MCP server for AI agents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (stdio transport unless --http or config says otherwise)
    Serve {
        /// Serve streamable HTTP instead of stdio
        #[arg(long)]
        http: bool,
    },
    /// Manage the embedding model
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },
    /// Regenerate embeddings for entries that are missing them
    Reindex,
    /// Semantic search across both journals
    Search {
        query: String,
        /// Restrict to one journal: project, user or both
        #[arg(long = "type")]
        root: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        /// Only entries on or after this date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        since: Option<String>,
        /// Only entries on or before this date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        until: Option<String>,
    },
    /// List recent entries
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value_t = 30)]
        days: u32,
        /// Restrict to one journal: project, user or both
        #[arg(long = "type")]
        root: Option<String>,
    },
}

#[derive(Subcommand)]
enum ModelAction {
    /// Download the embedding model files
    Download,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::JournalConfig::load()?;

    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { http } => {
            if http || config.server.transport == "http" {
                server::serve_http(config).await?;
            } else {
                server::serve_stdio(config).await?;
            }
        }
        Command::Model { action } => match action {
            ModelAction::Download => {
                cli::model_download(&config.embedding).await?;
            }
        },
        Command::Reindex => cli::reindex::reindex(&config).await?,
        Command::Search {
            query,
            root,
            limit,
            since,
            until,
        } => {
            let range = cli::search::DateRange {
                since: since.as_deref(),
                until: until.as_deref(),
            };
            cli::search::search(&config, &query, root.as_deref(), limit, range).await?;
        }
        Command::Recent { limit, days, root } => {
            cli::recent::recent(&config, limit, days, root.as_deref()).await?;
        }
    }

    Ok(())
}
