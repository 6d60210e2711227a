mod cli;
mod config;
mod engine;
mod enrich;
mod server;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "palace", version, about = "Collective Bitcoin memory analytics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP analytics server
    Serve,
    /// Analyze one memory fragment and print the result as JSON
    Analyze {
        /// Fragment text to analyze
        content: String,
        /// Use-case category (payment, adoption, defi, experience, insight, general)
        #[arg(long, default_value = "general")]
        category: String,
        /// Where the experience happened
        #[arg(long)]
        location: Option<String>,
    },
    /// Answer a question against a fragment set loaded from a JSON file
    Query {
        /// The question to ask the collective memory
        question: String,
        /// Path to a JSON array of fragments
        #[arg(long)]
        fragments: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::PalaceConfig::load()?;

    // Initialize tracing with the configured log level.
    // Log to stderr so stdout stays clean for JSON output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => {
            server::serve(config).await?;
        }
        Command::Analyze { content, category, location } => {
            cli::analyze(&config, &content, &category, location)?;
        }
        Command::Query { question, fragments } => {
            cli::query(&config, &question, fragments.as_deref())?;
        }
    }

    Ok(())
}
