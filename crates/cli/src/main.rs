use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gemini_client::{GeminiClient, GeminiClientError};
use recommender::{run_once, run_structured, RunnerConfig, StructuredFormat};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use watchlist::Watchlist;

/// watchlist-recs - Movie recommendations from a watchlist
#[derive(Parser)]
#[command(name = "watchlist-recs")]
#[command(about = "Ask Gemini for movies similar to a watchlist", long_about = None)]
struct Cli {
    /// Environment file to load before reading GEMINI_API_KEY (default: .env)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Model identifier, overrides GEMINI_MODEL
    #[arg(long)]
    model: Option<String>,

    /// JSON file with an array of watchlist entries (built-in list if omitted)
    #[arg(long)]
    watchlist: Option<PathBuf>,

    /// How to ask for and print recommendations
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Free-form text, printed as the model wrote it
    Text,
    /// Parsed recommendations as a numbered list
    List,
    /// Parsed recommendations as JSON on stdout
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load the env file first so RUST_LOG from it applies
    let env_loaded = match &cli.env_file {
        Some(path) => dotenvy::from_path(path).map(|_| path.clone()),
        None => dotenvy::dotenv(),
    };

    // Initialize tracing; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match env_loaded {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if cli.env_file.is_some() => warn!("Could not load env file: {}", e),
        Err(_) => debug!("No .env file found, using process environment"),
    }

    let watchlist = match &cli.watchlist {
        Some(path) => Watchlist::load_from_file(path)
            .with_context(|| format!("Failed to load watchlist from {}", path.display()))?,
        None => Watchlist::default(),
    };

    let config = RunnerConfig::from_env().map(|config| match cli.model.clone() {
        Some(model) => config.with_model(model),
        None => config,
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Dispatch to appropriate format handler
    let status = match cli.format {
        Format::Text => run_once(config, watchlist, connect, &mut out).await,
        Format::List => {
            let mut status_out = io::stderr();
            run_structured(config, watchlist, connect, StructuredFormat::List, &mut out, &mut status_out)
                .await
        }
        Format::Json => {
            let mut status_out = io::stderr();
            run_structured(config, watchlist, connect, StructuredFormat::Json, &mut out, &mut status_out)
                .await
        }
    }
    .context("Failed to write report")?;
    out.flush().context("Failed to flush stdout")?;

    info!("Finished with status {:?} (exit code {})", status, status.code());
    Ok(status.into())
}

fn connect(config: &RunnerConfig) -> Result<GeminiClient, GeminiClientError> {
    GeminiClient::new(config.api_key(), config.base_url())
}
