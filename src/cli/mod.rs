//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod search;
pub mod serve;
pub mod suggest;

use crate::config::defaults::API_KEY_ENV;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, OutputFormatter};
use crate::geocode::opencage::OpenCageClient;
use crate::source::SearchSource;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// OpenCage search source for map widgets
#[derive(Parser)]
#[command(name = "opencage-search")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// OpenCage API key (overrides geocoder.api_key)
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggestions for partial input, biased to a view center
    Suggest(suggest::SuggestArgs),

    /// Resolve text or a location into framed results
    Search(search::SearchArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let api_key = cli.api_key;

    match cli.command {
        Commands::Suggest(args) => {
            init_logging("warn");
            suggest::run(args, api_key.as_deref()).await
        }
        Commands::Search(args) => {
            init_logging("warn");
            search::run(args, api_key.as_deref()).await
        }
        Commands::Serve(args) => {
            init_logging("info");
            serve::run(args, api_key.as_deref()).await
        }
        Commands::Config(args) => config::run(args),
    }
}

/// Install the tracing subscriber; `RUST_LOG` wins over `default_level`
fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Build an OpenCage-backed search source from config
fn build_source(config: &Config, api_key: Option<&str>) -> Result<SearchSource<OpenCageClient>> {
    let key = config.api_key(api_key)?;
    let client = OpenCageClient::with_options(key, config.geocoder_options())?;
    Ok(SearchSource::new(client, config.source_config()))
}

/// Look up a formatter, listing the valid names on failure
fn formatter(name: &str) -> Result<Box<dyn OutputFormatter>> {
    get_formatter(name).ok_or_else(|| {
        let names: Vec<String> = available_formats().into_iter().map(|f| f.name).collect();
        Error::Config(format!(
            "Unknown format: {} (available: {})",
            name,
            names.join(", ")
        ))
    })
}
