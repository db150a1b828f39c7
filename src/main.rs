use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use webseek::config::CONFIG;
use webseek::data_models::SearchResult;
use webseek::input::{ConsoleInputHandler, InputHandler};
use webseek::output::OutputHandler;

#[derive(Parser, Debug)]
#[command(name = "webseek", about = "Collect crawl parameters and export search hits as CSV")]
struct Cli {
    /// JSON array of search results to export once parameters are collected
    #[arg(long)]
    results: Option<PathBuf>,

    /// CSV file for all results
    #[arg(long)]
    all_output: Option<PathBuf>,

    /// CSV file for the top results
    #[arg(long)]
    top_output: Option<PathBuf>,

    /// Number of top results to export
    #[arg(long)]
    top_entries: Option<usize>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    // Bridge log crate -> tracing (so log::info! etc. work)
    tracing_log::LogTracer::init()?;

    let config = CONFIG
        .clone()
        .with_overrides(cli.all_output, cli.top_output, cli.top_entries);

    let requests = ConsoleInputHandler::stdin().crawling_parameters();
    if requests.is_empty() {
        log::warn!("no usable crawl parameters were entered");
    }
    for request in &requests {
        println!("{}", serde_json::to_string(request)?);
    }

    if let Some(path) = cli.results {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read results file {}", path.display()))?;
        let results: Vec<SearchResult> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse results file {}", path.display()))?;

        let output = OutputHandler::from_config(&config);
        if let Err(e) = output.print_all_data(&results) {
            log::warn!("{e:#}");
        }
        if let Err(e) = output.print_top_data_to_file(&results) {
            log::warn!("{e:#}");
        }
    }

    Ok(())
}
