//! featsel CLI: greedy nearest-neighbor feature selection from the terminal.
//!
//! Loads a whitespace-delimited dataset, runs forward selection or backward
//! elimination scored by leave-one-out 1-NN accuracy, prints progress and
//! writes one CSV row per search step.

mod console;
mod prompt;

use anyhow::Context;
use clap::Parser;
use console::ConsoleReporter;
use featsel_core::{
    CsvSink, Dataset, LeaveOneOut, SearchKind, SelectionConfig, TracingReporter, run_search,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// featsel: forward/backward feature selection for a 1-nearest-neighbor classifier
#[derive(Parser, Debug)]
#[command(name = "featsel", version, about, long_about = None)]
struct Cli {
    /// Dataset file (prompted for if omitted)
    dataset: Option<PathBuf>,

    /// Search algorithm: 1/forward or 2/backward (prompted for if omitted)
    #[arg(short, long, value_parser = parse_search_kind)]
    algorithm: Option<SearchKind>,

    /// Directory for the result CSV (overrides configuration)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the final outcome as JSON
    #[arg(long)]
    json: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress per-candidate output and non-error logs
    #[arg(short, long)]
    quiet: bool,
}

fn parse_search_kind(value: &str) -> Result<SearchKind, String> {
    value.parse().map_err(|e: featsel_core::SelectionError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let workspace = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = featsel_core::load_config(Some(&workspace), cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    if let Some(dir) = &cli.output_dir {
        config.output.dir = dir.clone();
    }

    let _log_guard = init_tracing(&cli, &config);

    println!("Welcome to featsel, greedy nearest-neighbor feature selection.");

    let dataset_path = match cli.dataset.clone() {
        Some(path) => path,
        None => prompt::with_stdin_prompter(prompt::ask_dataset_path)?,
    };
    let dataset = Dataset::load(&dataset_path)
        .with_context(|| format!("Failed to load dataset {}", dataset_path.display()))?;
    println!(
        "This dataset has {} features (not including the class attribute), with {} instances.",
        dataset.num_features(),
        dataset.num_instances()
    );

    let kind = match cli.algorithm {
        Some(kind) => kind,
        None => prompt::with_stdin_prompter(prompt::ask_search_kind)?,
    };

    run(kind, &dataset, &config, &cli)
}

fn run(
    kind: SearchKind,
    dataset: &Dataset,
    config: &SelectionConfig,
    cli: &Cli,
) -> anyhow::Result<()> {
    let output_path = config.output_path(kind);
    let mut sink = CsvSink::create(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;

    let console = if cli.quiet {
        ConsoleReporter::new(std::io::stdout()).without_candidates()
    } else {
        ConsoleReporter::new(std::io::stdout())
    };
    let mut reporter = (console, TracingReporter);

    println!("Starting {kind}...");
    let outcome = run_search(kind, LeaveOneOut::new(dataset), &mut reporter, &mut sink)?;
    tracing::info!(path = %output_path.display(), rows = sink.rows(), "Wrote results");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }
    Ok(())
}

/// Human-readable stderr logs, plus daily JSON files when a log directory is configured.
fn init_tracing(
    cli: &Cli,
    config: &SelectionConfig,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    // Human-readable layer for stderr (always active)
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_env("FEATSEL_LOG").unwrap_or_else(|_| EnvFilter::new(filter)),
        );

    let (json_layer, guard) = match config.logging.log_dir.as_deref().map(json_file_layer) {
        Some(Some((layer, guard))) => (Some(layer), Some(guard)),
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(json_layer)
        .with(stderr_layer)
        .init();
    guard
}

type JsonLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

fn json_file_layer(
    log_dir: &Path,
) -> Option<(JsonLayer, tracing_appender::non_blocking::WorkerGuard)> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Cannot create log directory {}: {}", log_dir.display(), e);
        return None;
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, "featsel.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"))
        .boxed();
    Some((layer, guard))
}
