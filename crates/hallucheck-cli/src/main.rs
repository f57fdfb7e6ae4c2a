//! CLI entrypoint for hallucheck
//!
//! Wires configuration, credentials, the dataset and the evaluator
//! together, then prints the report.

mod cli;
mod env;
mod progress;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use hallucheck_core::load_dataset;
use hallucheck_runtime::{Credentials, Evaluator, NoProgress, RuntimeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::progress::{ActiveBar, LogWriter, ProgressReporter};
use crate::report::ConsoleReport;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise only warnings and errors
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Log lines pause the progress bar instead of drawing through it
    let active_bar = ActiveBar::new();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(LogWriter::new(active_bar.clone()))
        .init();

    info!("Starting hallucheck");

    env::load_dotenv();

    let config = load_config(&cli)?;

    // Keys are checked before anything touches the network
    let credentials = Credentials::load(&config)?;

    let items = load_dataset(&cli.data_path, cli.item_limit())
        .with_context(|| format!("Failed to load dataset {}", cli.data_path.display()))?;
    info!(items = items.len(), path = %cli.data_path.display(), "Dataset loaded");

    if !cli.quiet {
        println!();
        println!("{}", "Starting hallucination evaluation".green().bold());
        println!("Mode: {}", cli.mode.to_string().yellow().bold());
        println!("Items: {}", items.len());
        println!();
    }

    let evaluator = Evaluator::from_config(&config, credentials)?;

    let summary = if cli.quiet {
        evaluator.evaluate(items, cli.mode, &NoProgress).await
    } else {
        let progress = ProgressReporter::new(active_bar);
        evaluator.evaluate(items, cli.mode, &progress).await
    };

    println!("{}", ConsoleReport::format(&summary, cli.verbose));

    if let Some(path) = &cli.output {
        summary
            .write_json(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    Ok(())
}

/// Defaults, then the YAML file if given, then command-line overrides.
fn load_config(cli: &Cli) -> Result<RuntimeConfig> {
    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RuntimeConfig::default(),
    };

    if cli.concurrency.is_some() {
        config = config.with_max_concurrency(cli.concurrency);
    }

    config.validate()?;
    Ok(config)
}
