mod export;
mod render;

use analytics::{AnalyticsEngine, AnalyticsReport};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use configuration::{LogLevel, Settings};
use ingest::LoadedOrders;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Orderlens report tool.
fn main() -> anyhow::Result<()> {
    // Optional ORDERLENS__* overrides; a missing .env file is fine.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_config(cli.common.config.as_deref())
        .context("Failed to load configuration")?;
    cli.common.apply(&mut settings);
    settings.validate().context("Invalid command-line override")?;

    init_tracing(cli.common.log_level, settings.log_level)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report => handle_report(&settings),
        Commands::Export(args) => handle_export(&settings, args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Sales analytics for Amazon order exports.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the full analysis as terminal tables.
    Report,
    /// Write the full analysis as JSON.
    Export(ExportArgs),
}

/// Flags shared by every command. Each one overrides the matching config value.
#[derive(Args, Debug)]
struct CommonArgs {
    /// Path to a TOML config file (default: ./orderlens.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing the order exports.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Glob pattern for export files inside the data directory (e.g. "*.txt").
    #[arg(long, global = true)]
    pattern: Option<String>,

    /// Log verbosity. Takes precedence over RUST_LOG.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,
}

impl CommonArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.data_dir {
            settings.input.data_directory = dir.clone();
        }
        if let Some(pattern) = &self.pattern {
            settings.input.file_pattern = pattern.clone();
        }
        if let Some(level) = self.log_level {
            settings.log_level = level;
        }
    }
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Output file. Falls back to `output.json_path`, then to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber, writing to stderr so report output stays clean.
///
/// An explicit `--log-level` wins; otherwise `RUST_LOG`, then the configured level.
fn init_tracing(cli_level: Option<LogLevel>, configured: LogLevel) -> anyhow::Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level.as_directive()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(configured.as_directive())),
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Loads every export and runs the engine, refusing to continue on an empty batch.
fn analyse(settings: &Settings) -> anyhow::Result<(LoadedOrders, AnalyticsReport)> {
    let loaded = ingest::load_orders(&settings.input).with_context(|| {
        format!(
            "Failed to load orders from {}",
            settings.input.data_directory.display()
        )
    })?;

    let report = AnalyticsEngine::new().calculate(&loaded.records);
    report
        .ensure_not_empty()
        .context("Nothing to analyse: no order rows were loaded")?;

    Ok((loaded, report))
}

fn handle_report(settings: &Settings) -> anyhow::Result<()> {
    let (loaded, report) = analyse(settings)?;
    print!("{}", render::render_report(&report, &loaded, &settings.report));
    Ok(())
}

fn handle_export(settings: &Settings, args: ExportArgs) -> anyhow::Result<()> {
    let (loaded, report) = analyse(settings)?;

    let envelope = export::ExportEnvelope::new(&report, &loaded, &settings.input);
    tracing::info!(run_id = %envelope.run_id, "Exporting analysis");

    let destination = args.output.or_else(|| settings.output.json_path.clone());
    export::write_json(&envelope, destination.as_deref())
}
