//! EFT Replay Audit CLI
//!
//! Reads a directory of match replays and prints either the MANIFEST
//! compliance audit or the roster leaderboard.

mod render;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eft_core::{audit_replays, AnalyzerConfig, ReplayBatch, RosterOverview};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eft_cli")]
#[command(about = "Audit EFT match replays against MANIFEST targets", long_about = None)]
struct Cli {
    /// Replay directory (overrides the config file)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// YAML config with thresholds and constants
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-match statistics, compliance checks and aggregate verdict
    Audit {
        /// Emit the report as JSON instead of console text
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Goals, top scorers and top tacklers across all replays
    Overview,
}

fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(AnalyzerConfig::default()),
    }
}

fn load_batch(dir: &Path) -> Result<ReplayBatch> {
    let batch = eft_core::load_replay_dir(dir)
        .with_context(|| format!("Failed to read replay directory: {}", dir.display()))?;
    info!(
        "Loaded {} replays from {} ({} skipped)",
        batch.replays.len(),
        dir.display(),
        batch.skipped.len()
    );
    Ok(batch)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let dir = cli.dir.unwrap_or_else(|| config.replay_dir.clone());
    let batch = load_batch(&dir)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Audit { json } => {
            let report = audit_replays(&batch.replays, &config);
            if json {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                render::write_audit(&mut out, &batch, &report, &config)?;
            }
        }

        Commands::Overview => {
            let overview = RosterOverview::from_docs(batch.replays.iter().map(|r| &r.doc));
            render::write_overview(&mut out, &overview, config.overview_top_n)?;
        }
    }

    Ok(())
}
