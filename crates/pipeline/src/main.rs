//! Command-line entry point: raw price CSV in, feature CSV out.

use anyhow::{Context, Result};
use clap::Parser;
use pricewave_core::Config;
use pricewave_ingestion::{write_csv_path, RawTable};
use pricewave_pipeline::Pipeline;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_WAVELET: &str = "db4";
const DEFAULT_LEVEL: u32 = 2;

#[derive(Parser, Debug)]
#[command(name = "pricewave")]
#[command(about = "Build labeled, wavelet-denoised feature tables from daily prices")]
struct Cli {
    /// YAML or JSON configuration file (db4, level 2 when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Raw price CSV (newest row first)
    #[arg(short, long)]
    input: PathBuf,

    /// Destination CSV
    #[arg(short, long)]
    output: PathBuf,

    /// CSV of peer asset closes, one column per asset
    #[arg(long)]
    peers: Option<PathBuf>,

    /// Wavelet family, overriding the configuration
    #[arg(long)]
    wavelet: Option<String>,

    /// Decomposition level, overriding the configuration
    #[arg(long)]
    level: Option<u32>,

    /// Stop after the indicator stage
    #[arg(long)]
    no_denoise: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::new(DEFAULT_WAVELET, DEFAULT_LEVEL),
    };
    if let Some(wavelet) = cli.wavelet {
        config.wavelet = wavelet;
    }
    if let Some(level) = cli.level {
        config.level = level;
    }
    if cli.no_denoise {
        config.denoise.enabled = false;
    }

    let peers = match &cli.peers {
        Some(path) => {
            config.augment.add_correlated = true;
            let table = RawTable::from_path(path)
                .and_then(RawTable::into_numeric_table)
                .with_context(|| format!("reading peers {}", path.display()))?;
            Some(table)
        }
        None => None,
    };

    let pipeline = Pipeline::new(config).context("invalid configuration")?;
    let raw = RawTable::from_path(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    info!(rows = raw.len(), path = %cli.input.display(), "raw prices loaded");

    let table = pipeline.run(&raw, peers.as_ref())?;
    write_csv_path(&table, &cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!(
        rows = table.len(),
        columns = table.width(),
        path = %cli.output.display(),
        "feature table written"
    );
    Ok(())
}
