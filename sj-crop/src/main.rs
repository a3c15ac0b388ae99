//! sj-crop - command-line front end for trial cropping
//!
//! **Usage:**
//! ```bash
//! sj-crop info  --trial trial.json
//! sj-crop check --trial trial.json --start 1600000002000 --end 1600000009000
//! sj-crop drag  --trial trial.json --handle start --to 1600000001500
//! sj-crop apply --trial trial.json --start 1600000002000 --end 1600000009000 [--output out.json]
//! sj-crop clear --trial trial.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use sj_common::config::{load_config, OutputFormat};
use sj_crop::{run, Cli};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = load_config(cli.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|l| l.config.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!("Starting sj-crop v{}", env!("CARGO_PKG_VERSION"));

    let loaded = loaded.context("Failed to load configuration")?;
    loaded.log_source();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        loaded.config.output
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, format, &mut out)
}
