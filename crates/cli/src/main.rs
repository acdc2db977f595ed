use std::io;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use stylist_cli::Cli;
use stylist_core::config::{AppConfig, LogFormat};
use tracing::Level;

fn init_logging(config: &AppConfig) -> Result<()> {
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder =
        tracing_subscriber::fmt().with_target(false).with_max_level(log_level).with_writer(io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|error| anyhow!("failed to initialize logging: {error}"))
}

fn main() -> Result<ExitCode> {
    // Commands report config failures themselves; logging just falls back to defaults.
    let cli = Cli::parse();
    let config = AppConfig::load(cli.load_options()).unwrap_or_default();
    init_logging(&config)?;

    Ok(stylist_cli::run_cli(cli))
}
