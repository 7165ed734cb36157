//! # devsignal
//!
//! **CLI Binary**
//!
//! Entry point for the `devsignal` command-line application.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Load configuration
//! * Dispatch commands to their handlers
//! * Report errors with hints and a non-zero exit code
//!
//! Metric logic lives in the component crates; this crate only does I/O.

mod commands;
mod error_hints;

use anyhow::{Result, anyhow};
use clap::Parser;
use devsignal_config::Cli;
use tracing_subscriber::EnvFilter;

/// Environment variable read for the log filter before `RUST_LOG`.
pub const LOG_ENV: &str = "DEVSIGNAL_LOG";

/// Parse arguments and run the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;
    commands::dispatch(cli)
}

/// Render an error with its cause chain and any matching hints.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}

/// Logs go to stderr so stdout stays valid JSON.
fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))
}
