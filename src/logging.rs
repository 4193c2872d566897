// src/logging.rs

//! `tracing` subscriber setup.
//!
//! `--log-level` wins. Otherwise `BUZZERD_LOG` is read as an `EnvFilter`
//! directive string (`debug`, `buzzerd::exec=trace,info`, ...), and without
//! either the daemon logs at `info`.
//!
//! Everything goes to stderr: in client mode stdout carries only the reply.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "BUZZERD_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(cli_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))
}

fn build_filter(cli_level: Option<LogLevel>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level.as_directive());
    }

    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        // Unset or unparsable.
        Err(_) => EnvFilter::new(LogLevel::Info.as_directive()),
    }
}
