// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Without request words `buzzerd` starts the daemon. With request words it
//! acts as a one-shot client: `buzzerd -l alive` sends `-l alive` to the
//! running daemon and prints the reply.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;
use crate::control::default_socket_path;

/// Command-line arguments for `buzzerd`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "buzzerd",
    version,
    about = "Run a script when a button is pressed, show status on an LED.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Path of the control socket.
    #[arg(long, value_name = "PATH", default_value_os_t = default_socket_path())]
    pub socket: PathBuf,

    /// Log verbosity. Overrides `BUZZERD_LOG`.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Use in-memory button/LED lines instead of GPIO.
    #[arg(long)]
    pub simulate: bool,

    /// Parse + validate the config, print it, but don't start the daemon.
    #[arg(long)]
    pub dry_run: bool,

    /// Request for a running daemon, e.g. `-q`, `-x /path/script.sh`,
    /// `-a "--flag"`, `-l on|off|success|alive`.
    #[arg(
        value_name = "REQUEST",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub request: Vec<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Filter directive applied to every target.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
