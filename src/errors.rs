// src/errors.rs

//! Crate-wide error type and exit-code mapping.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuzzerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Missing mandatory config key: {0}")]
    MissingKey(&'static str),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("GPIO error: {0}")]
    Gpio(String),

    #[error("Daemon already running (control socket {} is reachable)", .0.display())]
    AlreadyRunning(PathBuf),

    #[error("Unable to connect to daemon at {}", .0.display())]
    DaemonUnreachable(PathBuf),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Process exit codes.
pub mod exit_code {
    pub const OK: i32 = 0;
    pub const FATAL: i32 = 1;
    pub const ALREADY_RUNNING: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const UNREACHABLE: i32 = 4;
}

impl BuzzerError {
    pub fn exit_code(&self) -> i32 {
        match self {
            BuzzerError::ConfigError(_) | BuzzerError::MissingKey(_) => exit_code::CONFIG,
            BuzzerError::AlreadyRunning(_) => exit_code::ALREADY_RUNNING,
            BuzzerError::DaemonUnreachable(_) => exit_code::UNREACHABLE,
            BuzzerError::IoError(_) | BuzzerError::Gpio(_) | BuzzerError::Other(_) => {
                exit_code::FATAL
            }
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BuzzerError>;
