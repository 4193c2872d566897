// src/engine/mod.rs

//! Event/state engine for buzzerd.
//!
//! This module ties together:
//! - the shared engine state (LED mode, script, trigger counter, ...)
//! - the periodic sampler (button debounce + LED state machine)
//! - the main runtime event loop that reacts to:
//!   - timer ticks
//!   - control-socket requests
//!   - supervised process completion
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::oneshot;

/// Outcome of a supervised execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    Success,
    /// Non-zero exit code; `-1` when the child was killed by a signal.
    Failed(i32),
    /// Waiting for the child failed, so the status is not known.
    Unknown,
}

impl ExecOutcome {
    pub fn succeeded(self) -> bool {
        matches!(self, ExecOutcome::Success)
    }

    /// Numeric status as written to the client log trailer.
    pub fn exit_code(self) -> i32 {
        match self {
            ExecOutcome::Success => 0,
            ExecOutcome::Failed(code) => code,
            ExecOutcome::Unknown => -1,
        }
    }
}

/// Everything the supervisor needs to start one execution.
///
/// Captured from the engine state at launch time, so later control
/// requests never affect a process that is already running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    pub executable: String,
    pub arguments: String,
    pub log_path: Option<PathBuf>,
    /// Let the child write to the daemon's stdout/stderr.
    pub inherit_stdio: bool,
}

impl ExecRequest {
    /// Shell command line: `<executable> <arguments>`.
    pub fn command_line(&self) -> String {
        if self.arguments.is_empty() {
            self.executable.clone()
        } else {
            format!("{} {}", self.executable, self.arguments)
        }
    }
}

/// Runtime options for the async shell.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Sampling period of the button and LED state machine.
    pub tick_period: Duration,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(50),
        }
    }
}

/// Events flowing into the runtime from the control socket, the supervisor
/// and signal handlers. Timer ticks are produced by the runtime itself.
#[derive(Debug)]
pub enum RuntimeEvent {
    /// One request read from a control-socket connection. The reply text is
    /// sent back through `reply`.
    ControlRequest {
        request: Vec<u8>,
        reply: oneshot::Sender<String>,
    },
    /// A supervised process exited.
    ExecutionFinished {
        pid: Option<u32>,
        outcome: ExecOutcome,
    },
    /// Graceful shutdown requested (SIGINT / SIGTERM / SIGQUIT).
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod runtime;
pub mod sampler;
pub mod state;

pub use self::core::{CoreInput, CoreRuntime};
pub use event_handlers::{CoreCommand, CoreStep};
pub use runtime::Runtime;
pub use sampler::Sampler;
pub use state::EngineState;
