// src/engine/state.rs

use std::path::PathBuf;

use tracing::debug;

use crate::config::DaemonConfig;
use crate::engine::{ExecOutcome, ExecRequest};
use crate::types::LedMode;

/// Mutable engine state.
///
/// Owned by [`CoreRuntime`](crate::engine::CoreRuntime) and only ever
/// mutated from the runtime loop, so the sampler, the protocol handler and
/// completion handling see one consistent, last-write-wins view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    pub led_mode: LedMode,
    pub executable: String,
    pub arguments: String,
    pub log_path: Option<PathBuf>,
    pub pending_triggers: u32,
    pub execution_in_flight: bool,
    pub last_exit_succeeded: bool,
    pub running: bool,
    pub debug: bool,
}

impl EngineState {
    pub fn from_config(config: &DaemonConfig) -> Self {
        Self {
            led_mode: config.led_mode,
            executable: config.executable.clone(),
            arguments: config.arguments.clone(),
            log_path: config.log_path.clone(),
            pending_triggers: 0,
            execution_in_flight: false,
            last_exit_succeeded: false,
            running: true,
            debug: config.debug,
        }
    }

    /// Count one debounced button press.
    pub fn record_press(&mut self) {
        self.pending_triggers = self.pending_triggers.saturating_add(1);
        debug!(pending = self.pending_triggers, "button press recorded");
    }

    /// Consume one pending trigger if the supervisor is idle.
    ///
    /// On success the execution is marked in flight and the request to hand
    /// to the supervisor is returned.
    pub fn take_trigger(&mut self) -> Option<ExecRequest> {
        if self.pending_triggers == 0 || self.execution_in_flight {
            return None;
        }

        self.pending_triggers -= 1;
        self.execution_in_flight = true;

        Some(ExecRequest {
            executable: self.executable.clone(),
            arguments: self.arguments.clone(),
            log_path: self.log_path.clone(),
            inherit_stdio: self.debug,
        })
    }

    /// Record the end of the in-flight execution.
    pub fn finish_execution(&mut self, outcome: ExecOutcome) {
        self.execution_in_flight = false;
        self.last_exit_succeeded = outcome.succeeded();
    }

    /// The supervisor could not start the process; it is idle again and the
    /// previous outcome stays as it was.
    pub fn abort_launch(&mut self) {
        self.execution_in_flight = false;
    }
}
