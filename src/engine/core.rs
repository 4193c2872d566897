// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`CoreInput`]s and produces:
//! - an updated [`EngineState`]
//! - a list of commands describing what the IO shell should do next
//!   (drive the LED, launch the script)
//! - the reply for a control request
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - sampling the button on every tick
//! - reading events from channels
//! - handing launches to the supervisor
//! - handling shutdown
//!
//! The core has no Tokio types, no channels, no GPIO and no processes, so it
//! can be tested tick by tick.

use crate::config::DaemonConfig;
use crate::engine::event_handlers::{
    handle_control, handle_execution_finished, handle_launch_failed, handle_shutdown,
    handle_tick, maybe_launch, CoreStep,
};
use crate::engine::sampler::Sampler;
use crate::engine::state::EngineState;
use crate::engine::ExecOutcome;

/// Input to a single core step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreInput {
    /// Periodic tick with the sampled button level.
    Tick { pressed: bool },
    /// Raw request read from the control socket.
    Control(Vec<u8>),
    /// The in-flight execution ended.
    ExecutionFinished {
        pid: Option<u32>,
        outcome: ExecOutcome,
    },
    /// The supervisor could not start the process.
    LaunchFailed,
    /// Termination signal received.
    ShutdownRequested,
}

#[derive(Debug)]
pub struct CoreRuntime {
    state: EngineState,
    sampler: Sampler,
}

impl CoreRuntime {
    pub fn new(config: &DaemonConfig) -> Self {
        Self::from_state(EngineState::from_config(config))
    }

    pub fn from_state(state: EngineState) -> Self {
        Self {
            state,
            sampler: Sampler::new(),
        }
    }

    /// Current engine state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Handle a single input, updating state and returning the resulting
    /// commands for the IO shell.
    ///
    /// After every input the trigger counter is checked, so a pending press
    /// is launched as soon as the supervisor is idle.
    pub fn step(&mut self, input: CoreInput) -> CoreStep {
        let mut step = match input {
            CoreInput::Tick { pressed } => handle_tick(&mut self.state, &mut self.sampler, pressed),
            CoreInput::Control(request) => handle_control(&mut self.state, &request),
            CoreInput::ExecutionFinished { pid, outcome } => {
                handle_execution_finished(&mut self.state, pid, outcome)
            }
            CoreInput::LaunchFailed => handle_launch_failed(&mut self.state),
            CoreInput::ShutdownRequested => handle_shutdown(&mut self.state),
        };

        if let Some(launch) = maybe_launch(&mut self.state) {
            step.commands.push(launch);
        }

        step
    }
}
