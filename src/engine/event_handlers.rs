// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use tracing::{debug, info, warn};

use crate::control::protocol::{parse_request, ControlCommand};
use crate::engine::sampler::Sampler;
use crate::engine::state::EngineState;
use crate::engine::{ExecOutcome, ExecRequest};
use crate::types::LineLevel;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Drive the LED line to this level.
    SetLed(LineLevel),
    /// Hand this execution to the supervisor.
    Launch(ExecRequest),
}

/// Decision returned by the core after handling a single input.
#[derive(Debug, Clone, Default)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Reply text for a control request.
    pub reply: Option<String>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn new(state: &EngineState) -> Self {
        Self {
            commands: Vec::new(),
            reply: None,
            keep_running: state.running,
        }
    }
}

/// Handle one sampling tick: debounce the button, then drive the LED.
pub fn handle_tick(state: &mut EngineState, sampler: &mut Sampler, pressed: bool) -> CoreStep {
    let mut step = CoreStep::new(state);

    if sampler.debounce(pressed) {
        state.record_press();
    }

    if let Some(level) = sampler.led_level(state.led_mode, state.last_exit_succeeded) {
        step.commands.push(CoreCommand::SetLed(level));
    }

    step
}

/// Handle one control-socket request.
///
/// Rejected requests leave the state untouched and only produce a reply.
pub fn handle_control(state: &mut EngineState, request: &[u8]) -> CoreStep {
    let command = match parse_request(request) {
        Ok(command) => command,
        Err(err) => {
            warn!(
                request = %String::from_utf8_lossy(request),
                reply = %err,
                "rejected control request"
            );
            let mut step = CoreStep::new(state);
            step.reply = Some(err.to_string());
            return step;
        }
    };

    let reply = command.confirmation();

    match command {
        ControlCommand::Quit => {
            info!("quit requested over control socket");
            state.running = false;
        }
        ControlCommand::SetExecutable(executable) => {
            info!(executable = %executable, "executable updated");
            state.executable = executable;
        }
        ControlCommand::SetArguments(arguments) => {
            info!(arguments = %arguments, "arguments updated");
            state.arguments = arguments;
        }
        ControlCommand::SetLed(mode) => {
            info!(%mode, "LED mode updated");
            state.led_mode = mode;
        }
    }

    let mut step = CoreStep::new(state);
    step.reply = Some(reply);
    step
}

/// Handle completion of the in-flight execution.
pub fn handle_execution_finished(
    state: &mut EngineState,
    pid: Option<u32>,
    outcome: ExecOutcome,
) -> CoreStep {
    if !state.execution_in_flight {
        warn!(?pid, ?outcome, "completion reported with no execution in flight");
    }

    state.finish_execution(outcome);
    info!(
        ?pid,
        ?outcome,
        pending = state.pending_triggers,
        "execution finished"
    );

    CoreStep::new(state)
}

/// The supervisor failed to start a process.
pub fn handle_launch_failed(state: &mut EngineState) -> CoreStep {
    state.abort_launch();
    debug!(pending = state.pending_triggers, "supervisor idle after launch failure");
    CoreStep::new(state)
}

/// Termination signal: stop the loop.
pub fn handle_shutdown(state: &mut EngineState) -> CoreStep {
    info!("shutdown requested");
    state.running = false;
    CoreStep::new(state)
}

/// If a press is pending and nothing is running, start the next execution.
///
/// Consumes exactly one trigger; the rest stay queued until this execution
/// completes.
pub fn maybe_launch(state: &mut EngineState) -> Option<CoreCommand> {
    if !state.running {
        return None;
    }

    let request = state.take_trigger()?;
    info!(
        command = %request.command_line(),
        pending = state.pending_triggers,
        "launching executable"
    );
    Some(CoreCommand::Launch(request))
}
