// src/engine/runtime.rs

use std::collections::VecDeque;
use std::fmt;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::errors::Result;
use crate::exec::Supervisor;
use crate::hw::GpioLines;
use crate::types::LineLevel;

use super::core::{CoreInput, CoreRuntime};
use super::{CoreCommand, CoreStep, RuntimeEvent, RuntimeOptions};

/// Drives the core engine from timer ticks and `RuntimeEvent`s, applies LED
/// levels to the GPIO lines and delegates launches to a `Supervisor`.
///
/// This is a pure IO shell around `CoreRuntime`, which contains all the
/// runtime semantics. It is the only owner of the engine state, so every
/// mutation (sampler, control request, completion) is serialized here.
pub struct Runtime<S: Supervisor> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    supervisor: S,
    lines: GpioLines,
    options: RuntimeOptions,
}

impl<S: Supervisor> fmt::Debug for Runtime<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<S: Supervisor> Runtime<S> {
    pub fn new(
        core: CoreRuntime,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        supervisor: S,
        lines: GpioLines,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            core,
            event_rx,
            supervisor,
            lines,
            options,
        }
    }

    /// Main event loop.
    ///
    /// - Samples the button on every tick and feeds it into the core.
    /// - Feeds `RuntimeEvent`s into the core and answers control requests.
    /// - Executes commands returned by the core (drive LED, launch script).
    ///
    /// Returns the final core so callers can inspect the state it stopped
    /// in. The LED is forced low before returning.
    pub async fn run(mut self) -> Result<CoreRuntime> {
        info!(tick_ms = self.options.tick_period.as_millis() as u64, "buzzerd runtime started");

        let mut ticker = tokio::time::interval(self.options.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let step = tokio::select! {
                _ = ticker.tick() => {
                    let pressed = self.lines.button.is_pressed();
                    self.core.step(CoreInput::Tick { pressed })
                }
                event = self.event_rx.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => {
                        info!("runtime event channel closed; exiting");
                        break;
                    }
                },
            };

            let keep_running = step.keep_running;
            self.execute_commands(step).await;

            if !keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        self.lines.led.set_level(LineLevel::Low);

        if self.core.state().execution_in_flight {
            info!("leaving in-flight execution running");
        }
        info!("runtime exiting");

        Ok(self.core)
    }

    fn handle_event(&mut self, event: RuntimeEvent) -> CoreStep {
        debug!(?event, "runtime received event");

        match event {
            RuntimeEvent::ControlRequest { request, reply } => {
                let mut step = self.core.step(CoreInput::Control(request));
                if let Some(text) = step.reply.take() {
                    if reply.send(text).is_err() {
                        debug!("control client went away before the reply");
                    }
                }
                step
            }
            RuntimeEvent::ExecutionFinished { pid, outcome } => {
                self.core.step(CoreInput::ExecutionFinished { pid, outcome })
            }
            RuntimeEvent::ShutdownRequested => self.core.step(CoreInput::ShutdownRequested),
        }
    }

    /// Execute the commands of one step.
    ///
    /// A launch the supervisor rejects is fed back to the core as
    /// `LaunchFailed`, whose own commands are queued behind the rest.
    async fn execute_commands(&mut self, step: CoreStep) {
        let mut queue: VecDeque<CoreCommand> = step.commands.into();

        while let Some(command) = queue.pop_front() {
            match command {
                CoreCommand::SetLed(level) => self.lines.led.set_level(level),
                CoreCommand::Launch(request) => {
                    let command_line = request.command_line();
                    if let Err(err) = self.supervisor.launch(request).await {
                        error!(command = %command_line, error = %err, "failed to launch executable");
                        let retry = self.core.step(CoreInput::LaunchFailed);
                        queue.extend(retry.commands);
                    }
                }
            }
        }
    }
}
