// src/exec/backend.rs

//! Pluggable supervisor abstraction.
//!
//! The runtime hands launches to a `Supervisor` instead of spawning
//! processes itself. The runtime guarantees that `launch` is only called
//! while no other execution is in flight.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;
use tracing::info;

use crate::engine::{ExecRequest, RuntimeEvent};
use crate::errors::Result;

use super::task_runner::{spawn_execution, supervise};

/// Trait abstracting how an execution is started.
///
/// Implementations must return promptly: the process runs in the
/// background and its end is reported as a
/// [`RuntimeEvent::ExecutionFinished`]. An `Err` means nothing was started.
pub trait Supervisor: Send {
    fn launch(
        &mut self,
        request: ExecRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Production supervisor: spawns `sh -c "<executable> <arguments>"` and
/// watches it on its own Tokio task.
#[derive(Debug, Clone)]
pub struct RealSupervisor {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
}

impl RealSupervisor {
    pub fn new(runtime_tx: mpsc::Sender<RuntimeEvent>) -> Self {
        Self { runtime_tx }
    }
}

impl Supervisor for RealSupervisor {
    fn launch(
        &mut self,
        request: ExecRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // Clone the sender so the future doesn't borrow `self` across `await`.
        let tx = self.runtime_tx.clone();

        Box::pin(async move {
            let child = spawn_execution(&request)?;
            info!(
                pid = ?child.id(),
                command = %request.command_line(),
                "supervised process started"
            );

            tokio::spawn(supervise(child, request, tx));
            Ok(())
        })
    }
}
