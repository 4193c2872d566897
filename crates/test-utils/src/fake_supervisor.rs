use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use buzzerd::engine::{ExecOutcome, ExecRequest, RuntimeEvent};
use buzzerd::errors::{BuzzerError, Result};
use buzzerd::exec::Supervisor;

/// What the fake does with each launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeBehaviour {
    /// Report completion with this outcome right away.
    Complete(ExecOutcome),
    /// Never report completion (a hung script).
    Hang,
    /// Refuse to start (spawn failure).
    FailToStart,
}

/// A fake supervisor that:
/// - records every launched `ExecRequest`
/// - reports completion according to its `FakeBehaviour`.
pub struct FakeSupervisor {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    launched: Arc<Mutex<Vec<ExecRequest>>>,
    behaviour: FakeBehaviour,
}

impl FakeSupervisor {
    pub fn new(
        runtime_tx: mpsc::Sender<RuntimeEvent>,
        launched: Arc<Mutex<Vec<ExecRequest>>>,
        behaviour: FakeBehaviour,
    ) -> Self {
        Self { runtime_tx, launched, behaviour }
    }
}

impl Supervisor for FakeSupervisor {
    fn launch(
        &mut self,
        request: ExecRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.runtime_tx.clone();
        let launched = Arc::clone(&self.launched);
        let behaviour = self.behaviour;

        Box::pin(async move {
            launched.lock().unwrap().push(request);

            match behaviour {
                FakeBehaviour::Complete(outcome) => {
                    tx.send(RuntimeEvent::ExecutionFinished { pid: None, outcome })
                        .await
                        .map_err(anyhow::Error::from)?;
                    Ok(())
                }
                FakeBehaviour::Hang => Ok(()),
                FakeBehaviour::FailToStart => Err(BuzzerError::Other(anyhow::anyhow!(
                    "fake spawn failure"
                ))),
            }
        })
    }
}
