// src/exec/task_runner.rs

//! Single supervised process.

use std::fs::OpenOptions;
use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::engine::{ExecOutcome, ExecRequest, RuntimeEvent};

/// Spawn the shell for one execution.
///
/// Output goes to, in order of preference:
/// - the client log (`log_path`), appended, stdout and stderr combined
/// - the daemon's own stdout/stderr when `inherit_stdio` is set
/// - pipes that [`supervise`] forwards to the log at debug level
///
/// The child is not killed when its handle is dropped, so a daemon shutdown
/// leaves a running script alone.
pub fn spawn_execution(request: &ExecRequest) -> Result<Child> {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(request.command_line());
    cmd.stdin(Stdio::null());

    match (&request.log_path, request.inherit_stdio) {
        (Some(path), _) => {
            let stdout = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening client log {}", path.display()))?;
            let stderr = stdout
                .try_clone()
                .with_context(|| format!("duplicating client log {}", path.display()))?;
            cmd.stdout(Stdio::from(stdout)).stderr(Stdio::from(stderr));
        }
        (None, true) => {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }
        (None, false) => {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        }
    }

    cmd.spawn()
        .with_context(|| format!("spawning '{}'", request.command_line()))
}

/// Wait for the child, record its exit code and report completion.
///
/// Never fails: a failed wait is reported as [`ExecOutcome::Unknown`].
pub async fn supervise(
    mut child: Child,
    request: ExecRequest,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) {
    let pid = child.id();

    if let Some(stdout) = child.stdout.take() {
        forward_lines(stdout, pid, "stdout");
    }
    if let Some(stderr) = child.stderr.take() {
        forward_lines(stderr, pid, "stderr");
    }

    let outcome = match child.wait().await {
        Ok(status) => {
            let code = status.code().unwrap_or(-1);
            info!(
                ?pid,
                exit_code = code,
                success = status.success(),
                "supervised process exited"
            );
            if status.success() {
                ExecOutcome::Success
            } else {
                ExecOutcome::Failed(code)
            }
        }
        Err(err) => {
            error!(?pid, error = %err, "waiting for supervised process failed");
            ExecOutcome::Unknown
        }
    };

    if let Some(path) = &request.log_path {
        if let Err(err) = append_exit_trailer(path, outcome).await {
            warn!(
                ?pid,
                path = %path.display(),
                error = %err,
                "failed to append exit code to client log"
            );
        }
    }

    if runtime_tx
        .send(RuntimeEvent::ExecutionFinished { pid, outcome })
        .await
        .is_err()
    {
        debug!(?pid, "runtime already stopped; completion dropped");
    }
}

/// Log each line of a child stream at debug level until EOF.
fn forward_lines<R>(stream: R, pid: Option<u32>, name: &'static str)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(?pid, stream = name, "{}", line);
        }
    });
}

async fn append_exit_trailer(path: &Path, outcome: ExecOutcome) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(format!("Exit code: {}\n", outcome.exit_code()).as_bytes())
        .await?;
    file.flush().await
}
