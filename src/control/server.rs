// src/control/server.rs

//! Daemon side of the control socket.
//!
//! Each accepted connection gets its own short-lived task that reads one
//! request, forwards it to the runtime as a
//! [`RuntimeEvent::ControlRequest`] and writes the reply back. The runtime
//! loop therefore never waits on a slow client.

use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result as AnyResult};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::errors::Result;

/// Largest request read from one connection.
pub const MAX_REQUEST_LEN: usize = 1023;

/// Connections that send nothing within this window are dropped.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// How long shutdown waits for open connections to finish their replies.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Whether a daemon is already answering on `path`.
pub async fn is_daemon_running(path: &Path) -> bool {
    UnixStream::connect(path).await.is_ok()
}

/// Remove a stale socket file and bind a fresh listener.
pub fn bind(path: &Path) -> Result<UnixListener> {
    remove_socket(path);
    let listener = UnixListener::bind(path)
        .with_context(|| format!("binding control socket {}", path.display()))?;
    info!(socket = %path.display(), "control socket listening");
    Ok(listener)
}

/// Best-effort removal of the socket file.
pub fn remove_socket(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(socket = %path.display(), "removed socket file"),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => warn!(socket = %path.display(), error = %err, "failed to remove socket file"),
    }
}

/// Running accept loop. Dropping the handle detaches it; call
/// [`shutdown`](ListenerHandle::shutdown) to stop it cleanly.
#[derive(Debug)]
pub struct ListenerHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ListenerHandle {
    /// Stop accepting, then wait up to `grace` for the open connections to
    /// write their replies. Connections still open after that are aborted.
    pub async fn shutdown(mut self, grace: Duration) {
        if let Some(stop) = self.stop.take() {
            // The loop may already have exited on its own.
            let _ = stop.send(());
        }

        match tokio::time::timeout(grace, &mut self.task).await {
            Ok(Ok(())) => debug!("control listener drained"),
            Ok(Err(err)) => warn!(error = %err, "control listener task failed"),
            Err(_) => {
                warn!(
                    grace_ms = grace.as_millis() as u64,
                    "control connections still open; aborting"
                );
                self.task.abort();
            }
        }
    }
}

/// Accept connections until stopped, one task per connection.
///
/// Connection tasks are owned by the loop, so stopping it waits for every
/// in-progress reply instead of dropping it with the runtime.
pub fn spawn_listener(
    listener: UnixListener,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> ListenerHandle {
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut connections: JoinSet<()> = JoinSet::new();

        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, _addr)) => {
                        let tx = runtime_tx.clone();
                        connections.spawn(async move {
                            if let Err(err) = handle_connection(stream, tx).await {
                                debug!(error = %err, "control connection ended with error");
                            }
                        });
                    }
                    Err(err) => warn!(error = %err, "failed to accept control connection"),
                },
                Some(joined) = connections.join_next(), if !connections.is_empty() => {
                    log_join(joined);
                }
            }
        }

        drop(listener);
        debug!(open = connections.len(), "control listener stopped accepting");

        while let Some(joined) = connections.join_next().await {
            log_join(joined);
        }
    });

    ListenerHandle {
        stop: Some(stop_tx),
        task,
    }
}

fn log_join(joined: std::result::Result<(), JoinError>) {
    if let Err(err) = joined {
        warn!(error = %err, "control connection task failed");
    }
}

/// Read a single request (one receive call), hand it to the runtime and
/// write back the reply.
async fn handle_connection(
    mut stream: UnixStream,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> AnyResult<()> {
    let mut buf = vec![0u8; MAX_REQUEST_LEN];
    let n = tokio::time::timeout(READ_TIMEOUT, stream.read(&mut buf))
        .await
        .context("timed out waiting for control request")?
        .context("reading control request")?;

    if n == 0 {
        debug!("control connection closed without a request");
        return Ok(());
    }
    buf.truncate(n);

    let (reply_tx, reply_rx) = oneshot::channel();
    runtime_tx
        .send(RuntimeEvent::ControlRequest {
            request: buf,
            reply: reply_tx,
        })
        .await
        .context("forwarding control request to runtime")?;

    let reply = reply_rx.await.context("runtime dropped control request")?;

    stream
        .write_all(reply.as_bytes())
        .await
        .context("writing control reply")?;
    stream.shutdown().await.context("closing control connection")?;

    Ok(())
}
