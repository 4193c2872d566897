// src/control/client.rs

use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tracing::debug;

use crate::errors::{BuzzerError, Result};

/// Send one request to the daemon and return its reply.
///
/// The write half is closed after the request so the daemon sees the whole
/// request in a single read; the reply is read until the daemon closes.
pub async fn send_request(socket: &Path, request: &str) -> Result<String> {
    let mut stream = UnixStream::connect(socket).await.map_err(|err| {
        debug!(socket = %socket.display(), error = %err, "connect failed");
        BuzzerError::DaemonUnreachable(socket.to_path_buf())
    })?;

    stream.write_all(request.as_bytes()).await?;
    stream.shutdown().await?;

    let mut reply = String::new();
    stream.read_to_string(&mut reply).await?;
    Ok(reply)
}

/// CLI client mode: join the words with single spaces, send them as one
/// request and print the reply.
pub async fn run_client(socket: &Path, words: &[String]) -> Result<()> {
    let request = words.join(" ");

    match send_request(socket, &request).await {
        Ok(reply) if reply.is_empty() => {
            println!("ERR: No reply received from daemon!");
            Ok(())
        }
        Ok(reply) => {
            println!("BuzzerD: {reply}");
            Ok(())
        }
        Err(err) => Err(err),
    }
}
