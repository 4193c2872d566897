// src/control/mod.rs

//! Control socket: request grammar, daemon-side listener and the one-shot
//! client used by the CLI.

pub mod client;
pub mod protocol;
pub mod server;

use std::path::PathBuf;

pub use client::{run_client, send_request};
pub use protocol::{parse_request, ControlCommand, ProtocolError};
pub use server::{
    bind, is_daemon_running, remove_socket, spawn_listener, ListenerHandle, SHUTDOWN_GRACE,
};

/// Socket path used when `--socket` is not given.
pub fn default_socket_path() -> PathBuf {
    PathBuf::from("/tmp/BuzzerD.sock")
}
