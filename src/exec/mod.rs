// src/exec/mod.rs

//! Process supervision layer.
//!
//! This module is responsible for actually running the configured script,
//! using `tokio::process::Command`, and reporting back to the runtime via
//! [`RuntimeEvent::ExecutionFinished`](crate::engine::RuntimeEvent).
//!
//! - [`backend`] provides the [`Supervisor`] trait and the production
//!   [`RealSupervisor`]; tests replace it with a fake that never spawns.
//! - [`task_runner`] spawns one process, forwards or logs its output, waits
//!   for it and writes the exit-code trailer.

pub mod backend;
pub mod task_runner;

pub use backend::{RealSupervisor, Supervisor};
