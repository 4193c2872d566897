// src/config/mod.rs

//! Configuration loading and validation for buzzerd.
//!
//! Responsibilities:
//! - Define the raw and validated data model (`model.rs`).
//! - Parse the line-oriented key/value file (`loader.rs`).
//! - Validate mandatory keys and values (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, parse_str};
pub use model::{DaemonConfig, RawConfigFile, DEFAULT_BUTTON_PIN, DEFAULT_LED_PIN};
