// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::model::{DaemonConfig, RawConfigFile};
use crate::errors::{BuzzerError, Result};

/// Load a configuration file from a given path and return the raw key/value
/// model.
///
/// This only tokenizes the file; it does **not** check mandatory keys or
/// values. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        BuzzerError::ConfigError(format!("reading config file {}: {e}", path.display()))
    })?;

    Ok(parse_str(&contents))
}

/// Load a configuration file from path and validate it.
///
/// Fails when `Executable`, `LED`, or both of `Arguments` / `ClientOutput`
/// are missing, or when a value does not parse.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<DaemonConfig> {
    let raw = load_from_path(&path)?;
    let config = DaemonConfig::try_from(raw)?;
    debug!(path = %path.as_ref().display(), ?config, "configuration loaded");
    Ok(config)
}

/// Location used when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("/etc/buzzerd.conf")
}

/// Tokenize the line-oriented config format.
///
/// - Blank lines and lines starting with `#` or `;` are skipped.
/// - `Key=Value`, `Key = Value` and `Key Value` are equivalent.
/// - Keys are case-sensitive; a repeated key overwrites the earlier value.
/// - Unknown keys are logged and ignored.
pub fn parse_str(contents: &str) -> RawConfigFile {
    let mut raw = RawConfigFile::default();

    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let (key, value) = split_key_value(line);
        match key {
            "Executable" => raw.executable = Some(value.to_string()),
            "Arguments" => raw.arguments = Some(value.to_string()),
            "ClientOutput" => raw.client_output = Some(value.to_string()),
            "LED" => raw.led = Some(value.to_string()),
            "debug" => raw.debug = true,
            "ButtonPin" => raw.button_pin = Some(value.to_string()),
            "LedPin" => raw.led_pin = Some(value.to_string()),
            other => {
                warn!(line = idx + 1, key = %other, "ignoring unknown config key");
            }
        }
    }

    raw
}

fn split_key_value(line: &str) -> (&str, &str) {
    match line.find(|c: char| c == '=' || c.is_whitespace()) {
        Some(pos) => {
            let rest = line[pos..].trim_start();
            let value = rest.strip_prefix('=').unwrap_or(rest).trim();
            (&line[..pos], value)
        }
        None => (line, ""),
    }
}
