use std::path::PathBuf;

use buzzerd::config::DaemonConfig;
use buzzerd::types::LedMode;

/// Builder for `DaemonConfig` to simplify test setup.
pub struct DaemonConfigBuilder {
    config: DaemonConfig,
}

impl DaemonConfigBuilder {
    pub fn new(executable: &str) -> Self {
        Self {
            config: DaemonConfig::new_unchecked(executable, LedMode::Alive),
        }
    }

    pub fn arguments(mut self, arguments: &str) -> Self {
        self.config.arguments = arguments.to_string();
        self
    }

    pub fn led(mut self, mode: LedMode) -> Self {
        self.config.led_mode = mode;
        self
    }

    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = Some(path.into());
        self
    }

    pub fn debug(mut self, val: bool) -> Self {
        self.config.debug = val;
        self
    }

    pub fn build(self) -> DaemonConfig {
        self.config
    }
}

/// Render config-file text from `(key, value)` pairs; an empty value writes
/// a bare key.
pub fn config_text(entries: &[(&str, &str)]) -> String {
    let mut text = String::from("# generated by buzzerd tests\n");
    for (key, value) in entries {
        if value.is_empty() {
            text.push_str(key);
        } else {
            text.push_str(&format!("{key}={value}"));
        }
        text.push('\n');
    }
    text
}
