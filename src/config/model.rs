// src/config/model.rs

use std::path::PathBuf;

use crate::types::LedMode;

/// BCM number of the button input (physical pin 12).
pub const DEFAULT_BUTTON_PIN: u8 = 18;
/// BCM number of the LED output (physical pin 37).
pub const DEFAULT_LED_PIN: u8 = 26;

/// Key/value pairs exactly as read from the config file.
///
/// ```text
/// # /etc/buzzerd.conf
/// Executable=/opt/buzzer/ring.sh
/// Arguments=--loud
/// ClientOutput=/var/log/buzzer-client.log
/// LED=alive
/// debug
/// ```
///
/// Values are kept as strings; [`DaemonConfig::try_from`] checks them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfigFile {
    /// `Executable`: script or binary to run on a press.
    pub executable: Option<String>,

    /// `Arguments`: argument string appended to the executable.
    pub arguments: Option<String>,

    /// `ClientOutput`: file that receives the script's output and exit code.
    pub client_output: Option<String>,

    /// `LED`: initial LED mode.
    pub led: Option<String>,

    /// Bare `debug` line.
    pub debug: bool,

    /// `ButtonPin`: BCM GPIO number of the button.
    pub button_pin: Option<String>,

    /// `LedPin`: BCM GPIO number of the LED.
    pub led_pin: Option<String>,
}

/// Validated daemon configuration.
///
/// Seeds the engine state at startup; the control socket may change
/// `executable`, `arguments` and `led_mode` afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    pub executable: String,
    pub arguments: String,
    pub log_path: Option<PathBuf>,
    pub led_mode: LedMode,
    pub debug: bool,
    pub button_pin: u8,
    pub led_pin: u8,
}

impl DaemonConfig {
    /// Build a config without validation. Used by tests and by
    /// [`TryFrom<RawConfigFile>`] once all checks passed.
    pub fn new_unchecked(executable: impl Into<String>, led_mode: LedMode) -> Self {
        Self {
            executable: executable.into(),
            arguments: String::new(),
            log_path: None,
            led_mode,
            debug: false,
            button_pin: DEFAULT_BUTTON_PIN,
            led_pin: DEFAULT_LED_PIN,
        }
    }
}
