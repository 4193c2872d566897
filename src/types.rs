// src/types.rs

use std::fmt;
use std::str::FromStr;

/// How the status LED is driven on every tick.
///
/// - `On` / `Off`: static level.
/// - `Success`: mirrors the outcome of the last finished execution.
/// - `Alive`: heartbeat, one short high phase per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedMode {
    On,
    Off,
    Success,
    #[default]
    Alive,
}

impl LedMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LedMode::On => "on",
            LedMode::Off => "off",
            LedMode::Success => "success",
            LedMode::Alive => "alive",
        }
    }
}

impl fmt::Display for LedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is case-sensitive, matching the control protocol and the
/// config file: `"on"`, `"off"`, `"success"`, `"alive"`.
impl FromStr for LedMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(LedMode::On),
            "off" => Ok(LedMode::Off),
            "success" => Ok(LedMode::Success),
            "alive" => Ok(LedMode::Alive),
            other => Err(format!(
                "invalid LED mode: {other} (expected \"on\", \"off\", \"success\" or \"alive\")"
            )),
        }
    }
}

/// Logical level of a GPIO line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLevel {
    Low,
    High,
}

impl From<bool> for LineLevel {
    fn from(high: bool) -> Self {
        if high { LineLevel::High } else { LineLevel::Low }
    }
}
