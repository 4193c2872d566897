// src/config/validate.rs

use std::path::PathBuf;

use crate::config::model::{DaemonConfig, RawConfigFile, DEFAULT_BUTTON_PIN, DEFAULT_LED_PIN};
use crate::errors::{BuzzerError, Result};
use crate::types::LedMode;

/// Highest BCM GPIO number on the 40-pin header.
const MAX_BCM_PIN: u8 = 27;

impl TryFrom<RawConfigFile> for DaemonConfig {
    type Error = crate::errors::BuzzerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let executable = match raw.executable {
            Some(exe) if !exe.is_empty() => exe,
            _ => return Err(BuzzerError::MissingKey("Executable")),
        };

        let led_mode = validate_led(raw.led.as_deref())?;

        if raw.arguments.is_none() && raw.client_output.is_none() {
            return Err(BuzzerError::MissingKey("Arguments or ClientOutput"));
        }

        let button_pin = validate_pin("ButtonPin", raw.button_pin.as_deref(), DEFAULT_BUTTON_PIN)?;
        let led_pin = validate_pin("LedPin", raw.led_pin.as_deref(), DEFAULT_LED_PIN)?;
        if button_pin == led_pin {
            return Err(BuzzerError::ConfigError(format!(
                "ButtonPin and LedPin must differ (both are {button_pin})"
            )));
        }

        Ok(DaemonConfig {
            executable,
            arguments: raw.arguments.unwrap_or_default(),
            log_path: raw
                .client_output
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            led_mode,
            debug: raw.debug,
            button_pin,
            led_pin,
        })
    }
}

fn validate_led(value: Option<&str>) -> Result<LedMode> {
    let value = value.ok_or(BuzzerError::MissingKey("LED"))?;
    value.parse::<LedMode>().map_err(BuzzerError::ConfigError)
}

fn validate_pin(key: &str, value: Option<&str>, default: u8) -> Result<u8> {
    let Some(value) = value else {
        return Ok(default);
    };

    match value.parse::<u8>() {
        Ok(pin) if pin <= MAX_BCM_PIN => Ok(pin),
        _ => Err(BuzzerError::ConfigError(format!(
            "{key} must be a BCM GPIO number between 0 and {MAX_BCM_PIN} (got '{value}')"
        ))),
    }
}
