// src/hw/mod.rs

//! GPIO line abstraction.
//!
//! The runtime talks to an [`InputLine`] (the button) and an [`OutputLine`]
//! (the LED) instead of a concrete GPIO library.
//!
//! - [`rpi`] drives real Raspberry Pi pins via `rppal` (feature `rpi`).
//! - [`sim`] keeps both lines in memory; used by `--simulate` and tests.

use std::fmt;

use crate::config::DaemonConfig;
use crate::errors::Result;
use crate::types::LineLevel;

#[cfg(feature = "rpi")]
pub mod rpi;
pub mod sim;

pub use sim::SimulatedBoard;

/// Button input.
pub trait InputLine: Send {
    /// `true` while the button is held down.
    fn is_pressed(&mut self) -> bool;
}

/// LED output.
pub trait OutputLine: Send {
    fn set_level(&mut self, level: LineLevel);
}

/// The pair of lines the daemon drives.
pub struct GpioLines {
    pub button: Box<dyn InputLine>,
    pub led: Box<dyn OutputLine>,
}

impl fmt::Debug for GpioLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpioLines").finish_non_exhaustive()
    }
}

/// Open the hardware lines named in the configuration.
#[cfg(feature = "rpi")]
pub fn open_gpio(config: &DaemonConfig) -> Result<GpioLines> {
    rpi::open(config.button_pin, config.led_pin)
}

#[cfg(not(feature = "rpi"))]
pub fn open_gpio(_config: &DaemonConfig) -> Result<GpioLines> {
    Err(crate::errors::BuzzerError::Gpio(
        "built without the `rpi` feature; run with --simulate".to_string(),
    ))
}
