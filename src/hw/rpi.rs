// src/hw/rpi.rs

use rppal::gpio::{Gpio, InputPin, OutputPin};
use tracing::info;

use crate::errors::{BuzzerError, Result};
use crate::hw::{GpioLines, InputLine, OutputLine};
use crate::types::LineLevel;

/// Active-low button with the internal pull-up enabled.
pub struct RpiButton {
    pin: InputPin,
}

impl InputLine for RpiButton {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low()
    }
}

pub struct RpiLed {
    pin: OutputPin,
}

impl OutputLine for RpiLed {
    fn set_level(&mut self, level: LineLevel) {
        match level {
            LineLevel::High => self.pin.set_high(),
            LineLevel::Low => self.pin.set_low(),
        }
    }
}

/// Claim both pins (BCM numbering). The pins return to their previous mode
/// when the lines are dropped.
pub fn open(button_pin: u8, led_pin: u8) -> Result<GpioLines> {
    let gpio = Gpio::new().map_err(|e| BuzzerError::Gpio(format!("opening GPIO: {e}")))?;

    let button = gpio
        .get(button_pin)
        .map_err(|e| BuzzerError::Gpio(format!("claiming button pin {button_pin}: {e}")))?
        .into_input_pullup();

    let led = gpio
        .get(led_pin)
        .map_err(|e| BuzzerError::Gpio(format!("claiming LED pin {led_pin}: {e}")))?
        .into_output_low();

    info!(button_pin, led_pin, "GPIO lines claimed");

    Ok(GpioLines {
        button: Box::new(RpiButton { pin: button }),
        led: Box::new(RpiLed { pin: led }),
    })
}
