// src/engine/sampler.rs

//! Periodic button debounce and LED state machine.
//!
//! [`Sampler`] is evaluated once per tick. It never blocks and never touches
//! hardware itself: it is fed the sampled button level and returns the LED
//! level to drive (if any).

use crate::types::{LedMode, LineLevel};

/// Ticks of enforced quiet after the last pressed sample (3 x 50 ms).
pub const DEBOUNCE_TICKS: u8 = 3;

/// Length of one heartbeat period in ticks (20 x 50 ms = 1 s).
pub const ALIVE_PERIOD: u8 = 20;

/// Tick within the heartbeat period at which the LED goes high.
pub const ALIVE_PULSE_AT: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sampler {
    debounce_hold: u8,
    alive_tick: u8,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler {
    pub fn new() -> Self {
        Self {
            debounce_hold: 0,
            // The first Alive tick wraps to 0 and drives the LED low.
            alive_tick: ALIVE_PERIOD - 1,
        }
    }

    /// Feed one button sample. Returns `true` when this sample starts a new
    /// press.
    ///
    /// Every pressed sample re-arms the hold window, so a press held for any
    /// number of ticks counts once, and bounces shorter than the window are
    /// absorbed.
    pub fn debounce(&mut self, pressed: bool) -> bool {
        let mut new_press = false;

        if pressed {
            new_press = self.debounce_hold == 0;
            self.debounce_hold = DEBOUNCE_TICKS;
        }

        if self.debounce_hold > 0 {
            self.debounce_hold -= 1;
        }

        new_press
    }

    /// LED level for this tick, or `None` to leave the line as it is.
    pub fn led_level(&mut self, mode: LedMode, last_exit_succeeded: bool) -> Option<LineLevel> {
        match mode {
            LedMode::On => Some(LineLevel::High),
            LedMode::Off => Some(LineLevel::Low),
            LedMode::Success => Some(LineLevel::from(last_exit_succeeded)),
            LedMode::Alive => self.heartbeat(),
        }
    }

    fn heartbeat(&mut self) -> Option<LineLevel> {
        self.alive_tick += 1;

        if self.alive_tick == ALIVE_PERIOD {
            self.alive_tick = 0;
            Some(LineLevel::Low)
        } else if self.alive_tick == ALIVE_PULSE_AT {
            Some(LineLevel::High)
        } else {
            None
        }
    }

    /// Remaining hold ticks (for tests and diagnostics).
    pub fn debounce_hold(&self) -> u8 {
        self.debounce_hold
    }
}
