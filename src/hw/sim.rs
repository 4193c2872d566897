// src/hw/sim.rs

use std::sync::{Arc, Mutex, MutexGuard};

use crate::hw::{GpioLines, InputLine, OutputLine};
use crate::types::LineLevel;

#[derive(Debug)]
struct BoardState {
    held: bool,
    taps: u32,
    led: LineLevel,
    led_writes: u64,
}

/// In-memory stand-in for the button and the LED.
///
/// Clones share the same board, so a test can keep one handle to press the
/// button and inspect the LED while the runtime owns the lines.
#[derive(Debug, Clone)]
pub struct SimulatedBoard {
    inner: Arc<Mutex<BoardState>>,
}

impl Default for SimulatedBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedBoard {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BoardState {
                held: false,
                taps: 0,
                led: LineLevel::Low,
                led_writes: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Hold the button down until [`release`](Self::release).
    pub fn press(&self) {
        self.lock().held = true;
    }

    pub fn release(&self) {
        self.lock().held = false;
    }

    /// Report the button pressed for exactly one sample.
    pub fn tap(&self) {
        self.lock().taps += 1;
    }

    /// Current LED level.
    pub fn led_level(&self) -> LineLevel {
        self.lock().led
    }

    /// Number of LED writes so far. Static modes write on every tick, so
    /// this doubles as a tick counter.
    pub fn led_writes(&self) -> u64 {
        self.lock().led_writes
    }

    /// Lines backed by this board, for the runtime.
    pub fn lines(&self) -> GpioLines {
        GpioLines {
            button: Box::new(SimButton { board: self.clone() }),
            led: Box::new(SimLed { board: self.clone() }),
        }
    }
}

struct SimButton {
    board: SimulatedBoard,
}

impl InputLine for SimButton {
    fn is_pressed(&mut self) -> bool {
        let mut state = self.board.lock();
        if state.taps > 0 {
            state.taps -= 1;
            return true;
        }
        state.held
    }
}

struct SimLed {
    board: SimulatedBoard,
}

impl OutputLine for SimLed {
    fn set_level(&mut self, level: LineLevel) {
        let mut state = self.board.lock();
        state.led = level;
        state.led_writes += 1;
    }
}
