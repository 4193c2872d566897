// tests/sampler_behaviour.rs

use buzzerd::engine::sampler::{Sampler, ALIVE_PERIOD, ALIVE_PULSE_AT, DEBOUNCE_TICKS};
use buzzerd::types::{LedMode, LineLevel};

/// Feed a press/release pattern and return the indices of ticks that
/// registered a new press.
fn presses(sampler: &mut Sampler, pattern: &[bool]) -> Vec<usize> {
    pattern
        .iter()
        .enumerate()
        .filter_map(|(i, &pressed)| sampler.debounce(pressed).then_some(i))
        .collect()
}

#[test]
fn held_press_counts_once() {
    let mut sampler = Sampler::new();
    let pattern = vec![true; 100];

    assert_eq!(presses(&mut sampler, &pattern), vec![0]);
}

#[test]
fn bounces_inside_hold_window_are_absorbed() {
    let mut sampler = Sampler::new();
    // Press, one released tick, press again, repeat.
    let pattern = [true, false, true, false, true, false, false, false];

    assert_eq!(presses(&mut sampler, &pattern), vec![0]);
}

#[test]
fn new_press_after_window_lapses_is_counted() {
    let mut sampler = Sampler::new();
    // The last pressed tick leaves DEBOUNCE_TICKS - 1 ticks of hold; after
    // that many released ticks the next press counts.
    let mut pattern = vec![true];
    pattern.extend(std::iter::repeat_n(false, usize::from(DEBOUNCE_TICKS - 1)));
    pattern.push(true);

    assert_eq!(presses(&mut sampler, &pattern), vec![0, pattern.len() - 1]);
}

#[test]
fn press_one_tick_too_early_is_absorbed() {
    let mut sampler = Sampler::new();
    let mut pattern = vec![true];
    pattern.extend(std::iter::repeat_n(false, usize::from(DEBOUNCE_TICKS - 2)));
    pattern.push(true);

    assert_eq!(presses(&mut sampler, &pattern), vec![0]);
}

#[test]
fn hold_counter_decays_to_zero() {
    let mut sampler = Sampler::new();
    sampler.debounce(true);
    assert_eq!(sampler.debounce_hold(), DEBOUNCE_TICKS - 1);

    for _ in 0..10 {
        sampler.debounce(false);
    }
    assert_eq!(sampler.debounce_hold(), 0);
}

#[test]
fn alive_heartbeat_edges() {
    let mut sampler = Sampler::new();
    let levels: Vec<Option<LineLevel>> = (0..=usize::from(ALIVE_PERIOD))
        .map(|_| sampler.led_level(LedMode::Alive, false))
        .collect();

    assert_eq!(levels[0], Some(LineLevel::Low));
    for (tick, level) in levels.iter().enumerate().take(usize::from(ALIVE_PULSE_AT)).skip(1) {
        assert_eq!(*level, None, "tick {tick} should leave the LED alone");
    }
    assert_eq!(levels[usize::from(ALIVE_PULSE_AT)], Some(LineLevel::High));
    for level in &levels[usize::from(ALIVE_PULSE_AT) + 1..usize::from(ALIVE_PERIOD)] {
        assert_eq!(*level, None);
    }
    assert_eq!(levels[usize::from(ALIVE_PERIOD)], Some(LineLevel::Low));
}

#[test]
fn static_modes_drive_every_tick() {
    let mut sampler = Sampler::new();

    for _ in 0..5 {
        assert_eq!(sampler.led_level(LedMode::On, false), Some(LineLevel::High));
        assert_eq!(sampler.led_level(LedMode::Off, true), Some(LineLevel::Low));
        assert_eq!(sampler.led_level(LedMode::Success, true), Some(LineLevel::High));
        assert_eq!(sampler.led_level(LedMode::Success, false), Some(LineLevel::Low));
    }
}

#[test]
fn heartbeat_pauses_outside_alive_mode() {
    let mut sampler = Sampler::new();

    // Five Alive ticks (0..=4), then a detour through On.
    for _ in 0..5 {
        sampler.led_level(LedMode::Alive, false);
    }
    for _ in 0..30 {
        sampler.led_level(LedMode::On, false);
    }

    // Ticks 5..=9 are quiet, tick 10 pulses.
    for _ in 5..10 {
        assert_eq!(sampler.led_level(LedMode::Alive, false), None);
    }
    assert_eq!(sampler.led_level(LedMode::Alive, false), Some(LineLevel::High));
}
