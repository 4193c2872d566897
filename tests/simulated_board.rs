// tests/simulated_board.rs

use buzzerd::hw::SimulatedBoard;
use buzzerd::types::LineLevel;

#[test]
fn led_writes_are_counted_not_stored() {
    let board = SimulatedBoard::new();
    let mut lines = board.lines();

    // A day of 50 ms ticks in a static mode.
    for tick in 0..1_728_000u64 {
        lines.led.set_level(LineLevel::from(tick % 2 == 0));
    }

    assert_eq!(board.led_writes(), 1_728_000);
    assert_eq!(board.led_level(), LineLevel::Low);
}

#[test]
fn tap_is_pressed_for_one_sample() {
    let board = SimulatedBoard::new();
    let mut lines = board.lines();

    board.tap();
    assert!(lines.button.is_pressed());
    assert!(!lines.button.is_pressed());

    board.press();
    assert!(lines.button.is_pressed());
    assert!(lines.button.is_pressed());
    board.release();
    assert!(!lines.button.is_pressed());
}
