pub mod common;

use std::collections::VecDeque;

use corne::config::KeyboardConfig;
use corne::flags::{FlagDecoder, FlagMapping, RCTL_COMPOSITE, SHIFTED};
use corne::keycode::Modifiers;
use corne::layout::{ADJUST, COLS, LAYERS, LAYOUT, LOWER, RAISE, ROWS};
use corne::{KeyEvent, SplitKeyboard};
use usbd_human_interface_device::page::Keyboard;

use crate::common::{at, down, remote, tap, up, NO_EVENTS};

type Corne<'a> = SplitKeyboard<'a, VecDeque<u8>, ROWS, COLS, LAYERS>;

fn corne() -> Corne<'static> {
    SplitKeyboard::new(&LAYOUT, VecDeque::new(), KeyboardConfig::CORNE).unwrap()
}

/// Holds raise (right half thumb, `lt(RAISE, Enter)`) past the threshold.
fn hold_raise(keyboard: &mut Corne<'_>) {
    remote(keyboard, 3, 0, true);
    assert!(keyboard.tick(at(0), NO_EVENTS).is_empty());
    assert!(keyboard.tick(at(200), NO_EVENTS).is_empty());
    assert!(keyboard.engine().is_layer_active(RAISE));
}

#[test]
fn test_base_layer_both_halves() {
    let mut keyboard = corne();
    remote(&mut keyboard, 0, 0, true);
    let reports = keyboard.tick(at(0), [KeyEvent::press(0, 1)]);
    assert_eq!(
        reports,
        [down(Modifiers::NONE, Keyboard::Y), down(Modifiers::NONE, Keyboard::Q)]
    );
}

#[test]
fn test_raise_symbol_is_shifted() {
    let mut keyboard = corne();
    hold_raise(&mut keyboard);
    assert_eq!(
        keyboard.tick(at(210), [KeyEvent::press(0, 1)]),
        [down(Modifiers::LEFT_SHIFT, Keyboard::Keyboard1)]
    );
    assert_eq!(
        keyboard.tick(at(220), [KeyEvent::release(0, 1)]),
        [up(Modifiers::NONE, Keyboard::Keyboard1)]
    );
}

#[test]
fn test_raise_space_ctrl() {
    let mut keyboard = corne();
    hold_raise(&mut keyboard);
    remote(&mut keyboard, 3, 1, true);
    remote(&mut keyboard, 3, 1, false);
    assert_eq!(
        keyboard.tick(at(210), NO_EVENTS),
        [
            down(Modifiers::RIGHT_CTRL, Keyboard::Space),
            up(Modifiers::NONE, Keyboard::Space),
        ]
    );
}

#[test]
fn test_lower_tap_is_space() {
    key_sequence_test! {
        keyboard: corne(),
        sequence: [
            [3, 5, true, 0],
            [3, 5, false, 90],
        ],
        expected_reports: [
            down(Modifiers::NONE, Keyboard::Space),
            up(Modifiers::NONE, Keyboard::Space),
        ]
    };
}

#[test]
fn test_lower_numbers_and_alt_tap() {
    let keyboard = key_sequence_test! {
        keyboard: corne(),
        sequence: [
            [3, 5, true, 0],
            [1, 1, true, 20],  // interrupts, lower is held
            [1, 1, false, 30],
            [3, 3, true, 40],  // mt(LeftAlt, 2)
            [3, 3, false, 60],
        ],
        expected_reports: [
            down(Modifiers::NONE, Keyboard::Keyboard1),
            up(Modifiers::NONE, Keyboard::Keyboard1),
            down(Modifiers::NONE, Keyboard::Keyboard2),
            up(Modifiers::NONE, Keyboard::Keyboard2),
        ]
    };
    assert!(keyboard.engine().is_layer_active(LOWER));
}

#[test]
fn test_adjust_from_raise() {
    let mut keyboard = corne();
    remote(&mut keyboard, 3, 0, true);
    assert!(keyboard.tick(at(0), NO_EVENTS).is_empty());
    // Raise resolves to hold, so the lower thumb is mo(ADJUST).
    assert!(keyboard.tick(at(10), [KeyEvent::press(3, 5)]).is_empty());
    assert!(keyboard.engine().is_layer_active(ADJUST));
    assert_eq!(
        keyboard.tick(at(20), [KeyEvent::press(0, 0)]),
        [down(Modifiers::NONE, Keyboard::F1)]
    );
    remote(&mut keyboard, 0, 5, true);
    assert_eq!(keyboard.tick(at(30), NO_EVENTS), [down(Modifiers::NONE, Keyboard::F12)]);

    assert!(keyboard.tick(at(40), [KeyEvent::release(3, 5)]).is_empty());
    assert!(!keyboard.engine().is_layer_active(ADJUST));
    assert!(keyboard.engine().is_layer_active(RAISE));
}

#[test]
fn test_raise_tap_is_enter() {
    let mut keyboard = corne();
    remote(&mut keyboard, 3, 0, true);
    remote(&mut keyboard, 3, 0, false);
    assert_eq!(keyboard.tick(at(0), NO_EVENTS), tap(Keyboard::ReturnEnter));
}

#[test]
fn test_custom_flag_table() {
    let table = [
        FlagMapping::new(SHIFTED, Modifiers::RIGHT_SHIFT),
        FlagMapping::new(RCTL_COMPOSITE, Modifiers::LEFT_GUI),
    ];
    let mut keyboard = SplitKeyboard::with_flags(
        &LAYOUT,
        VecDeque::new(),
        KeyboardConfig::CORNE,
        FlagDecoder::new(&table),
    )
    .unwrap();
    hold_raise(&mut keyboard);
    assert_eq!(
        keyboard.tick(at(210), [KeyEvent::press(0, 2)]),
        [down(Modifiers::RIGHT_SHIFT, Keyboard::Keyboard2)]
    );
    remote(&mut keyboard, 3, 1, true);
    assert_eq!(
        keyboard.tick(at(220), NO_EVENTS),
        [down(Modifiers::LEFT_GUI, Keyboard::Space)]
    );
}
