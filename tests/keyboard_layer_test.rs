pub mod common;

use corne::action::k;
use corne::keycode::Modifiers;
use corne::{KeyEvent, KeyPosition};
use usbd_human_interface_device::page::Keyboard;

use crate::common::{at, NO_EVENTS, create_test_keyboard, down, remote, up};

#[test]
fn test_transparent_falls_through() {
    let mut keyboard = create_test_keyboard();
    keyboard.tick(at(0), [KeyEvent::press(0, 2)]);
    keyboard.tick(at(200), NO_EVENTS);
    assert_eq!(keyboard.engine().active_layers().collect::<Vec<_>>(), [0, 2]);

    // Layer 2 is transparent at (0, 1), layer 0 has A.
    assert_eq!(keyboard.engine().resolve(KeyPosition::new(0, 1)), k(Keyboard::A));
    let reports = keyboard.tick(at(210), [KeyEvent::press(0, 1)]);
    assert_eq!(reports, [down(Modifiers::NONE, Keyboard::A)]);
}

#[test]
fn test_momentary_layer() {
    key_sequence_test! {
        keyboard: create_test_keyboard(),
        sequence: [
            [1, 2, true, 0],   // mo(3)
            [0, 0, true, 10],  // F1
            [0, 0, false, 20],
            [1, 2, false, 30],
            [0, 0, true, 40],  // Q
        ],
        expected_reports: [
            down(Modifiers::NONE, Keyboard::F1),
            up(Modifiers::NONE, Keyboard::F1),
            down(Modifiers::NONE, Keyboard::Q),
        ]
    };
}

#[test]
fn test_release_uses_keycode_from_press() {
    let mut keyboard = create_test_keyboard();
    let reports = keyboard.tick(at(0), [KeyEvent::press(0, 0)]);
    assert_eq!(reports, [down(Modifiers::NONE, Keyboard::Q)]);
    keyboard.tick(at(10), [KeyEvent::press(1, 2)]);
    assert!(keyboard.engine().is_layer_active(3));
    let reports = keyboard.tick(at(20), [KeyEvent::release(0, 0)]);
    assert_eq!(reports, [up(Modifiers::NONE, Keyboard::Q)]);
}

#[test]
fn test_layer_pushed_twice_needs_both_releases() {
    let mut keyboard = create_test_keyboard();
    // mo(1) on the right half, lt(1, Enter) held on the right half too.
    remote(&mut keyboard, 0, 1, true);
    remote(&mut keyboard, 1, 0, true);
    keyboard.tick(at(0), NO_EVENTS);
    keyboard.tick(at(300), NO_EVENTS);
    assert_eq!(keyboard.engine().active_layers().collect::<Vec<_>>(), [0, 1, 1]);

    remote(&mut keyboard, 0, 1, false);
    keyboard.tick(at(310), NO_EVENTS);
    assert!(keyboard.engine().is_layer_active(1));
    let reports = keyboard.tick(at(320), [KeyEvent::press(0, 0)]);
    assert_eq!(reports, [down(Modifiers::NONE, Keyboard::Keyboard1)]);

    remote(&mut keyboard, 1, 0, false);
    keyboard.tick(at(330), NO_EVENTS);
    assert!(!keyboard.engine().is_layer_active(1));
}

#[test]
fn test_most_recent_layer_wins() {
    let mut keyboard = create_test_keyboard();
    // Raise via mo(1), then lower via a held lt(2).
    remote(&mut keyboard, 0, 1, true);
    keyboard.tick(at(0), NO_EVENTS);
    keyboard.tick(at(10), [KeyEvent::press(0, 2)]);
    keyboard.tick(at(200), NO_EVENTS);
    assert_eq!(keyboard.engine().active_layers().collect::<Vec<_>>(), [0, 1, 2]);

    // (0, 0): layer 2 wins over layer 1. Remote (0, 0): layer 2 is
    // transparent there, layer 1 has 3.
    remote(&mut keyboard, 0, 0, true);
    let reports = keyboard.tick(at(220), [KeyEvent::press(0, 0)]);
    assert_eq!(
        reports,
        [
            down(Modifiers::NONE, Keyboard::Keyboard3),
            down(Modifiers::NONE, Keyboard::Keyboard2),
        ]
    );
}

#[test]
fn test_modifier_key_sets_report_modifiers() {
    key_sequence_test! {
        keyboard: create_test_keyboard(),
        sequence: [
            [1, 0, true, 0],   // Left Control
            [0, 1, true, 10],  // A
            [0, 1, false, 20],
            [1, 0, false, 30],
        ],
        expected_reports: [
            down(Modifiers::LEFT_CTRL, Keyboard::NoEventIndicated),
            down(Modifiers::LEFT_CTRL, Keyboard::A),
            up(Modifiers::LEFT_CTRL, Keyboard::A),
            up(Modifiers::NONE, Keyboard::NoEventIndicated),
        ]
    };
}

#[test]
fn test_dead_key_emits_nothing() {
    let mut keyboard = create_test_keyboard();
    remote(&mut keyboard, 1, 2, true);
    remote(&mut keyboard, 1, 2, false);
    assert!(keyboard.tick(at(0), NO_EVENTS).is_empty());
}
