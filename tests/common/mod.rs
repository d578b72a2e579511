#![allow(dead_code)]

pub mod test_macro;

use std::collections::VecDeque;

use corne::action::{composite, k, lt, mo, mt, shifted, NO, TRNS};
use corne::clock::Instant;
use corne::config::{KeyboardConfig, SplitConfig};
use corne::encoding::encode;
use corne::keycode::Modifiers;
use corne::keymap::Layer;
use corne::report::{ResolvedAction, Transition};
use corne::{KeyEvent, SplitKeyboard};
use usbd_human_interface_device::page::Keyboard;
use usbd_human_interface_device::page::Keyboard::*;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const ROWS: usize = 2;
pub const COLS: usize = 6;
pub const LAYERS: usize = 4;

/// Two rows per half, left half in columns 0..3, right half in 3..6.
#[rustfmt::skip]
pub static TEST_LAYERS: [Layer<ROWS, COLS>; LAYERS] = [
    [
        [k(Q),           k(A),                lt(2, Space), k(C),                  mo(1), mt(LeftShift, Escape)],
        [k(LeftControl), shifted(Keyboard1),  mo(3),        lt(1, ReturnEnter),    k(D),  NO],
    ],
    [
        [k(Keyboard1),   TRNS,                TRNS,         k(Keyboard3),          TRNS,  TRNS],
        [TRNS,           TRNS,                TRNS,         TRNS,                  TRNS,  composite(Space)],
    ],
    [
        [k(Keyboard2),   TRNS,                TRNS,         TRNS,                  TRNS,  TRNS],
        [TRNS,           TRNS,                TRNS,         k(LeftArrow),          TRNS,  TRNS],
    ],
    [
        [k(F1),          TRNS,                TRNS,         TRNS,                  TRNS,  TRNS],
        [TRNS,           TRNS,                TRNS,         TRNS,                  TRNS,  TRNS],
    ],
];

pub type TestKeyboard = SplitKeyboard<'static, VecDeque<u8>, ROWS, COLS, LAYERS>;

pub fn test_config() -> KeyboardConfig {
    KeyboardConfig {
        split: SplitConfig {
            rows: ROWS,
            local_cols: 3,
            remote_cols: 3,
            remote_col_offset: 3,
            ..SplitConfig::new()
        },
        ..KeyboardConfig::CORNE
    }
}

pub fn create_test_keyboard() -> TestKeyboard {
    SplitKeyboard::new(&TEST_LAYERS, VecDeque::new(), test_config()).unwrap()
}

/// A tick with nothing scanned on the left half.
pub const NO_EVENTS: [KeyEvent; 0] = [];

pub fn at(ms: u64) -> Instant {
    Instant::from_ticks(ms * 1000)
}

/// Queues a right-half transition on the link, `col` as the right half sees it.
pub fn remote<const NROWS: usize, const NCOLS: usize, const NLAYERS: usize>(
    keyboard: &mut SplitKeyboard<'_, VecDeque<u8>, NROWS, NCOLS, NLAYERS>,
    row: u8,
    col: u8,
    pressed: bool,
) {
    keyboard.link().push_back(encode(row, col, pressed));
}

pub fn down(modifiers: Modifiers, keycode: Keyboard) -> ResolvedAction {
    ResolvedAction {
        modifiers,
        keycode,
        transition: Transition::Down,
    }
}

pub fn up(modifiers: Modifiers, keycode: Keyboard) -> ResolvedAction {
    ResolvedAction {
        modifiers,
        keycode,
        transition: Transition::Up,
    }
}

pub fn tap(keycode: Keyboard) -> [ResolvedAction; 2] {
    [down(Modifiers::NONE, keycode), up(Modifiers::NONE, keycode)]
}
