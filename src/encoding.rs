//! One byte per key transition on the split link.
//!
//! ```text
//! bit  7    : 1 = pressed, 0 = released
//! bits 6..4 : row    (0..=7)
//! bits 3..0 : column (0..=15)
//! ```
//!
//! Every byte decodes to some event. Rows and columns outside the field width
//! are masked on encode, so out-of-range values alias onto valid ones.

use crate::event::KeyEvent;

const PRESSED_BIT: u8 = 0x80;
const ROW_SHIFT: u8 = 4;
const ROW_MASK: u8 = 0x07;
const COL_MASK: u8 = 0x0F;

pub const MAX_ROWS: usize = ROW_MASK as usize + 1;
pub const MAX_COLS: usize = COL_MASK as usize + 1;

pub fn encode(row: u8, col: u8, pressed: bool) -> u8 {
    let mut byte = 0;
    if pressed {
        byte |= PRESSED_BIT;
    }
    byte |= (row & ROW_MASK) << ROW_SHIFT;
    byte |= col & COL_MASK;
    byte
}

pub fn decode(byte: u8) -> KeyEvent {
    KeyEvent {
        row: (byte >> ROW_SHIFT) & ROW_MASK,
        col: byte & COL_MASK,
        pressed: byte & PRESSED_BIT != 0,
    }
}

impl KeyEvent {
    pub fn encode(&self) -> u8 {
        encode(self.row, self.col, self.pressed)
    }
}
