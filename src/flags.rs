//! Flag bits above the keycode byte, each adding a modifier once the key is
//! resolved.

use crate::keycode::Modifiers;

/// Bit 8: add Left Shift.
pub const SHIFTED: u16 = 0x0100;
/// Bit 9: add Right Ctrl.
pub const RCTL_COMPOSITE: u16 = 0x0200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlagMapping {
    pub flag: u16,
    pub modifiers: Modifiers,
}

impl FlagMapping {
    pub const fn new(flag: u16, modifiers: Modifiers) -> Self {
        FlagMapping { flag, modifiers }
    }
}

pub const DEFAULT_FLAGS: [FlagMapping; 2] = [
    FlagMapping::new(SHIFTED, Modifiers::LEFT_SHIFT),
    FlagMapping::new(RCTL_COMPOSITE, Modifiers::RIGHT_CTRL),
];

#[derive(Clone, Copy, Debug)]
pub struct FlagDecoder<'a> {
    table: &'a [FlagMapping],
}

impl Default for FlagDecoder<'static> {
    fn default() -> Self {
        FlagDecoder::new(&DEFAULT_FLAGS)
    }
}

impl<'a> FlagDecoder<'a> {
    pub const fn new(table: &'a [FlagMapping]) -> Self {
        FlagDecoder { table }
    }

    /// Splits a raw code into the modifiers its flags add and the keycode byte.
    pub fn expand(&self, raw: u16) -> (Modifiers, u8) {
        let mut modifiers = Modifiers::NONE;
        let mut working = raw;
        for mapping in self.table {
            if working & mapping.flag != 0 {
                modifiers |= mapping.modifiers;
                working &= !mapping.flag;
            }
        }
        (modifiers, (working & 0xFF) as u8)
    }
}
