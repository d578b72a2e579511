use core::ops::{BitOr, BitOrAssign};

use bitfield_struct::bitfield;
use usbd_human_interface_device::page::Keyboard;

/// The modifier byte of a HID keyboard report.
#[bitfield(u8, order = Lsb)]
#[derive(Eq, PartialEq, Hash)]
pub struct Modifiers {
    #[bits(1)]
    pub left_ctrl: bool,
    #[bits(1)]
    pub left_shift: bool,
    #[bits(1)]
    pub left_alt: bool,
    #[bits(1)]
    pub left_gui: bool,
    #[bits(1)]
    pub right_ctrl: bool,
    #[bits(1)]
    pub right_shift: bool,
    #[bits(1)]
    pub right_alt: bool,
    #[bits(1)]
    pub right_gui: bool,
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers::new();
    pub const LEFT_CTRL: Modifiers = Modifiers::new().with_left_ctrl(true);
    pub const LEFT_SHIFT: Modifiers = Modifiers::new().with_left_shift(true);
    pub const LEFT_ALT: Modifiers = Modifiers::new().with_left_alt(true);
    pub const LEFT_GUI: Modifiers = Modifiers::new().with_left_gui(true);
    pub const RIGHT_CTRL: Modifiers = Modifiers::new().with_right_ctrl(true);
    pub const RIGHT_SHIFT: Modifiers = Modifiers::new().with_right_shift(true);
    pub const RIGHT_ALT: Modifiers = Modifiers::new().with_right_alt(true);
    pub const RIGHT_GUI: Modifiers = Modifiers::new().with_right_gui(true);

    /// `None` for anything but the eight modifier usages.
    pub const fn from_keyboard(key: Keyboard) -> Option<Modifiers> {
        match key {
            Keyboard::LeftControl => Some(Self::LEFT_CTRL),
            Keyboard::LeftShift => Some(Self::LEFT_SHIFT),
            Keyboard::LeftAlt => Some(Self::LEFT_ALT),
            Keyboard::LeftGUI => Some(Self::LEFT_GUI),
            Keyboard::RightControl => Some(Self::RIGHT_CTRL),
            Keyboard::RightShift => Some(Self::RIGHT_SHIFT),
            Keyboard::RightAlt => Some(Self::RIGHT_ALT),
            Keyboard::RightGUI => Some(Self::RIGHT_GUI),
            _ => None,
        }
    }

    pub fn keys(self) -> impl Iterator<Item = Keyboard> {
        [
            (self.left_ctrl(), Keyboard::LeftControl),
            (self.left_shift(), Keyboard::LeftShift),
            (self.left_alt(), Keyboard::LeftAlt),
            (self.left_gui(), Keyboard::LeftGUI),
            (self.right_ctrl(), Keyboard::RightControl),
            (self.right_shift(), Keyboard::RightShift),
            (self.right_alt(), Keyboard::RightAlt),
            (self.right_gui(), Keyboard::RightGUI),
        ]
        .into_iter()
        .filter_map(|(held, key)| held.then_some(key))
    }
}
