
use usbd_human_interface_device::page::Keyboard;

use crate::flags::{RCTL_COMPOSITE, SHIFTED};
use crate::keycode::Modifiers;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Plain(Keyboard),
    Transparent,
    /// Tap emits the keycode, hold activates the layer.
    LayerTap(u8, Keyboard),
    /// Tap emits the keycode, hold applies the modifiers.
    ModTap(Modifiers, Keyboard),
    MomentaryLayer(u8),
    /// Keycode with packed flag bits, expanded by [`crate::flags::FlagDecoder`].
    ModifiedPlain(Keyboard, u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldEffect {
    Layer(u8),
    Modifier(Modifiers),
}

impl Action {
    pub const fn raw_code(&self) -> Option<u16> {
        match *self {
            Action::Plain(key) => Some(key as u16),
            Action::ModifiedPlain(key, flags) => Some(key as u16 | flags),
            _ => None,
        }
    }

    /// Splits a `LayerTap`/`ModTap` into its hold effect and tap keycode.
    pub const fn tap_hold(&self) -> Option<(HoldEffect, Keyboard)> {
        match *self {
            Action::LayerTap(layer, tap) => Some((HoldEffect::Layer(layer), tap)),
            Action::ModTap(modifiers, tap) => Some((HoldEffect::Modifier(modifiers), tap)),
            _ => None,
        }
    }

    pub const fn layer(&self) -> Option<u8> {
        match *self {
            Action::LayerTap(layer, _) | Action::MomentaryLayer(layer) => Some(layer),
            _ => None,
        }
    }
}

pub const TRNS: Action = Action::Transparent;
pub const NO: Action = Action::Plain(Keyboard::NoEventIndicated);

pub const fn k(key: Keyboard) -> Action {
    Action::Plain(key)
}

pub const fn lt(layer: u8, tap: Keyboard) -> Action {
    Action::LayerTap(layer, tap)
}

/// `modifier` must be one of the eight modifier usages.
pub const fn mt(modifier: Keyboard, tap: Keyboard) -> Action {
    match Modifiers::from_keyboard(modifier) {
        Some(modifiers) => Action::ModTap(modifiers, tap),
        None => panic!("mt() needs a modifier key"),
    }
}

pub const fn mo(layer: u8) -> Action {
    Action::MomentaryLayer(layer)
}

pub const fn shifted(key: Keyboard) -> Action {
    Action::ModifiedPlain(key, SHIFTED)
}

pub const fn composite(key: Keyboard) -> Action {
    Action::ModifiedPlain(key, RCTL_COMPOSITE)
}
