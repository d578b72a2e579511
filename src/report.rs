use log::info;
use smallvec::SmallVec;
use usbd_human_interface_device::page::Keyboard;

use crate::keycode::Modifiers;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Down,
    Up,
}

/// One boot-keyboard report: modifier byte plus a single keycode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedAction {
    pub modifiers: Modifiers,
    pub keycode: Keyboard,
    pub transition: Transition,
}

impl ResolvedAction {
    /// The keycode is only included while it is going down.
    pub fn keys(&self) -> SmallVec<[Keyboard; 9]> {
        let mut keys: SmallVec<[Keyboard; 9]> = self.modifiers.keys().collect();
        if self.transition == Transition::Down && self.keycode != Keyboard::NoEventIndicated {
            keys.push(self.keycode);
        }
        keys
    }
}

pub trait HidReporter {
    type Error;

    fn send(&mut self, action: &ResolvedAction) -> Result<(), Self::Error>;
}

#[derive(Debug, Default)]
pub struct LogReporter {
    sent: usize,
}

impl LogReporter {
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl HidReporter for LogReporter {
    type Error = core::convert::Infallible;

    fn send(&mut self, action: &ResolvedAction) -> Result<(), Self::Error> {
        self.sent += 1;
        info!(
            "report #{}: modifiers={:#04x} {:?} {:?}",
            self.sent,
            action.modifiers.into_bits(),
            action.keycode,
            action.transition
        );
        Ok(())
    }
}
