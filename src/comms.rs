//! Split link over a UART: subordinate to primary only, one byte per
//! transition, no acknowledgment. A byte lost on the wire is not detected.

use alloc::collections::VecDeque;

use embedded_hal::serial::{Read, Write};
use log::warn;

use crate::event::KeyEvent;

// Errored bytes skipped per read, one RP2040 UART FIFO.
const MAX_SKIPPED: usize = 32;

pub trait LinkReceiver {
    /// Next buffered byte, `None` when nothing is waiting. Never blocks.
    fn try_read(&mut self) -> Option<u8>;
}

impl<L: LinkReceiver + ?Sized> LinkReceiver for &mut L {
    fn try_read(&mut self) -> Option<u8> {
        (**self).try_read()
    }
}

impl LinkReceiver for VecDeque<u8> {
    fn try_read(&mut self) -> Option<u8> {
        self.pop_front()
    }
}

/// Every byte buffered right now.
pub fn drain<L: LinkReceiver + ?Sized>(link: &mut L) -> impl Iterator<Item = u8> + '_ {
    core::iter::from_fn(move || link.try_read())
}

pub struct ComLink<S> {
    serial: S,
    errors: u32,
}

impl<S> ComLink<S> {
    pub fn new(serial: S) -> Self {
        ComLink { serial, errors: 0 }
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn free(self) -> S {
        self.serial
    }
}

impl<S> LinkReceiver for ComLink<S>
where
    S: Read<u8>,
{
    fn try_read(&mut self) -> Option<u8> {
        // Framing/overrun errors consume the bad byte, skip over them.
        for _ in 0..MAX_SKIPPED {
            match self.serial.read() {
                Ok(byte) => return Some(byte),
                Err(nb::Error::WouldBlock) => return None,
                Err(nb::Error::Other(_)) => {
                    self.errors += 1;
                    warn!("Link read error, byte dropped");
                }
            }
        }
        None
    }
}

impl<S> ComLink<S>
where
    S: Write<u8>,
{
    /// Encodes and writes one transition. Waits for FIFO space only.
    pub fn send(&mut self, event: KeyEvent) {
        if nb::block!(self.serial.write(event.encode())).is_err() {
            self.errors += 1;
            warn!("Link write failed, {:?} lost", event);
        }
    }
}
