use alloc::vec::Vec;

use log::warn;

use crate::comms::{drain, LinkReceiver};
use crate::config::SplitConfig;
use crate::encoding::decode;
use crate::error::Error;
use crate::event::KeyEvent;

pub struct MatrixMerger<L> {
    link: L,
    split: SplitConfig,
}

impl<L: LinkReceiver> MatrixMerger<L> {
    pub fn new(link: L, split: SplitConfig, rows: usize, cols: usize) -> Result<Self, Error> {
        split.validate(rows, cols)?;
        Ok(MatrixMerger { link, split })
    }

    pub fn link(&mut self) -> &mut L {
        &mut self.link
    }

    /// Every buffered remote byte first, in link order, then `local`.
    pub fn merge<I>(&mut self, local: I, out: &mut Vec<KeyEvent>)
    where
        I: IntoIterator<Item = KeyEvent>,
    {
        let split = self.split;
        for byte in drain(&mut self.link) {
            let event = decode(byte);
            if (event.row as usize) >= split.rows || (event.col as usize) >= split.remote_cols {
                warn!("Remote event outside the right half: {:?}", event);
                continue;
            }
            out.push(KeyEvent {
                col: event.col + split.remote_col_offset as u8,
                ..event
            });
        }
        for event in local {
            if (event.row as usize) >= split.rows || !split.is_local(event.col as usize) {
                warn!("Local event outside the left half: {:?}", event);
                continue;
            }
            out.push(event);
        }
    }
}
