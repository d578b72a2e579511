use alloc::vec::Vec;

use usbd_human_interface_device::page::Keyboard;

use crate::clock::{Clock, Instant};
use crate::comms::LinkReceiver;
use crate::config::KeyboardConfig;
use crate::engine::{KeyAction, LayerEngine};
use crate::error::Error;
use crate::event::KeyEvent;
use crate::flags::FlagDecoder;
use crate::keymap::{Keymap, Layer};
use crate::merger::MatrixMerger;
use crate::report::{ResolvedAction, Transition};

pub struct SplitKeyboard<'a, L, const ROWS: usize, const COLS: usize, const LAYERS: usize> {
    merger: MatrixMerger<L>,
    engine: LayerEngine<'a, ROWS, COLS, LAYERS>,
    flags: FlagDecoder<'a>,
    events: Vec<KeyEvent>,
    actions: Vec<KeyAction>,
}

impl<'a, L, const ROWS: usize, const COLS: usize, const LAYERS: usize> SplitKeyboard<'a, L, ROWS, COLS, LAYERS>
where
    L: LinkReceiver,
{
    pub fn new(
        layers: &'a [Layer<ROWS, COLS>; LAYERS],
        link: L,
        config: KeyboardConfig,
    ) -> Result<Self, Error> {
        Self::with_flags(layers, link, config, FlagDecoder::default())
    }

    pub fn with_flags(
        layers: &'a [Layer<ROWS, COLS>; LAYERS],
        link: L,
        config: KeyboardConfig,
        flags: FlagDecoder<'a>,
    ) -> Result<Self, Error> {
        let keymap = Keymap::new(layers)?;
        let merger = MatrixMerger::new(link, config.split, ROWS, COLS)?;
        Ok(SplitKeyboard {
            merger,
            engine: LayerEngine::new(keymap, config.tap_hold),
            flags,
            events: Vec::new(),
            actions: Vec::new(),
        })
    }

    pub fn engine(&self) -> &LayerEngine<'a, ROWS, COLS, LAYERS> {
        &self.engine
    }

    pub fn link(&mut self) -> &mut L {
        self.merger.link()
    }

    /// Runs one tick at `now` and returns the reports to send, in order.
    pub fn tick<I>(&mut self, now: Instant, local: I) -> Vec<ResolvedAction>
    where
        I: IntoIterator<Item = KeyEvent>,
    {
        self.events.clear();
        self.actions.clear();

        self.merger.merge(local, &mut self.events);
        self.engine.poll(now, &mut self.actions);
        for event in self.events.iter() {
            self.engine.process(*event, now, &mut self.actions);
        }

        self.actions.iter().map(|action| self.expand(action)).collect()
    }

    pub fn tick_with<C, I>(&mut self, clock: &C, local: I) -> Vec<ResolvedAction>
    where
        C: Clock,
        I: IntoIterator<Item = KeyEvent>,
    {
        self.tick(clock.now(), local)
    }

    fn expand(&self, action: &KeyAction) -> ResolvedAction {
        let (flag_modifiers, keycode) = self.flags.expand(action.code);
        // Flag modifiers belong to the key press only.
        let modifiers = match action.transition {
            Transition::Down => action.modifiers | flag_modifiers,
            Transition::Up => action.modifiers,
        };
        ResolvedAction {
            modifiers,
            keycode: Keyboard::from(keycode),
            transition: action.transition,
        }
    }
}
