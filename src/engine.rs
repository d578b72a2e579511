//! Layer stack and tap-hold resolution.
//!
//! The engine sees logical-matrix transitions with a timestamp and turns them
//! into key-down/key-up actions. Dual-role keys (`LayerTap`, `ModTap`) stay
//! pending until one of:
//!
//! - release within the tap threshold: tap, the tap keycode is pressed and
//!   released at once
//! - the threshold elapses (checked by [`LayerEngine::poll`]): hold
//! - any other key is pressed: hold, committed before that key is resolved

use alloc::vec::Vec;

use log::{debug, warn};
use smallvec::SmallVec;
use usbd_human_interface_device::page::Keyboard;

use crate::action::{Action, HoldEffect};
use crate::clock::Instant;
use crate::config::TapHoldConfig;
use crate::event::{KeyEvent, KeyPosition};
use crate::keycode::Modifiers;
use crate::keymap::Keymap;
use crate::report::Transition;

/// Engine output, flag bits still packed in `code`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyAction {
    pub modifiers: Modifiers,
    pub code: u16,
    pub transition: Transition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPhase {
    Idle,
    /// Plain key, modifier key or momentary layer held.
    Pressed,
    Pending,
    ResolvedHold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyState {
    Idle,
    // The code resolved at press, replayed on release whatever the layers are by then.
    Pressed(u16),
    Modifier(Modifiers),
    Momentary,
    Pending {
        hold: HoldEffect,
        tap: Keyboard,
        since: Instant,
    },
    Hold(HoldEffect),
}

// Entries are keyed by the position that pushed them, so the same layer or
// modifier pushed from two keys stays active until both are released.
#[derive(Clone, Copy, Debug)]
struct LayerEntry {
    source: KeyPosition,
    layer: u8,
}

#[derive(Clone, Copy, Debug)]
struct ModifierEntry {
    source: KeyPosition,
    modifiers: Modifiers,
}

pub struct LayerEngine<'a, const ROWS: usize, const COLS: usize, const LAYERS: usize> {
    keymap: Keymap<'a, ROWS, COLS, LAYERS>,
    config: TapHoldConfig,
    keys: [[KeyState; COLS]; ROWS],
    layers: SmallVec<[LayerEntry; 8]>,
    modifiers: SmallVec<[ModifierEntry; 8]>,
    // Pending tap-hold positions in press order.
    pending: SmallVec<[KeyPosition; 4]>,
}

impl<'a, const ROWS: usize, const COLS: usize, const LAYERS: usize> LayerEngine<'a, ROWS, COLS, LAYERS> {
    pub fn new(keymap: Keymap<'a, ROWS, COLS, LAYERS>, config: TapHoldConfig) -> Self {
        LayerEngine {
            keymap,
            config,
            keys: [[KeyState::Idle; COLS]; ROWS],
            layers: SmallVec::new(),
            modifiers: SmallVec::new(),
            pending: SmallVec::new(),
        }
    }

    /// Back to the boot state: layer 0 only, nothing held or pending.
    pub fn reset(&mut self) {
        self.keys = [[KeyState::Idle; COLS]; ROWS];
        self.layers.clear();
        self.modifiers.clear();
        self.pending.clear();
    }

    /// Active layers in activation order, layer 0 first.
    pub fn active_layers(&self) -> impl DoubleEndedIterator<Item = u8> + '_ {
        core::iter::once(0).chain(self.layers.iter().map(|entry| entry.layer))
    }

    pub fn is_layer_active(&self, layer: u8) -> bool {
        layer == 0 || self.layers.iter().any(|entry| entry.layer == layer)
    }

    /// Modifiers currently held by modifier keys and committed mod-taps.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
            .iter()
            .fold(Modifiers::NONE, |acc, entry| acc | entry.modifiers)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn phase(&self, pos: KeyPosition) -> KeyPhase {
        match self.state(pos) {
            KeyState::Idle => KeyPhase::Idle,
            KeyState::Pending { .. } => KeyPhase::Pending,
            KeyState::Hold(_) => KeyPhase::ResolvedHold,
            KeyState::Pressed(_) | KeyState::Modifier(_) | KeyState::Momentary => KeyPhase::Pressed,
        }
    }

    /// Resolves `pos` against the current layer stack.
    pub fn resolve(&self, pos: KeyPosition) -> Action {
        self.keymap.resolve(self.active_layers(), pos)
    }

    pub fn process(&mut self, event: KeyEvent, now: Instant, out: &mut Vec<KeyAction>) {
        let pos = event.position();
        if !self.keymap.contains(pos) {
            warn!("Ignoring event outside the keymap: {:?}", event);
            return;
        }
        if event.pressed {
            self.press(pos, now, out);
        } else {
            self.release(pos, now, out);
        }
    }

    /// Commits every pending tap-hold whose threshold has passed.
    pub fn poll(&mut self, now: Instant, out: &mut Vec<KeyAction>) {
        let expired: SmallVec<[KeyPosition; 4]> = self
            .pending
            .iter()
            .copied()
            .filter(|pos| match self.state(*pos) {
                KeyState::Pending { since, .. } => self.is_hold(since, now),
                _ => false,
            })
            .collect();
        for pos in expired {
            debug!("Tap-hold ({}, {}) timed out", pos.row, pos.col);
            self.commit_hold(pos, out);
        }
    }

    fn press(&mut self, pos: KeyPosition, now: Instant, out: &mut Vec<KeyAction>) {
        if self.state(pos) != KeyState::Idle {
            // A lost release on the link. The next release clears it.
            debug!("Press on held key ({}, {}) ignored", pos.row, pos.col);
            return;
        }

        // Any other press decides every pending key as hold, so this key
        // already sees the new layer or modifier.
        self.commit_all_pending(out);

        let action = self.resolve(pos);
        if let Some((hold, tap)) = action.tap_hold() {
            self.set_state(pos, KeyState::Pending { hold, tap, since: now });
            self.pending.push(pos);
            return;
        }

        match action {
            Action::Transparent | Action::Plain(Keyboard::NoEventIndicated) => {}
            Action::MomentaryLayer(layer) => {
                self.set_state(pos, KeyState::Momentary);
                self.push_layer(pos, layer);
            }
            Action::Plain(key) => match Modifiers::from_keyboard(key) {
                Some(modifiers) => {
                    self.set_state(pos, KeyState::Modifier(modifiers));
                    self.push_modifiers(pos, modifiers);
                    out.push(self.modifier_report(Transition::Down));
                }
                None => self.key_down(pos, key as u16, out),
            },
            _ => {
                if let Some(code) = action.raw_code() {
                    self.key_down(pos, code, out);
                }
            }
        }
    }

    fn key_down(&mut self, pos: KeyPosition, code: u16, out: &mut Vec<KeyAction>) {
        self.set_state(pos, KeyState::Pressed(code));
        out.push(KeyAction {
            modifiers: self.modifiers(),
            code,
            transition: Transition::Down,
        });
    }

    fn release(&mut self, pos: KeyPosition, now: Instant, out: &mut Vec<KeyAction>) {
        match self.state(pos) {
            KeyState::Idle => {
                debug!("Release on idle key ({}, {}) ignored", pos.row, pos.col);
            }
            KeyState::Pressed(code) => {
                out.push(KeyAction {
                    modifiers: self.modifiers(),
                    code,
                    transition: Transition::Up,
                });
            }
            KeyState::Modifier(_) => {
                self.pop_modifiers(pos);
                out.push(self.modifier_report(Transition::Up));
            }
            KeyState::Momentary => self.pop_layer(pos),
            KeyState::Pending { hold, tap, since } => {
                if self.is_hold(since, now) {
                    // Timed out but not polled yet.
                    self.commit_hold(pos, out);
                    self.release_hold(pos, hold, out);
                } else {
                    debug!("Tap ({}, {}) -> {:?}", pos.row, pos.col, tap);
                    self.pending.retain(|p| *p != pos);
                    let modifiers = self.modifiers();
                    for transition in [Transition::Down, Transition::Up] {
                        out.push(KeyAction {
                            modifiers,
                            code: tap as u16,
                            transition,
                        });
                    }
                }
            }
            KeyState::Hold(hold) => self.release_hold(pos, hold, out),
        }
        self.set_state(pos, KeyState::Idle);
    }

    // Held for longer than the threshold. Exactly at the threshold is still a tap.
    fn is_hold(&self, since: Instant, now: Instant) -> bool {
        now.checked_duration_since(since)
            .is_some_and(|held| held > self.config.tap_threshold)
    }

    fn commit_all_pending(&mut self, out: &mut Vec<KeyAction>) {
        let pending = core::mem::take(&mut self.pending);
        for pos in pending {
            debug!("Tap-hold ({}, {}) interrupted", pos.row, pos.col);
            self.commit_hold(pos, out);
        }
    }

    fn commit_hold(&mut self, pos: KeyPosition, out: &mut Vec<KeyAction>) {
        let KeyState::Pending { hold, .. } = self.state(pos) else {
            return;
        };
        self.pending.retain(|p| *p != pos);
        self.set_state(pos, KeyState::Hold(hold));
        debug!("Hold ({}, {}) -> {:?}", pos.row, pos.col, hold);
        match hold {
            HoldEffect::Layer(layer) => self.push_layer(pos, layer),
            HoldEffect::Modifier(modifiers) => {
                self.push_modifiers(pos, modifiers);
                out.push(self.modifier_report(Transition::Down));
            }
        }
    }

    fn release_hold(&mut self, pos: KeyPosition, hold: HoldEffect, out: &mut Vec<KeyAction>) {
        match hold {
            HoldEffect::Layer(_) => self.pop_layer(pos),
            HoldEffect::Modifier(_) => {
                self.pop_modifiers(pos);
                out.push(self.modifier_report(Transition::Up));
            }
        }
    }

    fn modifier_report(&self, transition: Transition) -> KeyAction {
        KeyAction {
            modifiers: self.modifiers(),
            code: Keyboard::NoEventIndicated as u16,
            transition,
        }
    }

    fn push_layer(&mut self, source: KeyPosition, layer: u8) {
        debug!("Layer {} on from ({}, {})", layer, source.row, source.col);
        self.layers.push(LayerEntry { source, layer });
    }

    fn pop_layer(&mut self, source: KeyPosition) {
        if let Some(index) = self.layers.iter().rposition(|entry| entry.source == source) {
            let entry = self.layers.remove(index);
            debug!("Layer {} off from ({}, {})", entry.layer, source.row, source.col);
        }
    }

    fn push_modifiers(&mut self, source: KeyPosition, modifiers: Modifiers) {
        self.modifiers.push(ModifierEntry { source, modifiers });
    }

    fn pop_modifiers(&mut self, source: KeyPosition) {
        self.modifiers.retain(|entry| entry.source != source);
    }

    fn state(&self, pos: KeyPosition) -> KeyState {
        self.keys[pos.row as usize][pos.col as usize]
    }

    fn set_state(&mut self, pos: KeyPosition, state: KeyState) {
        self.keys[pos.row as usize][pos.col as usize] = state;
    }
}
