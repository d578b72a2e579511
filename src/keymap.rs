use crate::action::Action;
use crate::error::Error;
use crate::event::KeyPosition;

pub type Layer<const ROWS: usize, const COLS: usize> = [[Action; COLS]; ROWS];

/// Read-only layer tables, fixed at initialization. Layer 0 is the default
/// layer and is always active.
#[derive(Clone, Copy)]
pub struct Keymap<'a, const ROWS: usize, const COLS: usize, const LAYERS: usize> {
    layers: &'a [Layer<ROWS, COLS>; LAYERS],
}

impl<'a, const ROWS: usize, const COLS: usize, const LAYERS: usize> Keymap<'a, ROWS, COLS, LAYERS> {
    pub fn new(layers: &'a [Layer<ROWS, COLS>; LAYERS]) -> Result<Self, Error> {
        for layer in layers.iter() {
            for (row, cells) in layer.iter().enumerate() {
                for (col, action) in cells.iter().enumerate() {
                    match action.layer() {
                        Some(target) if target as usize >= LAYERS => {
                            return Err(Error::UnknownLayer {
                                layer: target,
                                row,
                                col,
                            });
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(Keymap { layers })
    }

    pub fn contains(&self, pos: KeyPosition) -> bool {
        (pos.row as usize) < ROWS && (pos.col as usize) < COLS
    }

    pub fn action(&self, layer: u8, pos: KeyPosition) -> Option<Action> {
        self.layers
            .get(layer as usize)?
            .get(pos.row as usize)?
            .get(pos.col as usize)
            .copied()
    }

    /// Looks `pos` up through `active` layers (activation order), most recent
    /// first. The first non-transparent action wins, otherwise layer 0's.
    pub fn resolve<I>(&self, active: I, pos: KeyPosition) -> Action
    where
        I: IntoIterator<Item = u8>,
        I::IntoIter: DoubleEndedIterator,
    {
        active
            .into_iter()
            .rev()
            .filter_map(|layer| self.action(layer, pos))
            .find(|action| *action != Action::Transparent)
            .or_else(|| self.action(0, pos))
            .unwrap_or(Action::Transparent)
    }
}

#[cfg(test)]
mod tests {
    use usbd_human_interface_device::page::Keyboard;

    use super::*;
    use crate::action::{k, lt, mo, TRNS};

    static LAYERS: [Layer<1, 3>; 3] = [
        [[k(Keyboard::A), k(Keyboard::B), mo(2)]],
        [[k(Keyboard::Keyboard1), TRNS, TRNS]],
        [[TRNS, k(Keyboard::Keyboard2), TRNS]],
    ];

    #[test]
    fn transparent_falls_through_to_default_layer() {
        let keymap = Keymap::new(&LAYERS).unwrap();
        let pos = KeyPosition::new(0, 0);
        assert_eq!(keymap.resolve([0, 2], pos), k(Keyboard::A));
    }

    #[test]
    fn most_recent_layer_wins() {
        let keymap = Keymap::new(&LAYERS).unwrap();
        assert_eq!(keymap.resolve([0, 1, 2], KeyPosition::new(0, 0)), k(Keyboard::Keyboard1));
        assert_eq!(keymap.resolve([0, 2, 1], KeyPosition::new(0, 1)), k(Keyboard::Keyboard2));
        assert_eq!(keymap.resolve([0, 1], KeyPosition::new(0, 1)), k(Keyboard::B));
    }

    #[test]
    fn empty_stack_uses_default_layer() {
        let keymap = Keymap::new(&LAYERS).unwrap();
        assert_eq!(keymap.resolve([0u8; 0], KeyPosition::new(0, 2)), mo(2));
    }

    #[test]
    fn unknown_layer_is_rejected() {
        static BAD: [Layer<1, 2>; 2] = [[[k(Keyboard::A), lt(4, Keyboard::Space)]], [[TRNS, TRNS]]];
        assert_eq!(
            Keymap::new(&BAD).err(),
            Some(Error::UnknownLayer {
                layer: 4,
                row: 0,
                col: 1
            })
        );
    }

    #[test]
    fn out_of_range_position_has_no_action() {
        let keymap = Keymap::new(&LAYERS).unwrap();
        assert!(!keymap.contains(KeyPosition::new(1, 0)));
        assert_eq!(keymap.action(0, KeyPosition::new(0, 3)), None);
        assert_eq!(keymap.action(5, KeyPosition::new(0, 0)), None);
    }
}
