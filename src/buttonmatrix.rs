use embedded_hal::{
    blocking::delay::DelayUs,
    digital::v2::{InputPin, OutputPin},
};
use smallvec::SmallVec;

use crate::event::KeyEvent;

pub struct ButtonMatrix<OUTPIN, INPPIN, const COLS: usize, const ROWS: usize>
where
    OUTPIN: OutputPin,
    INPPIN: InputPin,
{
    pub rows: [OUTPIN; ROWS],
    pub cols: [INPPIN; COLS],
}

impl<OUTPIN, INPPIN, const COLS: usize, const ROWS: usize> ButtonMatrix<OUTPIN, INPPIN, COLS, ROWS>
where
    OUTPIN: OutputPin,
    INPPIN: InputPin,
{
    pub fn new(rows: [OUTPIN; ROWS], cols: [INPPIN; COLS]) -> Self {
        ButtonMatrix { rows, cols }
    }

    /// Raw switch states, `None` if a pin could not be driven or read.
    pub fn scan(&mut self, delay: &mut impl DelayUs<u32>) -> Option<[[bool; COLS]; ROWS]> {
        let mut pressed = [[false; COLS]; ROWS];

        for (ri, row_pin) in self.rows.iter_mut().enumerate() {
            row_pin.set_high().ok()?;
            delay.delay_us(10);

            for (ci, col_pin) in self.cols.iter_mut().enumerate() {
                if col_pin.is_high().ok()? {
                    pressed[ri][ci] = true;
                }
            }

            row_pin.set_low().ok()?;
        }
        Some(pressed)
    }
}

pub struct MatrixState<const ROWS: usize, const COLS: usize> {
    pressed: [[bool; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> Default for MatrixState<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLS: usize> MatrixState<ROWS, COLS> {
    pub const fn new() -> Self {
        MatrixState {
            pressed: [[false; COLS]; ROWS],
        }
    }

    pub fn is_pressed(&self, row: usize, col: usize) -> bool {
        self.pressed[row][col]
    }

    pub fn update(&mut self, new_state: &[[bool; COLS]; ROWS]) -> SmallVec<[KeyEvent; 8]> {
        let mut events = SmallVec::new();
        for ri in 0..ROWS {
            for ci in 0..COLS {
                if self.pressed[ri][ci] != new_state[ri][ci] {
                    events.push(KeyEvent {
                        row: ri as u8,
                        col: ci as u8,
                        pressed: new_state[ri][ci],
                    });
                }
            }
        }
        self.pressed = *new_state;
        events
    }
}
