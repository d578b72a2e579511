#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPosition {
    pub row: u8,
    pub col: u8,
}

impl KeyPosition {
    pub const fn new(row: u8, col: u8) -> Self {
        KeyPosition { row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn press(row: u8, col: u8) -> Self {
        KeyEvent {
            row,
            col,
            pressed: true,
        }
    }

    pub const fn release(row: u8, col: u8) -> Self {
        KeyEvent {
            row,
            col,
            pressed: false,
        }
    }

    pub const fn position(&self) -> KeyPosition {
        KeyPosition::new(self.row, self.col)
    }
}
