pub struct Debouncer<const ROWS: usize, const COLS: usize> {
    threshold: u8,
    state: [[bool; COLS]; ROWS],
    counters: [[u8; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> Debouncer<ROWS, COLS> {
    pub const fn new(threshold: u8) -> Self {
        Debouncer {
            threshold,
            state: [[false; COLS]; ROWS],
            counters: [[0; COLS]; ROWS],
        }
    }

    pub fn update(&mut self, raw: &[[bool; COLS]; ROWS]) -> &[[bool; COLS]; ROWS] {
        for row in 0..ROWS {
            for col in 0..COLS {
                if raw[row][col] == self.state[row][col] {
                    self.counters[row][col] = 0;
                } else {
                    self.counters[row][col] += 1;
                    if self.counters[row][col] >= self.threshold {
                        self.state[row][col] = raw[row][col];
                        self.counters[row][col] = 0;
                    }
                }
            }
        }
        &self.state
    }

    pub fn state(&self) -> &[[bool; COLS]; ROWS] {
        &self.state
    }
}
