use crate::clock::Duration;
use crate::encoding::{MAX_COLS, MAX_ROWS};
use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TapHoldConfig {
    /// A dual-role key held longer than this resolves as hold.
    pub tap_threshold: Duration,
}

impl TapHoldConfig {
    pub const fn new() -> Self {
        TapHoldConfig {
            tap_threshold: Duration::millis(150),
        }
    }
}

impl Default for TapHoldConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitConfig {
    pub rows: usize,
    pub local_cols: usize,
    /// Remote columns as seen on the wire, `0..remote_cols`.
    pub remote_cols: usize,
    /// Remote column `c` lands on logical column `c + remote_col_offset`.
    pub remote_col_offset: usize,
    /// 8 data bits, no parity, one stop bit.
    pub baud_rate: u32,
}

impl SplitConfig {
    pub const fn new() -> Self {
        SplitConfig {
            rows: 4,
            local_cols: 6,
            remote_cols: 6,
            remote_col_offset: 6,
            baud_rate: 115_200,
        }
    }

    pub const fn total_cols(&self) -> usize {
        self.remote_col_offset + self.remote_cols
    }

    pub const fn is_local(&self, col: usize) -> bool {
        col < self.local_cols
    }

    pub const fn is_remote(&self, col: usize) -> bool {
        col >= self.remote_col_offset && col < self.total_cols()
    }

    pub fn validate(&self, rows: usize, cols: usize) -> Result<(), Error> {
        if self.remote_col_offset < self.local_cols {
            return Err(Error::ColumnOverlap {
                local_cols: self.local_cols,
                remote_col_offset: self.remote_col_offset,
            });
        }
        if self.total_cols() > cols || self.remote_cols > MAX_COLS {
            return Err(Error::PartitionOutOfRange {
                cols: self.total_cols(),
                keymap_cols: cols,
            });
        }
        if self.rows > rows || self.rows > MAX_ROWS {
            return Err(Error::RowsOutOfRange {
                rows: self.rows,
                keymap_rows: rows,
            });
        }
        Ok(())
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatrixConfig {
    /// Consecutive disagreeing scans before a key changes state.
    pub debounce_scans: u8,
    pub scan_period: Duration,
}

impl MatrixConfig {
    pub const fn new() -> Self {
        MatrixConfig {
            debounce_scans: 5,
            scan_period: Duration::millis(1),
        }
    }
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardConfig {
    pub tap_hold: TapHoldConfig,
    pub split: SplitConfig,
    pub matrix: MatrixConfig,
}

impl KeyboardConfig {
    pub const CORNE: KeyboardConfig = KeyboardConfig {
        tap_hold: TapHoldConfig::new(),
        split: SplitConfig::new(),
        matrix: MatrixConfig::new(),
    };
}
