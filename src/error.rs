use thiserror::Error;

/// Rejected configuration, reported once at construction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("action at ({row}, {col}) references layer {layer} which does not exist")]
    UnknownLayer { layer: u8, row: usize, col: usize },
    #[error("remote columns start at {remote_col_offset}, inside the {local_cols} local columns")]
    ColumnOverlap {
        local_cols: usize,
        remote_col_offset: usize,
    },
    #[error("split partition needs {cols} columns but the keymap has {keymap_cols}")]
    PartitionOutOfRange { cols: usize, keymap_cols: usize },
    #[error("split partition needs {rows} rows but the keymap has {keymap_rows}")]
    RowsOutOfRange { rows: usize, keymap_rows: usize },
}
