use thiserror::Error;

/// Rejected configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },

    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{0} must be at least 1")]
    Zero(&'static str),

    #[error("a {columns}x{rows} board of {cell_size}px cells exceeds the pixel coordinate range")]
    BoardTooLarge {
        columns: usize,
        rows: usize,
        cell_size: i32,
    },

    #[error("start cell ({column}, {row}) lies outside the {columns}x{rows} grid")]
    StartOutsideGrid {
        column: usize,
        row: usize,
        columns: usize,
        rows: usize,
    },
}
