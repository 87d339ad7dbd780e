use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::state::Grid;
use crate::error::ConfigError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Side of one cell in pixels
    pub cell_size: i32,
    /// Column of the snake's head on reset
    pub start_column: usize,
    /// Row of the snake's head on reset
    pub start_row: usize,
    /// Simulation ticks per second
    pub ticks_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            cell_size: 20,
            start_column: 1,
            start_row: 1,
            ticks_per_second: 20,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height, self.cell_size)
    }

    /// Period between two ticks
    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.ticks_per_second)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 {
            return Err(ConfigError::Zero("grid_width"));
        }
        if self.grid_height == 0 {
            return Err(ConfigError::Zero("grid_height"));
        }
        if self.cell_size <= 0 {
            return Err(ConfigError::Zero("cell_size"));
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::Zero("ticks_per_second"));
        }
        if pixel_extent(self.grid_width, self.cell_size).is_none()
            || pixel_extent(self.grid_height, self.cell_size).is_none()
        {
            return Err(ConfigError::BoardTooLarge {
                columns: self.grid_width,
                rows: self.grid_height,
                cell_size: self.cell_size,
            });
        }
        if self.start_column >= self.grid_width || self.start_row >= self.grid_height {
            return Err(ConfigError::StartOutsideGrid {
                column: self.start_column,
                row: self.start_row,
                columns: self.grid_width,
                rows: self.grid_height,
            });
        }
        Ok(())
    }
}

/// Pixel span of `cells` plus one cell of margin on each side
///
/// A head that has already left the board is still stepped once more when the
/// agent encodes the fatal tick, so coordinates reach one cell past the edge.
fn pixel_extent(cells: usize, cell_size: i32) -> Option<i32> {
    i32::try_from(cells).ok()?.checked_add(2)?.checked_mul(cell_size)
}

/// Period of a timer firing `ticks_per_second` times a second
pub fn tick_interval(ticks_per_second: u32) -> Duration {
    Duration::from_secs_f64(1.0 / ticks_per_second.max(1) as f64)
}
