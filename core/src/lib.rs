#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use board::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use types::*;

mod analysis;
mod board;
mod error;
mod generator;
mod grid;
mod types;

/// Shape of a board and how likely each light is to start lit.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// `(nrows, ncols)`
    pub size: Coord2,
    pub chance_light_starts_on: f64,
}

impl BoardConfig {
    pub const DEFAULT_SIZE: Coord2 = (5, 5);
    pub const DEFAULT_CHANCE: f64 = 0.40;

    pub const fn new_unchecked(size: Coord2, chance_light_starts_on: f64) -> Self {
        Self {
            size,
            chance_light_starts_on,
        }
    }

    /// Both dimensions are clamped to at least 1, the chance to `[0, 1]`.
    pub fn new((nrows, ncols): Coord2, chance_light_starts_on: f64) -> Self {
        let nrows = nrows.clamp(1, Coord::MAX);
        let ncols = ncols.clamp(1, Coord::MAX);
        let chance = if chance_light_starts_on.is_nan() {
            0.0
        } else {
            chance_light_starts_on.clamp(0.0, 1.0)
        };
        Self::new_unchecked((nrows, ncols), chance)
    }

    pub const fn nrows(&self) -> Coord {
        self.size.0
    }

    pub const fn ncols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, Self::DEFAULT_CHANCE)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ToggleOutcome {
    Toggled,
    Won,
}

impl ToggleOutcome {
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}
