use serde::{Deserialize, Serialize};

use crate::*;

/// A single game: the configuration it was started with and the current grid.
///
/// The current grid is only ever replaced, never edited, so a snapshot taken
/// with [`GameBoard::grid`] and cloned before a move keeps its contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SavedBoard")]
pub struct GameBoard {
    config: BoardConfig,
    grid: Grid,
    move_count: u32,
}

#[derive(Deserialize)]
struct SavedBoard {
    config: BoardConfig,
    grid: Grid,
    move_count: u32,
}

impl TryFrom<SavedBoard> for GameBoard {
    type Error = LightsOutError;

    fn try_from(saved: SavedBoard) -> Result<Self> {
        if saved.config.size != saved.grid.size() {
            return Err(LightsOutError::InvalidBoardShape);
        }
        Ok(Self {
            config: saved.config,
            grid: saved.grid,
            move_count: saved.move_count,
        })
    }
}

impl GameBoard {
    pub fn new<G: GridGenerator>(config: BoardConfig, generator: G) -> Self {
        let grid = generator.generate(config);
        Self {
            config,
            grid,
            move_count: 0,
        }
    }

    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        Self::new(config, RandomGridGenerator::new(seed, StartPolicy::Random))
    }

    /// Starts from an explicit grid, the chance of the default config is kept.
    pub fn from_grid(grid: Grid) -> Self {
        let config = BoardConfig {
            size: grid.size(),
            ..Default::default()
        };
        Self {
            config,
            grid,
            move_count: 0,
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> bool {
        self.grid[coords]
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn has_won(&self) -> bool {
        self.grid.all_lit()
    }

    pub fn toggle_around(&mut self, coords: Coord2) -> Result<ToggleOutcome> {
        self.check_not_won()?;

        self.grid = self.grid.toggled_around(coords)?;
        self.move_count = self.move_count.saturating_add(1);

        Ok(if self.has_won() {
            log::debug!("Board won after {} moves", self.move_count);
            ToggleOutcome::Won
        } else {
            ToggleOutcome::Toggled
        })
    }

    /// Throws away the current grid and generates a new one for the same config.
    pub fn restart<G: GridGenerator>(&mut self, generator: G) {
        self.grid = generator.generate(self.config);
        self.move_count = 0;
    }

    pub fn analyze(&self) -> Analysis {
        analyze(&self.grid)
    }

    fn check_not_won(&self) -> Result<()> {
        if self.has_won() {
            Err(LightsOutError::AlreadyWon)
        } else {
            Ok(())
        }
    }
}
