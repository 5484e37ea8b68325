use alloc::vec::Vec;
use core::fmt::{self, Write};
use core::ops::Index;
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

pub const LIT_CHAR: char = 'O';
pub const UNLIT_CHAR: char = '.';

/// Lit/unlit state of every cell, indexed by `(row, col)`.
///
/// A grid always has between 1 and [`Coord::MAX`] rows and columns, and its
/// shape never changes. Transitions never touch an existing grid, they produce
/// a new one, so a clone kept around as a snapshot stays valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Array2<bool>", into = "Array2<bool>")]
pub struct Grid {
    cells: Array2<bool>,
}

impl Grid {
    pub fn from_cells(cells: Array2<bool>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        let max = usize::from(Coord::MAX);
        if !(1..=max).contains(&rows) || !(1..=max).contains(&cols) {
            return Err(LightsOutError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }

    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let ncols = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.iter().any(|row| row.as_ref().len() != ncols) {
            return Err(LightsOutError::InvalidBoardShape);
        }

        let flat: Vec<bool> = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        let cells = Array2::from_shape_vec((rows.len(), ncols), flat)
            .map_err(|_| LightsOutError::InvalidBoardShape)?;
        Self::from_cells(cells)
    }

    /// Uniform grid, empty dimensions are bumped to 1.
    pub fn filled((rows, cols): Coord2, lit: bool) -> Self {
        let size = (rows.max(1), cols.max(1));
        Self {
            cells: Array2::from_elem(size.to_nd_index(), lit),
        }
    }

    pub fn size(&self) -> Coord2 {
        // both axes fit in `Coord` by construction
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn nrows(&self) -> Coord {
        self.size().0
    }

    pub fn ncols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn cells(&self) -> &Array2<bool> {
        &self.cells
    }

    pub fn is_lit(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn lit_count(&self) -> CellCount {
        // at most 255 * 255
        self.cells.iter().filter(|&&lit| lit).count() as CellCount
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(LightsOutError::InvalidCoords)
        }
    }

    /// Positions affected by activating `coords`, clipped to the grid.
    pub fn flip_set(&self, coords: Coord2) -> FlipSetIter {
        self.cells.iter_flip_set(coords)
    }

    /// Returns a copy of this grid with the flip set of `coords` inverted.
    pub fn toggled_around(&self, coords: Coord2) -> Result<Self> {
        let coords = self.validate_coords(coords)?;

        let mut cells = self.cells.clone();
        for pos in self.flip_set(coords) {
            let cell = &mut cells[pos.to_nd_index()];
            *cell = !*cell;
        }
        log::trace!("Toggled around {:?}", coords);

        Ok(Self { cells })
    }

    pub fn all_lit(&self) -> bool {
        self.cells.iter().all(|&lit| lit)
    }
}

impl Index<Coord2> for Grid {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl TryFrom<Array2<bool>> for Grid {
    type Error = LightsOutError;

    fn try_from(cells: Array2<bool>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<Grid> for Array2<bool> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

/// One line per row, `O` for lit and `.` for unlit.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.rows().into_iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            for &lit in row {
                f.write_char(if lit { LIT_CHAR } else { UNLIT_CHAR })?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = LightsOutError;

    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        LIT_CHAR => Ok(true),
                        UNLIT_CHAR => Ok(false),
                        other => Err(LightsOutError::InvalidCharacter(other)),
                    })
                    .collect::<Result<Vec<bool>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_rows(&rows)
    }
}
