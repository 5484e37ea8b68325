use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
use gf2::Affine;

mod gf2;

/// Cells to activate, once each and in any order, to light the whole grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    presses: Array2<bool>,
}

impl Solution {
    pub fn contains(&self, coords: Coord2) -> bool {
        self.presses[coords.to_nd_index()]
    }

    pub fn press_count(&self) -> CellCount {
        self.presses.iter().filter(|&&press| press).count() as CellCount
    }

    pub fn is_empty(&self) -> bool {
        self.presses.iter().all(|&press| !press)
    }

    /// Presses in row-major order.
    pub fn presses(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.presses
            .indexed_iter()
            .filter(|&(_, &press)| press)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn apply_to(&self, grid: &Grid) -> Result<Grid> {
        self.presses()
            .try_fold(grid.clone(), |grid, coords| grid.toggled_around(coords))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    solution: Option<Solution>,
    nullity: usize,
}

impl Analysis {
    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// First press of the solution, if any is still needed.
    pub fn hint(&self) -> Option<Coord2> {
        self.solution.as_ref()?.presses().next()
    }

    /// Number of independent press patterns that leave every light unchanged.
    ///
    /// Only one in `2^nullity` grids of this size can be won.
    pub fn nullity(&self) -> usize {
        self.nullity
    }
}

/// Light chasing: presses on the first row are left as unknowns and every
/// later press is forced, `(row, col)` must be pressed exactly when
/// `(row - 1, col)` is still unlit after the rows above were handled.
struct Chase {
    presses: Array2<Affine>,
    /// One form per cell of the last row, the grid is won when all are 0.
    equations: Vec<Affine>,
}

impl Chase {
    fn new(grid: &Grid) -> Self {
        let (rows, cols) = grid.size();
        let bounds = (rows, cols);

        let mut state = grid.cells().map(|&lit| Affine::constant(lit));
        let mut presses = Array2::<Affine>::default(state.dim());

        for row in 0..rows {
            for col in 0..cols {
                let press = if row == 0 {
                    Affine::var(col.into())
                } else {
                    !state[(row - 1, col).to_nd_index()]
                };
                presses[(row, col).to_nd_index()] = press;
                for pos in FlipSetIter::new((row, col), bounds) {
                    state[pos.to_nd_index()] ^= press;
                }
            }
        }

        let equations = (0..cols)
            .map(|col| !state[(rows - 1, col).to_nd_index()])
            .collect();

        Self { presses, equations }
    }

    fn reduce(&self) -> gf2::Reduced {
        gf2::reduce(self.equations.clone(), self.equations.len())
    }
}

/// Finds presses that light the whole grid, by chasing lights down the rows.
///
/// What remains after the chase is one equation per cell of the last row,
/// solved over GF(2). Among several solutions the one with no free first-row
/// presses is returned, it is not necessarily the shortest.
pub fn analyze(grid: &Grid) -> Analysis {
    let chase = Chase::new(grid);
    let reduced = chase.reduce();
    let nullity = chase.equations.len() - reduced.rank;

    let solution = reduced.consistent.then(|| Solution {
        presses: chase.presses.map(|press| press.eval(&reduced.assignment)),
    });
    log::debug!(
        "Analyzed {:?} grid: solvable {}, nullity {}",
        grid.size(),
        solution.is_some(),
        nullity
    );

    Analysis { solution, nullity }
}

/// Returns `grid` if it can be won, otherwise a copy with some last-row
/// cells inverted so that it can.
///
/// A last-row cell only enters its own equation of the chase, so inverting it
/// flips that equation's constant and nothing else. The cells inverted are the
/// ones whose equation the pivot assignment leaves unsatisfied.
pub fn make_solvable(grid: &Grid) -> Grid {
    let chase = Chase::new(grid);
    let reduced = chase.reduce();
    if reduced.consistent {
        return grid.clone();
    }

    let last_row = grid.nrows() - 1;
    let mut cells = grid.cells().clone();
    for (col, equation) in chase.equations.iter().enumerate() {
        if equation.eval(&reduced.assignment) {
            let cell = &mut cells[[usize::from(last_row), col]];
            *cell = !*cell;
        }
    }
    log::debug!("Inverted last-row cells to make {:?} grid solvable", grid.size());

    Grid::from_cells(cells).unwrap_or_else(|_| grid.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    fn assert_solution_wins(grid: &Grid) {
        let analysis = analyze(grid);
        let solution = analysis.solution().unwrap();

        assert!(solution.apply_to(grid).unwrap().all_lit());
    }

    #[test]
    fn won_grid_needs_no_presses() {
        let analysis = analyze(&Grid::filled((5, 5), true));

        assert!(analysis.solution().unwrap().is_empty());
        assert_eq!(analysis.hint(), None);
    }

    #[test]
    fn single_press_is_found() {
        let start = Grid::filled((3, 3), true).toggled_around((1, 2)).unwrap();

        let analysis = analyze(&start);
        let solution = analysis.solution().unwrap();

        assert_eq!(solution.press_count(), 1);
        assert!(solution.contains((1, 2)));
        assert_eq!(analysis.hint(), Some((1, 2)));
    }

    #[test]
    fn three_by_three_is_always_solvable() {
        for mask in 0u16..(1 << 9) {
            let cells =
                Array2::from_shape_fn((3, 3), |(row, col)| (mask >> (row * 3 + col)) & 1 == 1);
            let start = Grid::from_cells(cells).unwrap();

            assert_solution_wins(&start);
            assert_eq!(analyze(&start).nullity(), 0);
        }
    }

    #[test]
    fn known_nullities() {
        assert_eq!(analyze(&Grid::filled((4, 4), false)).nullity(), 4);
        assert_eq!(analyze(&Grid::filled((5, 5), false)).nullity(), 2);
        assert_eq!(analyze(&Grid::filled((1, 1), false)).nullity(), 0);
    }

    #[test]
    fn five_by_five_with_one_dark_corner_is_unsolvable() {
        let start = grid(
            "
            .OOOO
            OOOOO
            OOOOO
            OOOOO
            OOOOO
            ",
        );

        let analysis = analyze(&start);

        assert!(!analysis.is_solvable());
        assert_eq!(analysis.hint(), None);
    }

    #[test]
    fn generated_solvable_grids_are_won_by_their_solution() {
        for (size, seed) in [((5, 5), 1), ((4, 7), 2), ((9, 2), 3), ((1, 6), 4)] {
            let config = BoardConfig::new(size, 0.5);
            let start = RandomGridGenerator::new(seed, StartPolicy::Solvable).generate(config);

            assert_solution_wins(&start);
        }
    }

    #[test]
    fn make_solvable_only_touches_the_last_row() {
        let start = grid(
            "
            .OOOO
            OOOOO
            OOOOO
            OOOOO
            OOOOO
            ",
        );

        let repaired = make_solvable(&start);

        assert_solution_wins(&repaired);
        for row in 0..4 {
            for col in 0..5 {
                assert_eq!(repaired[(row, col)], start[(row, col)]);
            }
        }
    }

    #[test]
    fn make_solvable_keeps_solvable_grids() {
        let start = Grid::filled((4, 4), true).toggled_around((2, 1)).unwrap();

        assert_eq!(make_solvable(&start), start);
    }

    #[test]
    fn make_solvable_handles_high_nullity_sizes() {
        for size in [(4, 4), (9, 9), (19, 19)] {
            let config = BoardConfig::new(size, 0.4);
            for seed in 0..10 {
                let start = RandomGridGenerator::new(seed, StartPolicy::Random).generate(config);
                let repaired = make_solvable(&start);

                assert_eq!(repaired.size(), size);
                assert_solution_wins(&repaired);
            }
        }
    }

    #[test]
    fn wide_rows_use_every_unknown() {
        let start = Grid::filled((2, 200), true).toggled_around((1, 150)).unwrap();

        assert_solution_wins(&start);
    }
}
