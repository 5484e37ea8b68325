use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Lights each cell independently with the configured chance.
///
/// With [`StartPolicy::Solvable`] unwinnable samples are redrawn a bounded
/// number of times, after which the last sample is fixed up with
/// [`make_solvable`]. Sizes with a large quiet-pattern space, where almost no
/// random grid can be won, still end up winnable.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
    policy: StartPolicy,
}

impl RandomGridGenerator {
    /// Samples drawn for [`StartPolicy::Solvable`] before falling back to
    /// [`make_solvable`].
    pub const MAX_SOLVABLE_ATTEMPTS: u32 = 16;

    pub fn new(seed: u64, policy: StartPolicy) -> Self {
        Self { seed, policy }
    }

    fn sample(rng: &mut SmallRng, config: BoardConfig) -> Grid {
        let config = BoardConfig::new(config.size, config.chance_light_starts_on);
        let chance = config.chance_light_starts_on;
        let cells = Array2::from_shape_fn(config.size.to_nd_index(), |_| rng.random_bool(chance));
        // `BoardConfig::new` keeps both axes within 1..=Coord::MAX
        Grid::from_cells(cells).unwrap_or_else(|_| Grid::filled(config.size, false))
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: BoardConfig) -> Grid {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut grid = Self::sample(&mut rng, config);
        log::debug!(
            "Generated {:?} grid with {} of {} lights on",
            grid.size(),
            grid.lit_count(),
            grid.total_cells()
        );

        if self.policy == StartPolicy::Solvable {
            let mut attempts = 1;
            while !analyze(&grid).is_solvable() {
                if attempts >= Self::MAX_SOLVABLE_ATTEMPTS {
                    log::debug!(
                        "No solvable sample after {} attempts, fixing up the last one",
                        attempts
                    );
                    grid = make_solvable(&grid);
                    break;
                }
                grid = Self::sample(&mut rng, config);
                attempts += 1;
            }
            log::debug!("Solvable policy used {} attempt(s)", attempts);
        }

        grid
    }
}
