use crate::*;
pub use random::*;

mod random;

pub trait GridGenerator {
    fn generate(self, config: BoardConfig) -> Grid;
}

/// Whether a generated grid must admit a sequence of moves that wins.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StartPolicy {
    #[default]
    Random,
    Solvable,
}
