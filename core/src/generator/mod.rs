use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: &DifficultyConfig) -> Board;
}

/// How much room the generator keeps around the first-revealed cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SafeStart {
    /// No exclusion, a mine may land anywhere.
    Anywhere,
    /// The start cell itself stays mine-free.
    Cell,
    /// The full 3x3 neighborhood around the start stays mine-free, so the
    /// first reveal always floods open.
    Zone,
}
