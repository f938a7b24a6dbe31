use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use rules::*;
pub use session::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod rules;
mod session;
mod types;

/// Grid dimensions and mine count for one difficulty tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl DifficultyConfig {
    pub(crate) const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Validates `0 < rows`, `0 < cols` and `mines < rows * cols`.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyGrid { rows, cols });
        }
        let total_cells = mult(rows, cols);
        if mines >= total_cells {
            return Err(GameError::TooManyMines { mines, total_cells });
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn in_bounds(&self, (row, col): Coord2) -> bool {
        row < self.rows && col < self.cols
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Which difficulty table a session resolves tiers against.
///
/// `Compact` shrinks every tier to a few cells so automated drivers can
/// finish games quickly. It is chosen explicitly at session construction,
/// never inferred from the environment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierSet {
    Standard,
    Compact,
}

impl TierSet {
    pub const fn config(self, difficulty: Difficulty) -> DifficultyConfig {
        use Difficulty::*;
        match (self, difficulty) {
            (Self::Standard, Easy) => DifficultyConfig::new_unchecked(9, 9, 10),
            (Self::Standard, Medium) => DifficultyConfig::new_unchecked(16, 16, 40),
            (Self::Standard, Hard) => DifficultyConfig::new_unchecked(16, 30, 99),
            (Self::Compact, Easy) => DifficultyConfig::new_unchecked(3, 3, 2),
            (Self::Compact, Medium) => DifficultyConfig::new_unchecked(4, 4, 3),
            (Self::Compact, Hard) => DifficultyConfig::new_unchecked(5, 5, 4),
        }
    }
}

impl Default for TierSet {
    fn default() -> Self {
        Self::Standard
    }
}

/// Outcome of a reveal action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the session.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
    Won,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
