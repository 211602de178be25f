use serde::{Deserialize, Serialize};

use crate::*;

pub const MIN_WIDTH: Coord = 3;
pub const MIN_HEIGHT: Coord = 3;
pub const MAX_WIDTH: Coord = 50;
pub const MAX_HEIGHT: Coord = 50;

/// Cells kept free of mines around the first click: the click itself plus its 8 neighbors.
pub const OPENING_CELLS: CellCount = 9;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Everything needed to lay out a new board.
///
/// Missing fields fall back to [`BoardConfig::default`] when deserializing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    /// Keep regenerating until the board can be finished without guessing.
    pub guess_free: bool,
    /// Cap on generate-then-solve rounds when `guess_free` is set.
    pub max_attempts: u32,
}

impl BoardConfig {
    pub const fn new(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
            guess_free: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub const fn beginner() -> Self {
        Self::new(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new(30, 16, 99)
    }

    pub const fn with_guess_free(self, guess_free: bool) -> Self {
        Self { guess_free, ..self }
    }

    pub const fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Checks that the board fits the size limits and leaves room for a safe opening.
    pub fn validate(&self) -> Result<()> {
        if self.mines > self.total_cells().saturating_sub(OPENING_CELLS) {
            return Err(GameError::TooManyMines);
        }
        if self.mines < 1 {
            return Err(GameError::TooFewMines);
        }
        if self.width < MIN_WIDTH {
            return Err(GameError::TooFewColumns);
        }
        if self.height < MIN_HEIGHT {
            return Err(GameError::TooFewRows);
        }
        if self.height > MAX_HEIGHT {
            return Err(GameError::TooManyRows);
        }
        if self.width > MAX_WIDTH {
            return Err(GameError::TooManyColumns);
        }
        if self.max_attempts == 0 {
            return Err(GameError::ZeroAttempts);
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::beginner()
    }
}
