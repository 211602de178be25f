use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// What a cell holds once mines have been laid out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    /// Safe cell with the number of mines among its surroundings.
    Empty(u8),
    Mine,
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Empty(count) => Some(count),
            Self::Mine => None,
        }
    }
}

/// Player-visible marks on a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub revealed: bool,
    pub flagged: bool,
}

impl CellState {
    /// Neither revealed nor flagged.
    pub const fn is_hidden(self) -> bool {
        !self.revealed && !self.flagged
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    position: Position,
    surroundings: SmallVec<[Position; 8]>,
    value: Option<CellValue>,
    state: CellState,
}

impl Cell {
    pub(crate) fn new(position: Position, surroundings: SmallVec<[Position; 8]>) -> Self {
        Self {
            position,
            surroundings,
            value: None,
            state: CellState::default(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// In-bounds neighbors, computed once when the grid is created.
    pub fn surroundings(&self) -> &[Position] {
        &self.surroundings
    }

    /// `None` until mines have been laid out.
    pub fn value(&self) -> Option<CellValue> {
        self.value
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_mine(&self) -> bool {
        self.value.is_some_and(CellValue::is_mine)
    }

    pub fn count(&self) -> Option<u8> {
        self.value.and_then(CellValue::count)
    }

    /// The number shown on a revealed safe cell.
    pub fn shown_count(&self) -> Option<u8> {
        self.count().filter(|_| self.state.revealed)
    }

    pub(crate) fn set_value(&mut self, value: CellValue) {
        debug_assert!(self.value.is_none(), "cell values are assigned once");
        self.value = Some(value);
    }

    pub(crate) fn reveal(&mut self) {
        self.state.revealed = true;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        self.state.flagged = flagged;
    }
}
