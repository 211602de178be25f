use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Set of mine positions on a board of a given size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn empty(width: Coord, height: Coord) -> Self {
        Self {
            mine_mask: Array2::default([usize::from(height), usize::from(width)]),
            mine_count: 0,
        }
    }

    pub fn from_mine_positions(width: Coord, height: Coord, mines: &[Position]) -> Result<Self> {
        let mut layout = Self::empty(width, height);

        for &position in mines {
            layout.validate_position(position)?;
            layout.insert(position);
        }

        Ok(layout)
    }

    pub fn validate_position(&self, position: Position) -> Result<Position> {
        if position.row < self.height() && position.col < self.width() {
            Ok(position)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Places a mine, returns `false` if one was already there.
    pub fn insert(&mut self, position: Position) -> bool {
        let slot = &mut self.mine_mask[position.to_nd_index()];
        if *slot {
            return false;
        }
        *slot = true;
        self.mine_count += 1;
        true
    }

    pub fn width(&self) -> Coord {
        self.mine_mask.ncols() as Coord
    }

    pub fn height(&self) -> Coord {
        self.mine_mask.nrows() as Coord
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, position: Position) -> bool {
        self[position]
    }

    pub fn adjacent_mine_count(&self, position: Position) -> u8 {
        self.mine_mask
            .iter_neighbors(position)
            .filter(|&neighbor| self[neighbor])
            .count() as u8
    }

    /// Mine positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| Position::new(row as Coord, col as Coord))
    }
}

impl Index<Position> for MineLayout {
    type Output = bool;

    fn index(&self, position: Position) -> &Self::Output {
        &self.mine_mask[position.to_nd_index()]
    }
}
