use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, rows and columns.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Address of a cell, `row` in `0..height` and `col` in `0..width`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: Coord,
    pub col: Coord,
}

impl Position {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Whether `other` lies in the 3x3 block centered on this position, the position itself
    /// included.
    pub const fn is_within_one(self, other: Position) -> bool {
        self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self::new(row, col)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Position {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.col.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, position: Position) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, position: Position) -> NeighborIter {
        // arrays in this crate are only ever shaped from `Coord` dimensions
        let (rows, cols) = self.dim();
        NeighborIter::new(position, (rows as Coord, cols as Coord))
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `position`, returning a value only when it remains inside `(rows, cols)`.
fn apply_delta(position: Position, delta: (i8, i8), bounds: (Coord, Coord)) -> Option<Position> {
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let row = position.row.checked_add_signed(d_row)?;
    if row >= rows {
        return None;
    }

    let col = position.col.checked_add_signed(d_col)?;
    if col >= cols {
        return None;
    }

    Some(Position::new(row, col))
}

/// Walks the in-bounds part of the 8-neighborhood of a position.
#[derive(Debug)]
pub struct NeighborIter {
    center: Position,
    bounds: (Coord, Coord),
    index: u8,
}

impl NeighborIter {
    /// `bounds` is `(rows, cols)`, i.e. `(height, width)`.
    pub fn new(center: Position, bounds: (Coord, Coord)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new(Position::new(0, 0), (4, 5)).collect();

        assert_eq!(
            neighbors,
            [Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn far_edge_is_clipped() {
        let count = NeighborIter::new(Position::new(3, 2), (4, 5)).count();

        assert_eq!(count, 5);
    }

    #[test]
    fn within_one_covers_the_block() {
        let center = Position::new(4, 4);

        assert!(center.is_within_one(center));
        assert!(center.is_within_one(Position::new(3, 5)));
        assert!(!center.is_within_one(Position::new(2, 4)));
        assert!(!center.is_within_one(Position::new(4, 6)));
    }
}
