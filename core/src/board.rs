use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Grid of cells with fixed dimensions, stored row-major and indexed by [`Position`].
///
/// Cloning a board gives a fully independent copy, which is what the solver works on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Hidden, unflagged cells without values, each with its precomputed surroundings.
    pub fn empty(width: Coord, height: Coord) -> Self {
        let bounds = (height, width);
        let cells = Array2::from_shape_fn(
            (usize::from(height), usize::from(width)),
            |(row, col)| {
                let position = Position::new(row as Coord, col as Coord);
                Cell::new(position, NeighborIter::new(position, bounds).collect())
            },
        );
        Self { cells }
    }

    /// Fresh grid with mines from `layout` and the count of adjacent mines on every other cell.
    pub fn from_layout(layout: &MineLayout) -> Self {
        let mut board = Self::empty(layout.width(), layout.height());
        for cell in board.cells.iter_mut() {
            let position = cell.position();
            let value = if layout.contains_mine(position) {
                CellValue::Mine
            } else {
                CellValue::Empty(layout.adjacent_mine_count(position))
            };
            cell.set_value(value);
        }
        board
    }

    /// Builds a board from a text picture, one row per line, whitespace ignored.
    ///
    /// - `#` hidden safe cell
    /// - `m` hidden mine
    /// - `F` flagged mine
    /// - `f` flagged safe cell
    /// - `*` revealed mine
    /// - `.` or `0`-`8` revealed safe cell, digits must match the computed count
    pub fn from_picture(picture: &str) -> Result<Self> {
        let rows: Vec<Vec<char>> = picture
            .lines()
            .map(|line| line.chars().filter(|ch| !ch.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(GameError::InvalidPicture);
        }
        let width = Coord::try_from(width).map_err(|_| GameError::InvalidPicture)?;
        let height = Coord::try_from(rows.len()).map_err(|_| GameError::InvalidPicture)?;

        let mut mines = Vec::new();
        for (row, line) in (0..height).zip(&rows) {
            for (col, &ch) in (0..width).zip(line) {
                if matches!(ch, 'm' | 'F' | '*') {
                    mines.push(Position::new(row, col));
                }
            }
        }

        let layout = MineLayout::from_mine_positions(width, height, &mines)?;
        let mut board = Self::from_layout(&layout);

        for (row, line) in (0..height).zip(&rows) {
            for (col, &ch) in (0..width).zip(line) {
                let cell = &mut board.cells[Position::new(row, col).to_nd_index()];
                match ch {
                    '#' | 'm' => {}
                    'F' | 'f' => cell.set_flagged(true),
                    '*' => cell.reveal(),
                    '.' | '0'..='8' => {
                        let shown = ch.to_digit(10).unwrap_or(0) as u8;
                        if cell.value() != Some(CellValue::Empty(shown)) {
                            return Err(GameError::InvalidPicture);
                        }
                        cell.reveal();
                    }
                    _ => return Err(GameError::InvalidPicture),
                }
            }
        }

        Ok(board)
    }

    /// Checks a board that did not come from this crate's constructors, e.g. one received
    /// from a peer.
    ///
    /// Every cell must sit at its own position with exactly the surroundings a fresh
    /// `width` x `height` grid would give it. Values must be either all missing or all equal to
    /// the counts recomputed from the board's own mines.
    pub fn validate(&self, width: Coord, height: Coord) -> Result<()> {
        if self.cells.dim() != (usize::from(height), usize::from(width)) {
            return Err(GameError::InvalidBoardShape);
        }

        let fresh = Self::empty(width, height);
        let same_grid = self
            .cells
            .iter()
            .zip(fresh.cells.iter())
            .all(|(cell, expected)| {
                cell.position() == expected.position()
                    && cell.surroundings() == expected.surroundings()
            });
        if !same_grid {
            return Err(GameError::InvalidBoardShape);
        }

        if !self.has_values() {
            return Ok(());
        }

        let mines: Vec<Position> = self
            .cells
            .iter()
            .filter(|cell| cell.is_mine())
            .map(Cell::position)
            .collect();
        let layout = MineLayout::from_mine_positions(width, height, &mines)?;
        let recomputed = Self::from_layout(&layout);
        let same_values = self
            .cells
            .iter()
            .zip(recomputed.cells.iter())
            .all(|(cell, expected)| cell.value() == expected.value());
        if !same_values {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(())
    }

    /// Whether mines have been laid out yet.
    pub fn has_values(&self) -> bool {
        self.cells.iter().any(|cell| cell.value().is_some())
    }

    pub fn width(&self) -> Coord {
        self.cells.ncols() as Coord
    }

    pub fn height(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width(), self.height())
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.height() && position.col < self.width()
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Every position of the board in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width(), self.height());
        (0..height).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_cells(Cell::is_mine)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_cells(|cell| cell.state().flagged)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_cells(|cell| cell.state().revealed)
    }

    fn count_cells(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|cell| predicate(*cell)).count() as CellCount
    }

    /// Surrounding cells that are neither revealed nor flagged.
    pub fn hidden_neighbors(&self, position: Position) -> SmallVec<[Position; 8]> {
        self[position]
            .surroundings()
            .iter()
            .copied()
            .filter(|&neighbor| self[neighbor].state().is_hidden())
            .collect()
    }

    pub fn flagged_neighbors(&self, position: Position) -> u8 {
        self[position]
            .surroundings()
            .iter()
            .filter(|&&neighbor| self[neighbor].state().flagged)
            .count() as u8
    }

    /// A revealed number with exactly that many flags around it.
    pub fn can_chord(&self, position: Position) -> bool {
        self[position]
            .shown_count()
            .is_some_and(|count| count == self.flagged_neighbors(position))
    }

    /// Reveals a hidden, unflagged cell, opening the connected zero region if it is a zero.
    pub fn reveal_cell(&mut self, position: Position) -> RevealOutcome {
        let cell = &mut self.cells[position.to_nd_index()];
        if !cell.state().is_hidden() {
            return RevealOutcome::NoChange;
        }

        cell.reveal();
        if cell.is_mine() {
            log::debug!("Revealed mine at {:?}", position);
            return RevealOutcome::HitMine;
        }
        if cell.count() == Some(0) {
            self.flood_fill(position);
        }
        RevealOutcome::Revealed
    }

    /// Chord: when a revealed number has as many flags around it as its value, reveal the
    /// rest of its surroundings.
    pub fn reveal_surrounding(&mut self, position: Position) -> RevealOutcome {
        if !self.can_chord(position) {
            return RevealOutcome::NoChange;
        }

        self.hidden_neighbors(position)
            .into_iter()
            .map(|neighbor| self.reveal_cell(neighbor))
            .fold(RevealOutcome::NoChange, BitOr::bitor)
    }

    fn flood_fill(&mut self, origin: Position) {
        let mut to_visit = VecDeque::from([origin]);

        while let Some(position) = to_visit.pop_front() {
            // a zero with a (wrong) flag next to it does not cascade
            if !self.can_chord(position) {
                continue;
            }

            for neighbor in self.hidden_neighbors(position) {
                let cell = &mut self.cells[neighbor.to_nd_index()];
                cell.reveal();
                log::trace!("Flood revealed {:?}, value: {:?}", neighbor, cell.value());
                if cell.count() == Some(0) {
                    to_visit.push_back(neighbor);
                }
            }
        }
    }

    pub fn toggle_flag(&mut self, position: Position) -> MarkOutcome {
        let cell = &mut self.cells[position.to_nd_index()];
        let state = cell.state();

        if state.revealed {
            MarkOutcome::NoChange
        } else if state.flagged {
            cell.set_flagged(false);
            MarkOutcome::Unflagged
        } else {
            cell.set_flagged(true);
            MarkOutcome::Flagged
        }
    }

    /// Every mine flagged and every other cell revealed.
    pub fn is_won(&self) -> bool {
        self.cells.iter().all(|cell| {
            let state = cell.state();
            (state.revealed && !cell.is_mine()) || (state.flagged && cell.is_mine())
        })
    }

    pub fn is_lost(&self) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.state().revealed && cell.is_mine())
    }

    /// Uncovers every mine. Only meant for showing a lost board.
    pub fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine()) {
            cell.reveal();
        }
    }

    /// Plain text picture: `#` hidden, `F` flagged, `*` mine, `.` zero, digits, `?` no value yet.
    pub fn render(&self) -> String {
        let line_breaks = CellCount::from(self.height());
        let mut out = String::with_capacity(usize::from(self.total_cells() + line_breaks));
        for (index, cell) in self.cells.iter().enumerate() {
            if index > 0 && index % usize::from(self.width()) == 0 {
                out.push('\n');
            }
            let state = cell.state();
            let ch = match (state.revealed, state.flagged, cell.value()) {
                (false, true, _) => 'F',
                (false, false, _) => '#',
                (true, _, Some(CellValue::Mine)) => '*',
                (true, _, Some(CellValue::Empty(0))) => '.',
                (true, _, Some(CellValue::Empty(count))) => char::from(b'0' + count),
                (true, _, None) => '?',
            };
            out.push(ch);
        }
        out
    }
}

impl Index<Position> for Board {
    type Output = Cell;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cells[position.to_nd_index()]
    }
}
