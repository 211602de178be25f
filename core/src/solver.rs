use alloc::vec::Vec;

use crate::*;

/// State reached by propagating the two single-cell rules until nothing changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Solve {
    /// Scratch copy at the fixed point.
    pub board: Board,
    /// Sweeps over the frontier, the last one being the sweep that changed nothing.
    pub passes: u32,
    pub solved: bool,
}

/// Whether every mine can be flagged and every safe cell revealed from the current state
/// without guessing. The board itself is left untouched.
pub fn is_board_solvable(board: &Board) -> bool {
    solve(board).solved
}

/// Runs constraint propagation on an owned copy of `board`.
///
/// Only two deductions are made, each from a single revealed number:
/// - if the number equals its hidden plus flagged neighbors, every hidden neighbor is a mine
/// - if the number equals its flagged neighbors, every hidden neighbor is safe
///
/// Layouts that need reasoning over several numbers at once are reported as unsolved.
pub fn solve(board: &Board) -> Solve {
    let mut scratch = board.clone();
    let mut passes = 0;

    loop {
        passes += 1;
        if !sweep(&mut scratch) {
            break;
        }
    }

    let solved = scratch.is_won();
    log::trace!("Solver stopped after {} passes, solved: {}", passes, solved);
    Solve {
        board: scratch,
        passes,
        solved,
    }
}

/// Revealed numbers that still have a hidden neighbor, in row-major order.
pub fn frontier(board: &Board) -> Vec<Position> {
    board
        .positions()
        .filter(|&position| board[position].shown_count().is_some())
        .filter(|&position| !board.hidden_neighbors(position).is_empty())
        .collect()
}

/// One pass over the frontier, returns whether any cell was flagged or revealed.
fn sweep(board: &mut Board) -> bool {
    let mut changed = false;

    for position in frontier(board) {
        // earlier cells in this pass may already have settled this one
        let hidden = board.hidden_neighbors(position);
        if hidden.is_empty() {
            continue;
        }

        let Some(count) = board[position].shown_count() else {
            continue;
        };
        let count = usize::from(count);
        let flagged = usize::from(board.flagged_neighbors(position));

        if count == hidden.len() + flagged {
            for neighbor in hidden {
                board.toggle_flag(neighbor);
            }
            changed = true;
        } else if count == flagged {
            for neighbor in hidden {
                board.reveal_cell(neighbor);
            }
            changed = true;
        }
    }

    changed
}
