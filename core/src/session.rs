use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Lose,
}

/// Valid transitions:
/// - `is_first_move` true -> false, on the first accepted action
/// - `game_over` false -> true, together with `result` becoming `Some`
///
/// Only [`Minesweeper::reset`] goes back to the initial state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub game_over: bool,
    pub result: Option<GameResult>,
    pub is_first_move: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            game_over: false,
            result: None,
            is_first_move: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    /// Reveal
    Primary,
    /// Toggle flag
    Secondary,
    /// Chord
    Tertiary,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Game already over or position off the board, nothing was looked at.
    Rejected,
    Unchanged,
    Applied,
}

impl ActionOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Read-only view of the board as shown to the player.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoardView<'a> {
    pub board: &'a Board,
    pub flags_left: isize,
    pub config: &'a BoardConfig,
}

/// One game from first click to win or loss, on a board owned by this session.
#[derive(Clone, Debug)]
pub struct Minesweeper<R = SmallRng> {
    config: BoardConfig,
    board: Board,
    flags_left: isize,
    state: GameState,
    generator: RandomMineGenerator<R>,
}

impl Minesweeper<SmallRng> {
    /// New game whose layouts are drawn from a generator seeded with `seed`.
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Minesweeper<R> {
    pub fn with_rng(config: BoardConfig, rng: R) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            board: Board::empty(config.width, config.height),
            flags_left: config.mines as isize,
            state: GameState::default(),
            generator: RandomMineGenerator::new(rng),
            config,
        })
    }

    /// Game over a fixed layout, skipping first-move generation.
    ///
    /// The layout does not need to leave room for a safe opening. A later [`reset`] generates
    /// layouts with the same size and mine count, which may then fail if they cannot fit.
    ///
    /// [`reset`]: Self::reset
    pub fn with_layout(layout: &MineLayout, rng: R) -> Self {
        let config = BoardConfig::new(layout.width(), layout.height(), layout.mine_count());

        Self {
            board: Board::from_layout(layout),
            flags_left: config.mines as isize,
            state: GameState {
                is_first_move: false,
                ..GameState::default()
            },
            generator: RandomMineGenerator::new(rng),
            config,
        }
    }

    pub fn board(&self) -> BoardView<'_> {
        BoardView {
            board: &self.board,
            flags_left: self.flags_left,
            config: &self.config,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Mines minus flags placed, negative when over-flagged.
    pub fn flags_left(&self) -> isize {
        self.flags_left
    }

    pub fn is_game_won(&self) -> bool {
        self.board.is_won()
    }

    pub fn is_game_lost(&self) -> bool {
        self.board.is_lost()
    }

    /// Board as it should be drawn, with every mine uncovered once the game is lost.
    pub fn display_board(&self) -> Board {
        let mut board = self.board.clone();
        if self.state.result == Some(GameResult::Lose) {
            board.reveal_all_mines();
        }
        board
    }

    /// Applies a click.
    ///
    /// The first accepted click of a game, whatever the button, lays out the mines around
    /// `position` and reveals it. Clicks after the game ended or outside the board are
    /// rejected without touching anything. Fails only when a guess-free board could not be
    /// generated within the configured attempts, in which case the game stays on its first
    /// move.
    pub fn handle_action(
        &mut self,
        button: MouseButton,
        position: Position,
    ) -> Result<ActionOutcome> {
        if self.state.game_over || !self.board.contains(position) {
            log::debug!("Rejected {:?} at {:?}", button, position);
            return Ok(ActionOutcome::Rejected);
        }

        if self.state.is_first_move {
            self.first_move(position)?;
            return Ok(ActionOutcome::Applied);
        }

        let changed = match button {
            MouseButton::Primary => self.board.reveal_cell(position).has_update(),
            MouseButton::Secondary => self.toggle_flag(position),
            MouseButton::Tertiary => self.board.reveal_surrounding(position).has_update(),
        };
        self.check_game_state();

        Ok(if changed {
            ActionOutcome::Applied
        } else {
            ActionOutcome::Unchanged
        })
    }

    /// Starts over with an empty board from the same configuration.
    pub fn reset(&mut self) {
        self.board = Board::empty(self.config.width, self.config.height);
        self.flags_left = self.config.mines as isize;
        self.state = GameState::default();
        log::debug!("Game reset");
    }

    /// Replaces board and state with a snapshot taken elsewhere, e.g. by another peer.
    ///
    /// The snapshot must be a well-formed board of the configured size, and once mines are
    /// laid out it must hold the configured number of them.
    pub fn restore(&mut self, board: Board, state: GameState) -> Result<()> {
        board.validate(self.config.width, self.config.height)?;
        if board.has_values() && board.mine_count() != self.config.mines {
            return Err(GameError::InvalidBoardShape);
        }

        self.flags_left = self.config.mines as isize - board.flagged_count() as isize;
        self.board = board;
        self.state = state;
        Ok(())
    }

    fn first_move(&mut self, position: Position) -> Result<()> {
        let generated = generate_board(&mut self.generator, position, &self.config)?;
        log::debug!(
            "First move at {:?}, {} cells opened",
            position,
            generated.board.revealed_count()
        );

        self.board = generated.board;
        self.state.is_first_move = false;
        Ok(())
    }

    fn toggle_flag(&mut self, position: Position) -> bool {
        match self.board.toggle_flag(position) {
            MarkOutcome::Flagged => self.flags_left -= 1,
            MarkOutcome::Unflagged => self.flags_left += 1,
            MarkOutcome::NoChange => return false,
        }
        true
    }

    fn check_game_state(&mut self) {
        let result = if self.board.is_won() {
            Some(GameResult::Win)
        } else if self.board.is_lost() {
            Some(GameResult::Lose)
        } else {
            None
        };

        if result.is_some() {
            log::debug!("Game ended: {:?}", result);
        }
        self.state.game_over = result.is_some();
        self.state.result = result;
    }
}
