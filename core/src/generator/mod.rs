use crate::*;
pub use random::*;

mod random;

pub trait MineLayoutGenerator {
    /// Lays out `config.mines` distinct mines, none of them on or next to `first_click`.
    fn place_mines(&mut self, first_click: Position, config: &BoardConfig) -> Result<MineLayout>;
}

/// A board ready for play: mines laid out, numbers computed and the first click revealed.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedBoard {
    pub board: Board,
    /// How many layouts were tried, including the one that was kept.
    pub attempts: u32,
}

/// Generates layouts anchored at `first_click` until one passes.
///
/// Without `guess_free` the first layout is kept. With it, layouts are regenerated on a fresh
/// grid until [`is_board_solvable`] holds, giving up after `config.max_attempts` rounds.
pub fn generate_board<G: MineLayoutGenerator>(
    generator: &mut G,
    first_click: Position,
    config: &BoardConfig,
) -> Result<GeneratedBoard> {
    for attempts in 1..=config.max_attempts {
        let layout = generator.place_mines(first_click, config)?;
        let mut board = Board::from_layout(&layout);
        board.reveal_cell(first_click);

        if !config.guess_free || is_board_solvable(&board) {
            log::debug!(
                "Board generated around {:?} after {} attempt(s)",
                first_click,
                attempts
            );
            return Ok(GeneratedBoard { board, attempts });
        }

        log::trace!("Attempt {} needs a guess, regenerating", attempts);
    }

    log::warn!(
        "No guess-free board for {}x{} with {} mines in {} attempts",
        config.width,
        config.height,
        config.mines,
        config.max_attempts
    );
    Err(GameError::NoSolvableBoard {
        attempts: config.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Hands out the same layout every time.
    struct FixedLayout(MineLayout);

    impl MineLayoutGenerator for FixedLayout {
        fn place_mines(&mut self, _: Position, _: &BoardConfig) -> Result<MineLayout> {
            Ok(self.0.clone())
        }
    }

    fn needs_guess_layout() -> FixedLayout {
        let mines = [Position::new(0, 1), Position::new(0, 3)];
        FixedLayout(MineLayout::from_mine_positions(5, 3, &mines).unwrap())
    }

    #[test]
    fn keeps_first_layout_without_guess_free() {
        let config = BoardConfig::new(5, 3, 2);

        let generated = generate_board(&mut needs_guess_layout(), Position::new(2, 2), &config);

        let generated = generated.unwrap();
        assert_eq!(generated.attempts, 1);
        assert!(generated.board[Position::new(2, 2)].state().revealed);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let config = BoardConfig::new(5, 3, 2)
            .with_guess_free(true)
            .with_max_attempts(3);

        let result = generate_board(&mut needs_guess_layout(), Position::new(2, 2), &config);

        assert_eq!(result, Err(GameError::NoSolvableBoard { attempts: 3 }));
    }

    #[test]
    fn guess_free_board_is_solvable() {
        let config = BoardConfig::beginner().with_guess_free(true);
        let mut generator = RandomMineGenerator::new(SmallRng::seed_from_u64(11));

        for _ in 0..5 {
            let generated = generate_board(&mut generator, Position::new(4, 4), &config).unwrap();

            assert_eq!(generated.board.mine_count(), 10);
            assert!(is_board_solvable(&generated.board));
        }
    }

    #[test]
    fn full_density_around_center_is_solved_first_try() {
        // every cell outside the opening is a mine, the opening alone pins them all down
        let config = BoardConfig::new(5, 5, 16).with_guess_free(true);
        let mut generator = RandomMineGenerator::new(SmallRng::seed_from_u64(3));

        let generated = generate_board(&mut generator, Position::new(2, 2), &config).unwrap();

        assert_eq!(generated.attempts, 1);
        assert_eq!(generated.board.revealed_count(), 9);
    }

    #[test]
    fn denser_boards_need_more_attempts() {
        let sparse = BoardConfig::new(9, 9, 4).with_guess_free(true);
        let dense = BoardConfig::new(9, 9, 16).with_guess_free(true);
        let mut generator = RandomMineGenerator::new(SmallRng::seed_from_u64(5));

        let mut total = |config: &BoardConfig| -> u32 {
            (0..30)
                .map(|_| {
                    generate_board(&mut generator, Position::new(4, 4), config)
                        .unwrap()
                        .attempts
                })
                .sum()
        };

        let sparse_attempts = total(&sparse);
        let dense_attempts = total(&dense);

        assert!(sparse_attempts >= 30);
        assert!(dense_attempts > sparse_attempts);
    }
}
