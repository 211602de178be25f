use rand::{Rng, RngCore};

use super::*;

/// Purely random placement outside the opening around the first click.
///
/// Draws uniformly over the whole board and throws away draws that land in the opening or on
/// an existing mine, so every accepted draw adds exactly one mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator<R> {
    rng: R,
}

impl<R: RngCore> RandomMineGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> MineLayoutGenerator for RandomMineGenerator<R> {
    fn place_mines(&mut self, first_click: Position, config: &BoardConfig) -> Result<MineLayout> {
        let mut layout = MineLayout::empty(config.width, config.height);
        let first_click = layout.validate_position(first_click)?;

        let opening = NeighborIter::new(first_click, (config.height, config.width)).count() + 1;
        let free_cells = config.total_cells() - opening as CellCount;
        if config.mines > free_cells {
            log::warn!(
                "Cannot fit {} mines outside the opening, only {} cells left",
                config.mines,
                free_cells
            );
            return Err(GameError::TooManyMines);
        }

        let mut rejected: u32 = 0;
        while layout.mine_count() < config.mines {
            let candidate = Position::new(
                self.rng.random_range(0..config.height),
                self.rng.random_range(0..config.width),
            );
            if candidate.is_within_one(first_click) || !layout.insert(candidate) {
                rejected += 1;
            }
        }

        log::trace!(
            "Placed {} mines around {:?}, {} draws rejected",
            layout.mine_count(),
            first_click,
            rejected
        );
        Ok(layout)
    }
}
