use ndarray::Array2;

use crate::{Board, GameConfig, ToNdIndex};

/// Mine-placement strategy, the seam for swapping in non-random layouts.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Board;
}

/// Places mines uniformly at random, sampling distinct cells without
/// replacement. Deterministic for a fixed seed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let total_cells = usize::from(config.total_cells());
        let mut mine_mask: Array2<bool> =
            Array2::default((config.rows, config.cols).to_nd_index());

        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let slots = mine_mask.as_slice_mut().expect("layout should be standard");
            for picked in rand::seq::index::sample(&mut rng, total_cells, config.mines.into()) {
                slots[picked] = true;
            }
        }

        let board = Board::from_mine_mask(mine_mask);
        log::debug!(
            "generated {}x{} board with {} mines (seed {})",
            config.rows,
            config.cols,
            board.mine_count(),
            self.seed
        );
        board
    }
}
