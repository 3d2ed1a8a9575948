use super::*;

/// Purely random placement: every cell is equally likely to hold a mine, corners included.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let total_cells = config.total_cells();
        let (rows, cols) = config.size;

        // rejection sampling would never finish on a full board
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Minefield already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return MineLayout::from_mine_mask(Array2::from_elem(config.size.to_nd_index(), true));
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed: CellCount = 0;
        let mut draws: u32 = 0;

        while mines_placed < config.mines {
            let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
            draws += 1;

            let cell = &mut mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {}x{} in {} draws (seed {})",
            mines_placed,
            rows,
            cols,
            draws,
            self.seed
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_board_has_exactly_ten_mines() {
        for seed in 0..32 {
            let layout = RandomMinefieldGenerator::new(seed).generate(GameConfig::CLASSIC);

            assert_eq!(layout.size(), (10, 10));
            assert_eq!(layout.mine_count(), 10);
            assert_eq!(layout.iter_mines().count(), 10);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = RandomMinefieldGenerator::new(42).generate(GameConfig::CLASSIC);
        let b = RandomMinefieldGenerator::new(42).generate(GameConfig::CLASSIC);

        assert_eq!(a, b);
    }

    #[test]
    fn full_board_request_fills_every_cell() {
        let config = GameConfig::new_unchecked((3, 4), 20);
        let layout = RandomMinefieldGenerator::new(7).generate(config);

        assert_eq!(layout.mine_count(), 12);
        assert_eq!(layout.safe_cell_count(), 0);
    }

    #[test]
    fn zero_mines_leaves_board_empty() {
        let layout = RandomMinefieldGenerator::new(1).generate(GameConfig::new((4, 4), 0));

        assert_eq!(layout.mine_count(), 0);
        assert_eq!(layout.adjacent_mine_count((2, 2)), 0);
    }

    #[test]
    fn counts_agree_with_generated_mines() {
        let layout = RandomMinefieldGenerator::new(99).generate(GameConfig::CLASSIC);

        for row in 0..10 {
            for col in 0..10 {
                let expected = NeighborIter::new((row, col), (10, 10))
                    .filter(|&pos| layout.contains_mine(pos))
                    .count();
                assert_eq!(usize::from(layout.adjacent_mine_count((row, col))), expected);
            }
        }
    }
}
