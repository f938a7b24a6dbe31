use rand::prelude::*;

use super::*;

/// Rejection-sampling mine placement around a protected start cell.
///
/// Draws uniform `(row, col)` pairs and accepts any cell that is not
/// already a mine and not inside the exclusion area. Adjacency counts are
/// maintained incrementally by [`Board::place_mine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomBoardGenerator {
    seed: u64,
    start: Coord2,
    safe_start: SafeStart,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, start: Coord2, safe_start: SafeStart) -> Self {
        Self {
            seed,
            start,
            safe_start,
        }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: &DifficultyConfig) -> Board {
        use SafeStart::*;

        let total_cells = config.total_cells();
        let start = clamp_to_grid((self.start.0.into(), self.start.1.into()), config.size());
        let mut board = Board::empty(config);

        // The exclusion area may not leave room for every mine on tiny
        // boards; step down until placement cannot starve. The zone is
        // clipped at the grid edge, so its size depends on the start cell.
        let zone_cells: CellCount = board.iter_zone(start).count().try_into().unwrap();
        let safe_start = match self.safe_start {
            Anywhere => Anywhere,
            Cell | Zone if config.mines + 1 > total_cells => {
                log::warn!("cannot keep start cell safe, falling back to unrestricted placement");
                Anywhere
            }
            Cell => Cell,
            Zone if config.mines + zone_cells > total_cells => {
                log::warn!("cannot keep start zone safe, falling back to a single safe cell");
                Cell
            }
            Zone => Zone,
        };

        let excluded = |coords: Coord2| match safe_start {
            Anywhere => false,
            Cell => coords == start,
            Zone => in_zone(coords, start),
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while board.mine_count() < config.mines {
            let row = rng.random_range(0..config.rows);
            let col = rng.random_range(0..config.cols);
            let coords = (row, col);
            if board.is_mine(coords) || excluded(coords) {
                continue;
            }
            board.place_mine(coords);
        }

        log::debug!(
            "generated {}x{} board with {} mines around safe start {:?}",
            config.rows,
            config.cols,
            board.mine_count(),
            start
        );
        board
    }
}

fn in_zone((row, col): Coord2, (start_row, start_col): Coord2) -> bool {
    row.abs_diff(start_row) <= 1 && col.abs_diff(start_col) <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: Coord, cols: Coord, mines: CellCount) -> DifficultyConfig {
        DifficultyConfig::new(rows, cols, mines).unwrap()
    }

    #[test]
    fn places_exactly_the_requested_mine_count() {
        for seed in 0..20 {
            let board = RandomBoardGenerator::new(seed, (4, 4), SafeStart::Zone)
                .generate(&config(9, 9, 10));
            assert_eq!(board.mine_count(), 10);
            assert_eq!(board.iter_mines().count(), 10);
        }
    }

    #[test]
    fn safe_zone_never_holds_a_mine() {
        let config = config(9, 9, 10);
        for seed in 0..50 {
            for start in [(0, 0), (4, 4), (8, 8), (0, 8)] {
                let board =
                    RandomBoardGenerator::new(seed, start, SafeStart::Zone).generate(&config);
                for coords in board.iter_mines() {
                    assert!(
                        !in_zone(coords, start),
                        "seed {} placed a mine at {:?} inside the zone of {:?}",
                        seed,
                        coords,
                        start
                    );
                }
            }
        }
    }

    #[test]
    fn adjacency_invariant_holds_for_random_layouts() {
        for seed in 0..20 {
            let board = RandomBoardGenerator::new(seed, (2, 2), SafeStart::Zone)
                .generate(&config(8, 8, 12));
            let (rows, cols) = board.size();
            for row in 0..rows {
                for col in 0..cols {
                    let coords = (row, col);
                    if !board.is_mine(coords) {
                        assert_eq!(board.value_at(coords), board.recount_neighbors(coords) as i8);
                    }
                }
            }
        }
    }

    #[test]
    fn dense_board_falls_back_to_single_safe_cell() {
        // 3x3 with 7 mines cannot honor a 9-cell zone but must terminate
        // and still keep the start cell clear.
        let board =
            RandomBoardGenerator::new(7, (1, 1), SafeStart::Zone).generate(&config(3, 3, 7));
        assert_eq!(board.mine_count(), 7);
        assert!(!board.is_mine((1, 1)));
    }

    #[test]
    fn same_seed_reproduces_the_layout() {
        let config = config(9, 9, 10);
        let a = RandomBoardGenerator::new(99, (4, 4), SafeStart::Zone).generate(&config);
        let b = RandomBoardGenerator::new(99, (4, 4), SafeStart::Zone).generate(&config);
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_bounds_start_is_clamped() {
        let board =
            RandomBoardGenerator::new(3, (200, 200), SafeStart::Zone).generate(&config(9, 9, 10));
        assert!(!board.is_mine((8, 8)));
    }

}
