use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cell value marking a mine. Non-mine cells hold their adjacency count.
pub const MINE: i8 = -1;

/// The mine layout plus per-cell adjacency counts.
///
/// Each cell is either [`MINE`] or the number of mines among its up-to-8
/// Moore neighbors. The counts are maintained on every mine placement, so
/// the adjacency invariant holds at all times.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<i8>,
    mine_count: CellCount,
}

impl Board {
    /// All-zero board with no mines, sized by `config`.
    pub fn empty(config: &DifficultyConfig) -> Self {
        Self {
            cells: Array2::zeros((config.rows as usize, config.cols as usize)),
            mine_count: 0,
        }
    }

    /// Deterministic layout from an explicit mine list.
    ///
    /// Out-of-bounds pairs are skipped individually; the rest of the list
    /// still applies. Duplicates count once.
    pub fn from_mine_coords(config: &DifficultyConfig, mine_coords: &[Coord2]) -> Self {
        let mut board = Self::empty(config);
        for &coords in mine_coords {
            if !config.in_bounds(coords) {
                log::debug!("ignoring out-of-bounds mine seed at {:?}", coords);
                continue;
            }
            board.place_mine(coords);
        }
        board
    }

    /// Marks `coords` as a mine and bumps the count of every non-mine
    /// neighbor. No-op when the cell already holds a mine.
    pub(crate) fn place_mine(&mut self, coords: Coord2) {
        if self.is_mine(coords) {
            return;
        }
        self.cells[coords.to_nd_index()] = MINE;
        self.mine_count += 1;
        for pos in self.cells.iter_neighbors(coords) {
            if self.cells[pos.to_nd_index()] != MINE {
                self.cells[pos.to_nd_index()] += 1;
            }
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.cells[coords.to_nd_index()] == MINE
    }

    /// Adjacency count of a non-mine cell, [`MINE`] for a mine cell.
    pub fn value_at(&self, coords: Coord2) -> i8 {
        self.cells[coords.to_nd_index()]
    }

    /// Recounts mine neighbors directly, bypassing the stored value.
    pub fn recount_neighbors(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.is_mine(pos))
            .count()
            .try_into()
            .unwrap()
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        let (rows, cols) = self.size();
        (0..rows)
            .flat_map(move |row| (0..cols).map(move |col| (row, col)))
            .filter(|&coords| self.is_mine(coords))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub(crate) fn iter_zone(&self, coords: Coord2) -> ZoneIter {
        self.cells.iter_zone(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = i8;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: Coord, cols: Coord, mines: CellCount) -> DifficultyConfig {
        DifficultyConfig::new(rows, cols, mines).unwrap()
    }

    #[test]
    fn empty_board_is_all_zero() {
        let board = Board::empty(&config(4, 5, 3));
        assert_eq!(board.size(), (4, 5));
        assert_eq!(board.mine_count(), 0);
        for row in 0..4 {
            for col in 0..5 {
                assert_eq!(board.value_at((row, col)), 0);
            }
        }
    }

    #[test]
    fn center_mine_surrounds_itself_with_ones() {
        let board = Board::from_mine_coords(&config(3, 3, 1), &[(1, 1)]);
        for row in 0..3 {
            for col in 0..3 {
                let expected = if (row, col) == (1, 1) { MINE } else { 1 };
                assert_eq!(board.value_at((row, col)), expected);
            }
        }
    }

    #[test]
    fn adjacency_counts_match_recount() {
        let mines = [(0, 0), (0, 1), (2, 3), (4, 4), (3, 3)];
        let board = Board::from_mine_coords(&config(5, 5, 5), &mines);
        let (rows, cols) = board.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if !board.is_mine(coords) {
                    assert_eq!(
                        board.value_at(coords),
                        board.recount_neighbors(coords) as i8,
                        "mismatch at {:?}",
                        coords
                    );
                }
            }
        }
    }

    #[test]
    fn out_of_bounds_seeds_are_skipped() {
        let board = Board::from_mine_coords(&config(3, 3, 2), &[(0, 0), (7, 7), (2, 9)]);
        assert_eq!(board.mine_count(), 1);
        assert!(board.is_mine((0, 0)));
    }

    #[test]
    fn duplicate_seeds_count_once() {
        let board = Board::from_mine_coords(&config(3, 3, 1), &[(1, 1), (1, 1)]);
        assert_eq!(board.mine_count(), 1);
        assert_eq!(board.value_at((0, 0)), 1);
    }

    #[test]
    fn iter_mines_yields_the_mine_set() {
        let mines = [(0, 2), (1, 0)];
        let board = Board::from_mine_coords(&config(3, 3, 2), &mines);
        let mut found: Vec<_> = board.iter_mines().collect();
        found.sort();
        assert_eq!(found, vec![(0, 2), (1, 0)]);
    }
}
