use ndarray::Array2;
use std::collections::VecDeque;

use crate::*;

/// Reveals `start` and flood-opens the surrounding zero-count region.
///
/// Returns a fresh copy of `revealed`; the caller's matrix is untouched.
/// An out-of-bounds, flagged, or already-revealed start yields an
/// unchanged copy. Flagged
/// cells block the flood and stay flagged. Cells with a positive count are
/// revealed at the region border but do not propagate.
pub fn reveal_flood(
    board: &Board,
    flagged: &Array2<bool>,
    revealed: &Array2<bool>,
    start: Coord2,
) -> Array2<bool> {
    let mut next = revealed.clone();

    let (rows, cols) = board.size();
    if start.0 >= rows || start.1 >= cols {
        return next;
    }

    if next[start.to_nd_index()] || flagged[start.to_nd_index()] {
        return next;
    }

    next[start.to_nd_index()] = true;
    if board.value_at(start) != 0 {
        return next;
    }

    // Iterative walk instead of recursion so large boards cannot blow the
    // stack; the revealed matrix itself doubles as the visited set.
    let mut to_visit: VecDeque<Coord2> = VecDeque::from([start]);
    while let Some(coords) = to_visit.pop_front() {
        for pos in board.iter_neighbors(coords) {
            if next[pos.to_nd_index()] || flagged[pos.to_nd_index()] {
                continue;
            }
            next[pos.to_nd_index()] = true;
            log::trace!("flood revealed {:?}, count {}", pos, board.value_at(pos));
            if board.value_at(pos) == 0 {
                to_visit.push_back(pos);
            }
        }
    }

    next
}

/// Full-reveal win: every non-mine cell is revealed. Mines never count
/// toward the total, revealed or not.
pub fn check_win(config: &DifficultyConfig, revealed: &Array2<bool>) -> bool {
    let revealed_count = revealed.iter().filter(|&&open| open).count();
    revealed_count == usize::from(config.safe_cells())
}

/// All-mines-flagged win: every flag sits on a mine and the flag count
/// equals the mine count exactly. Always false before mines are placed,
/// and a single misplaced flag disqualifies the whole set.
pub fn check_flags_win(
    config: &DifficultyConfig,
    first_click: bool,
    flagged: &Array2<bool>,
    board: &Board,
) -> bool {
    if first_click {
        return false;
    }

    let mut flag_count: CellCount = 0;
    for row in 0..config.rows {
        for col in 0..config.cols {
            let coords = (row, col);
            if flagged[coords.to_nd_index()] {
                if !board.is_mine(coords) {
                    return false;
                }
                flag_count += 1;
            }
        }
    }

    flag_count == config.mines
}

/// Score shown on a win. Same formula as the scoring backend
/// (`totalCells / secondsTaken`) so display and ranking order agree;
/// sub-second wins are floored to one second.
pub fn calculate_score(config: &DifficultyConfig, seconds: u32) -> f64 {
    f64::from(config.total_cells()) / f64::from(seconds.max(1))
}
