use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Clamps a possibly out-of-range request to a valid cell of a
/// `rows x cols` grid. Both axes are clamped independently.
pub fn clamp_to_grid((row, col): (i32, i32), (rows, cols): Coord2) -> Coord2 {
    let row = row.clamp(0, i32::from(rows) - 1);
    let col = col.clamp(0, i32::from(cols) - 1);
    (row as Coord, col as Coord)
}

pub trait NeighborIterExt {
    /// Iterates the in-bounds Moore neighborhood of `index` (up to 8 cells).
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;

    /// Iterates the in-bounds 3x3 block centered at `index`, center included.
    fn iter_zone(&self, index: Coord2) -> ZoneIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, dim_of(self))
    }

    fn iter_zone(&self, index: Coord2) -> ZoneIter {
        ZoneIter::new(index, dim_of(self))
    }
}

fn dim_of<T>(grid: &Array2<T>) -> Coord2 {
    let dim = grid.dim();
    (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
}

const NEIGHBOR_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ZONE_DELTAS: [(i8, i8); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it stays in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = NEIGHBOR_DELTAS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(item) = apply_delta(self.center, *delta, self.bounds) {
                return Some(item);
            }
        }
    }
}

#[derive(Debug)]
pub struct ZoneIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl ZoneIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for ZoneIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = ZONE_DELTAS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(item) = apply_delta(self.center, *delta, self.bounds) {
                return Some(item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_of_interior_cell_are_eight() {
        let grid: Array2<u8> = Array2::default((5, 5));
        let neighbors: Vec<_> = grid.iter_neighbors((2, 2)).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(2, 2)));
    }

    #[test]
    fn neighbors_of_corner_cell_are_clipped() {
        let grid: Array2<u8> = Array2::default((3, 3));
        let mut neighbors: Vec<_> = grid.iter_neighbors((0, 0)).collect();
        neighbors.sort();
        assert_eq!(neighbors, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn zone_includes_center() {
        let grid: Array2<u8> = Array2::default((4, 4));
        let zone: Vec<_> = grid.iter_zone((1, 1)).collect();
        assert_eq!(zone.len(), 9);
        assert!(zone.contains(&(1, 1)));
    }

    #[test]
    fn zone_is_clipped_at_corners_and_edges() {
        let grid: Array2<u8> = Array2::default((9, 9));
        assert_eq!(grid.iter_zone((0, 0)).count(), 4);
        assert_eq!(grid.iter_zone((0, 4)).count(), 6);
        assert_eq!(grid.iter_zone((4, 4)).count(), 9);
    }

    #[test]
    fn clamp_keeps_requests_inside_grid() {
        assert_eq!(clamp_to_grid((-3, 2), (9, 9)), (0, 2));
        assert_eq!(clamp_to_grid((12, -1), (9, 9)), (8, 0));
        assert_eq!(clamp_to_grid((4, 4), (9, 9)), (4, 4));
    }
}
