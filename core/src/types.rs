use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for node counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`.
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

/// The six hex directions of the brick-offset layout.
///
/// Rows are shifted by half a cell on alternating rows: even rows lean left and odd rows lean
/// right, so the diagonal steps depend on the parity of the row they start from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    West,
    NorthWest,
    NorthEast,
    East,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Row/column displacement of this direction when starting on `row`.
    pub const fn delta(self, row: Coord) -> (i8, i8) {
        use Direction::*;
        let even = row % 2 == 0;
        match self {
            West => (0, -1),
            East => (0, 1),
            NorthWest if even => (-1, -1),
            NorthWest => (-1, 0),
            NorthEast if even => (-1, 0),
            NorthEast => (-1, 1),
            SouthWest if even => (1, -1),
            SouthWest => (1, 0),
            SouthEast if even => (1, 0),
            SouthEast => (1, 1),
        }
    }

    /// Coordinates one step away in this direction, `None` when that falls off the grid.
    pub fn step(self, coords: Coord2, bounds: Coord2) -> Option<Coord2> {
        apply_delta(coords, self.delta(coords.0), bounds)
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (height, width) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= height {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= width {
        return None;
    }

    Some((next_row, next_col))
}

/// In-bounds hex neighbors of a cell, regardless of whether a node is present there.
#[derive(Debug)]
pub struct HexNeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl HexNeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for HexNeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let direction = *Direction::ALL.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = direction.step(self.center, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn even_row_diagonals_lean_left() {
        let bounds = (5, 5);
        assert_eq!(Direction::NorthWest.step((2, 2), bounds), Some((1, 1)));
        assert_eq!(Direction::NorthEast.step((2, 2), bounds), Some((1, 2)));
        assert_eq!(Direction::SouthWest.step((2, 2), bounds), Some((3, 1)));
        assert_eq!(Direction::SouthEast.step((2, 2), bounds), Some((3, 2)));
    }

    #[test]
    fn odd_row_diagonals_lean_right() {
        let bounds = (5, 5);
        assert_eq!(Direction::NorthWest.step((1, 1), bounds), Some((0, 1)));
        assert_eq!(Direction::NorthEast.step((1, 1), bounds), Some((0, 2)));
        assert_eq!(Direction::SouthWest.step((1, 1), bounds), Some((2, 1)));
        assert_eq!(Direction::SouthEast.step((1, 1), bounds), Some((2, 2)));
    }

    #[test]
    fn steps_off_the_grid_yield_nothing() {
        let bounds = (3, 3);
        assert_eq!(Direction::West.step((0, 0), bounds), None);
        assert_eq!(Direction::NorthWest.step((0, 0), bounds), None);
        assert_eq!(Direction::NorthEast.step((1, 2), bounds), None);
        assert_eq!(Direction::SouthEast.step((2, 1), bounds), None);
    }

    #[test]
    fn corner_and_interior_neighbor_counts() {
        assert_eq!(HexNeighborIter::new((0, 0), (3, 3)).count(), 2);
        assert_eq!(HexNeighborIter::new((1, 1), (3, 3)).count(), 6);
        assert_eq!(
            HexNeighborIter::new((0, 0), (3, 3)).collect::<Vec<_>>(),
            [(0, 1), (1, 0)]
        );
    }

    #[test]
    fn adjacency_is_symmetric() {
        let bounds = (6, 5);
        for row in 0..bounds.0 {
            for col in 0..bounds.1 {
                for other in HexNeighborIter::new((row, col), bounds) {
                    assert!(
                        HexNeighborIter::new(other, bounds).any(|back| back == (row, col)),
                        "{other:?} does not see {:?}",
                        (row, col)
                    );
                }
            }
        }
    }
}
