use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Present neighbors of a node, in [`Direction::ALL`] order.
///
/// Owned, so callers can mutate the grid while walking it.
pub type NeighborList = SmallVec<[Coord2; 6]>;

/// Dense arena of optional nodes indexed by `(row, column)`.
///
/// A `None` cell is a node that never existed or was removed, it never comes back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: Coord2,
    cells: Array2<Option<Node>>,
}

impl Grid {
    /// A fully populated grid of `(height, width)`.
    pub fn new(size: Coord2) -> Self {
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            // in range by construction, shape comes from `Coord` values
            Some(Node::new((row as Coord, col as Coord)))
        });
        Self { size, cells }
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn height(&self) -> Coord {
        self.size.0
    }

    pub const fn width(&self) -> Coord {
        self.size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(BoardError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Node> {
        self.cells.get(coords.to_nd_index()).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, coords: Coord2) -> Option<&mut Node> {
        self.cells
            .get_mut(coords.to_nd_index())
            .and_then(Option::as_mut)
    }

    /// Like [`Grid::get`] but distinguishes a bad coordinate from an absent node.
    pub fn node(&self, coords: Coord2) -> Result<&Node> {
        let coords = self.validate_coords(coords)?;
        self.get(coords).ok_or(BoardError::MissingNode(coords))
    }

    pub(crate) fn node_mut(&mut self, coords: Coord2) -> Result<&mut Node> {
        let coords = self.validate_coords(coords)?;
        self.get_mut(coords).ok_or(BoardError::MissingNode(coords))
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.get(coords).is_some()
    }

    /// The present node one step from `coords` in `direction`.
    ///
    /// Stepping off the grid or onto an absent cell is `Ok(None)`, asking from an absent node is
    /// an error.
    pub fn neighbor(&self, coords: Coord2, direction: Direction) -> Result<Option<Coord2>> {
        self.node(coords)?;
        Ok(direction
            .step(coords, self.size)
            .filter(|&next| self.contains(next)))
    }

    /// Present neighbors of `coords`, empty when `coords` itself is absent.
    pub fn neighbors(&self, coords: Coord2) -> NeighborList {
        if !self.contains(coords) {
            return NeighborList::new();
        }
        HexNeighborIter::new(coords, self.size)
            .filter(|&next| self.contains(next))
            .collect()
    }

    pub fn degree(&self, coords: Coord2) -> usize {
        self.neighbors(coords).len()
    }

    /// Present nodes in row-major order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> {
        self.cells.iter().flatten()
    }

    /// Coordinates of present nodes in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_nodes().map(Node::coords)
    }

    pub fn node_count(&self) -> CellCount {
        // bounded by `mult(height, width)`
        self.iter_nodes().count() as CellCount
    }

    /// Makes the node at `coords` permanently absent, returning what was there.
    pub(crate) fn remove(&mut self, coords: Coord2) -> Option<Node> {
        self.cells.get_mut(coords.to_nd_index())?.take()
    }
}
