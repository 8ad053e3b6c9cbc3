//! Breadth-first primitives over the present nodes of a [`Grid`].
//!
//! Absent nodes are never enqueued, so every walk only ever sees the live board.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};

use crate::*;

/// One node reached by a breadth-first walk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BfsStep {
    pub node: Coord2,
    pub parent: Option<Coord2>,
    pub depth: usize,
}

/// Lazy breadth-first walk from a start node, yielding every reachable node once.
#[derive(Debug)]
pub struct Bfs<'a> {
    grid: &'a Grid,
    queue: VecDeque<BfsStep>,
    seen: HashSet<Coord2>,
}

impl<'a> Bfs<'a> {
    fn new(grid: &'a Grid, start: Coord2) -> Self {
        let step = BfsStep {
            node: start,
            parent: None,
            depth: 0,
        };
        Self {
            grid,
            queue: VecDeque::from([step]),
            seen: HashSet::from([start]),
        }
    }
}

impl Iterator for Bfs<'_> {
    type Item = BfsStep;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.queue.pop_front()?;
        for neighbor in self.grid.neighbors(step.node) {
            if self.seen.insert(neighbor) {
                self.queue.push_back(BfsStep {
                    node: neighbor,
                    parent: Some(step.node),
                    depth: step.depth + 1,
                });
            }
        }
        Some(step)
    }
}

impl Grid {
    /// Every node reachable from `start`, in breadth-first order.
    ///
    /// Each call is a fresh walk.
    pub fn reachable_from(&self, start: Coord2) -> Result<Bfs<'_>> {
        self.node(start)?;
        Ok(Bfs::new(self, start))
    }

    /// Some shortest route from `start` to `destination`.
    ///
    /// The route excludes `start` and ends with `destination`, it is empty when both are the same
    /// node. `None` means `destination` cannot be reached (or either end is absent).
    pub fn shortest_path(&self, start: Coord2, destination: Coord2) -> Option<Vec<Coord2>> {
        if !self.contains(start) || !self.contains(destination) {
            return None;
        }
        if start == destination {
            return Some(Vec::new());
        }

        let mut parents = HashMap::new();
        for step in Bfs::new(self, start) {
            parents.insert(step.node, step.parent);
            if step.node == destination {
                break;
            }
        }
        if !parents.contains_key(&destination) {
            return None;
        }

        let mut path = Vec::new();
        let mut cursor = destination;
        while cursor != start {
            path.push(cursor);
            cursor = parents.get(&cursor).copied().flatten()?;
        }
        path.reverse();
        Some(path)
    }

    /// Number of hops on the shortest route, `None` when unreachable.
    pub fn distance(&self, start: Coord2, destination: Coord2) -> Option<usize> {
        self.shortest_path(start, destination).map(|path| path.len())
    }

    /// Nodes exactly `depth` hops away from `start`, in discovery order.
    pub fn frontier_at_depth(&self, start: Coord2, depth: usize) -> Result<Vec<Coord2>> {
        Ok(self
            .reachable_from(start)?
            .skip_while(|step| step.depth < depth)
            .take_while(|step| step.depth == depth)
            .map(|step| step.node)
            .collect())
    }

    /// Removes every node that cannot be reached from `start`, returning how many were removed.
    pub fn prune_unreachable(&mut self, start: Coord2) -> Result<CellCount> {
        let reachable: HashSet<Coord2> = self.reachable_from(start)?.map(|step| step.node).collect();
        let doomed: Vec<Coord2> = self
            .iter_coords()
            .filter(|coords| !reachable.contains(coords))
            .collect();
        for &coords in &doomed {
            self.remove(coords);
        }
        if !doomed.is_empty() {
            log::debug!("Pruned {} nodes disconnected from {:?}", doomed.len(), start);
        }
        // bounded by the grid area
        Ok(doomed.len() as CellCount)
    }
}
