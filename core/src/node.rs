use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible progression of a node. Blocking is tracked separately.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeState {
    Hidden,
    Exposed,
    Visited,
}

impl Default for NodeState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    coords: Coord2,
    visited: bool,
    exposed: bool,
    block_count: u8,
    input_tag: CellCount,
    pub(crate) token: Option<Token>,
}

impl Node {
    pub const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            visited: false,
            exposed: false,
            block_count: 0,
            input_tag: 0,
            token: None,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn is_visited(&self) -> bool {
        self.visited
    }

    pub const fn is_exposed(&self) -> bool {
        self.exposed
    }

    pub const fn is_blocked(&self) -> bool {
        self.block_count > 0
    }

    pub const fn block_count(&self) -> u8 {
        self.block_count
    }

    /// Letter offset the input layer uses to address this node, see [`Board::node_for_input`].
    pub const fn input_tag(&self) -> CellCount {
        self.input_tag
    }

    pub const fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub const fn state(&self) -> NodeState {
        if self.visited {
            NodeState::Visited
        } else if self.exposed {
            NodeState::Exposed
        } else {
            NodeState::Hidden
        }
    }

    /// Exposes a node without giving it an input tag, used for the node being visited.
    pub(crate) fn expose_untagged(&mut self) {
        self.exposed = true;
    }

    /// Marks the node exposed, stamping `tag` if it was hidden until now.
    pub(crate) fn expose(&mut self, tag: CellCount) -> bool {
        if self.exposed {
            return false;
        }
        self.exposed = true;
        self.input_tag = tag;
        true
    }

    pub(crate) fn mark_visited(&mut self) {
        debug_assert!(self.exposed, "visited node must be exposed");
        self.visited = true;
    }

    pub(crate) fn block(&mut self) {
        self.block_count = self.block_count.saturating_add(1);
    }

    pub(crate) fn unblock(&mut self) {
        if self.block_count == 0 {
            log::warn!("Unblocking {:?} which has no blocks", self.coords);
            return;
        }
        self.block_count -= 1;
    }
}
