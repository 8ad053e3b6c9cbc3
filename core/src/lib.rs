#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use node::*;
pub use token::*;
pub use traversal::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod grid;
mod node;
mod token;
mod traversal;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// `(height, width)`
    pub size: Coord2,
    /// Fixed seed for reproducible boards, `None` picks one from the clock.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord2, seed: Option<u64>) -> Self {
        Self { size, seed }
    }

    pub fn new((height, width): Coord2, seed: Option<u64>) -> Self {
        let height = height.clamp(1, Coord::MAX);
        let width = width.clamp(1, Coord::MAX);
        Self::new_unchecked((height, width), seed)
    }

    pub const fn with_seed(self, seed: u64) -> Self {
        Self::new_unchecked(self.size, Some(seed))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked((7, 7), None)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VisitOutcome {
    NoChange,
    /// First visit, the node and its neighbors are now exposed.
    Visited,
    /// Both tokens survived an exchange.
    Attacked,
    /// The defending token was destroyed.
    Destroyed,
    Won,
    Lost,
}

impl VisitOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_empty_dimensions() {
        let config = BoardConfig::new((0, 9), None);
        assert_eq!(config.size, (1, 9));
        assert_eq!(config.total_cells(), 9);
    }

    #[test]
    fn config_reads_from_json_without_seed() {
        let config: BoardConfig = serde_json::from_str(r#"{"size":[9,11]}"#).unwrap();
        assert_eq!(config, BoardConfig::new((9, 11), None));

        let config: BoardConfig = serde_json::from_str(r#"{"size":[7,7],"seed":42}"#).unwrap();
        assert_eq!(config, BoardConfig::default().with_seed(42));
    }
}
