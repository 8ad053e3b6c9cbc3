use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("No node present at {0:?}")]
    MissingNode(Coord2),
    #[error("Board has no node to start from")]
    NoStartCandidates,
    #[error("No waypoint candidates, board is too small")]
    NoWaypointCandidates,
    #[error("No core candidates, board is too small")]
    NoCoreCandidates,
    #[error("No firewall candidates left after pruning")]
    NoFirewallCandidates,
}

impl BoardError {
    /// Whether generation gave up, as opposed to a caller passing a bad node.
    pub const fn is_construction_failure(self) -> bool {
        use BoardError::*;
        match self {
            InvalidCoords | MissingNode(_) => false,
            NoStartCandidates | NoWaypointCandidates | NoCoreCandidates | NoFirewallCandidates => {
                true
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, BoardError>;
