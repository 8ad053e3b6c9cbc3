use alloc::vec::Vec;
use hashbrown::HashSet;
use rand::prelude::*;

use crate::*;

/// Hops between the start and the waypoint the guaranteed route passes through.
pub const WAYPOINT_DEPTH: usize = 5;

/// Minimum hops between the start and the core.
pub const CORE_MIN_DISTANCE: usize = 8;

/// One deletion is drawn per this many cells of the board.
pub const DELETION_DIVISOR: CellCount = 4;

/// Firewall placements drawn, repeats collapse into one.
pub const FIREWALL_DRAWS: usize = 6;

pub trait BoardGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board>;
}

/// Generation strategy that carves a random board around a guaranteed start, waypoint and core
/// route.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut board = generate_with_rng(config.size, &mut rng)?;
        board.seed = Some(self.seed);
        Ok(board)
    }
}

/// Seed for boards nobody asked to reproduce.
pub fn ambient_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Runs the whole generation pipeline against the given random source.
///
/// 1. pick a start among the nodes with the fewest neighbors and visit it
/// 2. pick a waypoint [`WAYPOINT_DEPTH`] hops out and a core at least [`CORE_MIN_DISTANCE`] out
/// 3. lock the shortest start → waypoint → core route
/// 4. delete random unlocked nodes, then prune whatever got cut off from the start
/// 5. drop firewalls on edge nodes or next to the core
pub fn generate_with_rng(size: Coord2, rng: &mut SmallRng) -> Result<Board> {
    let mut grid = Grid::new(size);
    let mut exposed_count = 0;

    let start = pick_start(&grid, rng)?;
    grid.reveal(start, &mut exposed_count)?;

    let waypoint = *grid
        .frontier_at_depth(start, WAYPOINT_DEPTH)?
        .choose(rng)
        .ok_or(BoardError::NoWaypointCandidates)?;

    let core_candidates: Vec<Coord2> = grid
        .reachable_from(start)?
        .filter(|step| step.depth >= CORE_MIN_DISTANCE)
        .map(|step| step.node)
        .collect();
    let core = *core_candidates
        .choose(rng)
        .ok_or(BoardError::NoCoreCandidates)?;
    grid.place_token(core, Token::core())?;
    log::debug!("start: {start:?}, waypoint: {waypoint:?}, core: {core:?}");

    let mut locked: HashSet<Coord2> = HashSet::from([start]);
    for (from, to) in [(start, waypoint), (waypoint, core)] {
        match grid.shortest_path(from, to) {
            Some(path) => locked.extend(path),
            None => log::warn!("No route from {from:?} to {to:?} on a full grid"),
        }
    }

    let population: Vec<Coord2> = grid
        .iter_coords()
        .filter(|coords| !locked.contains(coords))
        .collect();
    let deletions = mult(size.0, size.1) / DELETION_DIVISOR;
    for _ in 0..deletions {
        if let Some(&coords) = population.choose(rng) {
            grid.remove(coords);
        }
    }
    grid.prune_unreachable(start)?;

    let firewall_candidates = firewall_candidates(&grid, start, core);
    if firewall_candidates.is_empty() {
        return Err(BoardError::NoFirewallCandidates);
    }
    for _ in 0..FIREWALL_DRAWS {
        let Some(&coords) = firewall_candidates.choose(rng) else {
            break;
        };
        if grid.get(coords).is_some_and(|node| node.token().is_none()) {
            grid.place_token(coords, Token::firewall())?;
        }
    }

    log::debug!(
        "Generated {}x{} board with {} nodes",
        size.0,
        size.1,
        grid.node_count()
    );
    Ok(Board::assemble(grid, start, Some(waypoint), core, exposed_count))
}

/// Edge nodes and nodes next to the core, never the start or the core itself.
fn firewall_candidates(grid: &Grid, start: Coord2, core: Coord2) -> Vec<Coord2> {
    grid.iter_coords()
        .filter(|&coords| coords != start && coords != core)
        .filter(|&coords| grid.degree(coords) < 6 || grid.distance(coords, core) == Some(1))
        .collect()
}

/// A node of minimum degree, ties broken uniformly.
fn pick_start(grid: &Grid, rng: &mut SmallRng) -> Result<Coord2> {
    let min_degree = grid
        .iter_coords()
        .map(|coords| grid.degree(coords))
        .min()
        .ok_or(BoardError::NoStartCandidates)?;
    let candidates: Vec<Coord2> = grid
        .iter_coords()
        .filter(|&coords| grid.degree(coords) == min_degree)
        .collect();
    candidates
        .choose(rng)
        .copied()
        .ok_or(BoardError::NoStartCandidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(seed: u64) -> Board {
        RandomBoardGenerator::new(seed)
            .generate(BoardConfig::default())
            .unwrap()
    }

    fn firewalls(board: &Board) -> Vec<Coord2> {
        board
            .grid()
            .iter_nodes()
            .filter(|node| node.token().is_some_and(|t| t.kind() == TokenKind::Firewall))
            .map(Node::coords)
            .collect()
    }

    #[test]
    fn same_seed_same_board() {
        let a = generate(7);
        let b = generate(7);

        assert_eq!(a, b);
        assert_eq!(a.seed(), Some(7));
        assert_eq!(firewalls(&a), firewalls(&b));
        assert_eq!(
            a.grid().iter_coords().collect::<Vec<_>>(),
            b.grid().iter_coords().collect::<Vec<_>>()
        );
    }

    #[test]
    fn injected_rng_matches_seeded_generator() {
        let mut rng = SmallRng::seed_from_u64(99);
        let board = generate_with_rng((7, 7), &mut rng).unwrap();

        assert_eq!(board.grid(), generate(99).grid());
        assert_eq!(board.seed(), None);
    }

    #[test]
    fn every_node_reachable_from_start() {
        for seed in 0..32 {
            let board = generate(seed);
            let start = board.start();
            for coords in board.grid().iter_coords() {
                assert!(
                    board.grid().shortest_path(start, coords).is_some(),
                    "seed {seed}: {coords:?} cut off"
                );
            }
        }
    }

    #[test]
    fn route_landmarks_keep_their_distances() {
        for seed in 0..32 {
            let board = generate(seed);
            let grid = board.grid();
            let start = board.start();
            let waypoint = board.waypoint().unwrap();

            assert_eq!(grid.distance(start, waypoint), Some(WAYPOINT_DEPTH));
            assert!(grid.distance(start, board.core()).unwrap() >= CORE_MIN_DISTANCE);
            assert!(grid.distance(waypoint, board.core()).is_some());
        }
    }

    #[test]
    fn start_has_minimum_degree_of_full_grid() {
        let board = generate(3);
        let full = Grid::new((7, 7));
        let min_degree = full.iter_coords().map(|c| full.degree(c)).min().unwrap();

        assert_eq!(full.degree(board.start()), min_degree);
        let start = board.node(board.start()).unwrap();
        assert!(start.is_visited());
        assert_eq!(board.selected(), Some(board.start()));
    }

    #[test]
    fn exactly_one_core_and_few_firewalls() {
        for seed in 0..32 {
            let board = generate(seed);
            let cores = board
                .grid()
                .iter_nodes()
                .filter(|node| node.token().is_some_and(|t| t.kind() == TokenKind::Core))
                .count();
            let walls = firewalls(&board);

            assert_eq!(cores, 1);
            assert_eq!(board.core_token().map(Token::node), Some(Some(board.core())));
            assert!(!walls.is_empty() && walls.len() <= FIREWALL_DRAWS);
            assert!(!walls.contains(&board.start()));
            // nothing is blocked until a firewall gets visited
            assert!(board.grid().iter_nodes().all(|node| !node.is_blocked()));
        }
    }

    #[test]
    fn firewalls_may_surround_an_interior_core() {
        let grid = Grid::new((7, 7));
        let core = (3, 3);

        let candidates = firewall_candidates(&grid, (0, 0), core);

        for neighbor in grid.neighbors(core) {
            assert_eq!(grid.degree(neighbor), 6);
            assert!(candidates.contains(&neighbor), "{neighbor:?}");
        }
        assert!(!candidates.contains(&(2, 2)));
        assert!(!candidates.contains(&core));
        assert!(!candidates.contains(&(0, 0)));
        assert!(candidates.contains(&(0, 3)));
        // 24 border nodes minus the start, plus the six around the core
        assert_eq!(candidates.len(), 23 + 6);
    }

    #[test]
    fn deletion_thins_the_board() {
        for seed in 0..8 {
            let board = generate(seed);
            assert!(board.grid().node_count() < 49);
            assert!(usize::from(board.grid().node_count()) > CORE_MIN_DISTANCE);
        }
    }

    #[test]
    fn tiny_boards_fail_to_generate() {
        let result = RandomBoardGenerator::new(1).generate(BoardConfig::new((3, 3), None));
        assert_eq!(result, Err(BoardError::NoWaypointCandidates));
        assert!(result.unwrap_err().is_construction_failure());

        // deep enough for a waypoint, too shallow for a core
        let result = RandomBoardGenerator::new(1).generate(BoardConfig::new((1, 7), None));
        assert_eq!(result, Err(BoardError::NoCoreCandidates));
    }

    #[test]
    fn unseeded_boards_record_their_seed() {
        let board = Board::new(BoardConfig::default()).unwrap();
        let seed = board.seed().unwrap();

        let again = Board::new(BoardConfig::default().with_seed(seed)).unwrap();
        assert_eq!(board, again);
    }
}
