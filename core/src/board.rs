use serde::{Deserialize, Serialize};

use crate::*;

/// Longest distance the progress indicator shows.
pub const DISTANCE_DISPLAY_CAP: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoardState {
    Active,
    /// The core was destroyed.
    Won,
    /// The virus was destroyed.
    Lost,
}

impl BoardState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    pub(crate) seed: Option<u64>,
    start: Coord2,
    waypoint: Option<Coord2>,
    core: Coord2,
    selected: Option<Coord2>,
    virus: Token,
    exposed_count: CellCount,
    state: BoardState,
}

impl Board {
    /// Generates a fresh board, see [`RandomBoardGenerator`].
    pub fn new(config: BoardConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(ambient_seed);
        log::debug!("seed: {seed}");
        RandomBoardGenerator::new(seed).generate(config)
    }

    /// Builds a hand-authored board: a full grid minus `removed`, with a core and firewalls
    /// placed, and `start` already visited.
    pub fn with_layout(
        size: Coord2,
        removed: &[Coord2],
        start: Coord2,
        core: Coord2,
        firewalls: &[Coord2],
    ) -> Result<Self> {
        let mut grid = Grid::new(size);
        for &coords in removed {
            grid.remove(grid.validate_coords(coords)?);
        }
        grid.place_token(core, Token::core())?;
        for &coords in firewalls {
            grid.place_token(coords, Token::firewall())?;
        }
        let mut exposed_count = 0;
        grid.reveal(start, &mut exposed_count)?;
        Ok(Self::assemble(grid, start, None, core, exposed_count))
    }

    /// Wraps a generated grid whose start node was already force-visited.
    pub(crate) fn assemble(
        grid: Grid,
        start: Coord2,
        waypoint: Option<Coord2>,
        core: Coord2,
        exposed_count: CellCount,
    ) -> Self {
        Self {
            grid,
            seed: None,
            start,
            waypoint,
            core,
            selected: Some(start),
            virus: Token::virus(),
            exposed_count,
            state: BoardState::Active,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn node(&self, coords: Coord2) -> Option<&Node> {
        self.grid.get(coords)
    }

    /// Seed the board was generated from, `None` for hand-authored layouts.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn waypoint(&self) -> Option<Coord2> {
        self.waypoint
    }

    /// Node the core was placed on, it stays there after the core is destroyed.
    pub fn core(&self) -> Coord2 {
        self.core
    }

    /// The core token while it is alive.
    pub fn core_token(&self) -> Option<&Token> {
        self.grid
            .get(self.core)
            .and_then(Node::token)
            .filter(|token| token.kind() == TokenKind::Core)
    }

    pub fn selected(&self) -> Option<Coord2> {
        self.selected
    }

    pub fn virus(&self) -> &Token {
        &self.virus
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Hops from the selected node to the core, `None` once the core is gone or cut off.
    pub fn distance_to_core(&self) -> Option<usize> {
        self.core_token()?;
        self.grid.distance(self.selected?, self.core)
    }

    pub fn distance_to_core_capped(&self) -> Option<usize> {
        self.distance_to_core()
            .map(|distance| distance.min(DISTANCE_DISPLAY_CAP))
    }

    pub fn can_visit(&self, coords: Coord2) -> bool {
        if self.state.is_finished() {
            return false;
        }
        let Some(node) = self.grid.get(coords) else {
            return false;
        };
        if !node.is_exposed() || node.is_blocked() {
            return false;
        }
        !node.is_visited() || node.token().is_some()
    }

    /// Visits `coords`: a first visit exposes the surroundings, a repeat visit attacks the token
    /// sitting there.
    ///
    /// Anything [`Board::can_visit`] rejects is a no-op.
    pub fn visit(&mut self, coords: Coord2) -> VisitOutcome {
        if !self.can_visit(coords) {
            log::trace!("Ignoring visit to {coords:?}");
            return VisitOutcome::NoChange;
        }
        self.selected = Some(coords);

        let first_visit = self.grid.get(coords).is_some_and(|node| !node.is_visited());
        if first_visit {
            match self.grid.reveal(coords, &mut self.exposed_count) {
                Ok(()) => VisitOutcome::Visited,
                Err(err) => {
                    log::warn!("Could not reveal {coords:?}: {err}");
                    VisitOutcome::NoChange
                }
            }
        } else {
            self.attack(coords)
        }
    }

    fn attack(&mut self, coords: Coord2) -> VisitOutcome {
        let Some(defender) = self.grid.get_mut(coords).and_then(|node| node.token.as_mut()) else {
            return VisitOutcome::NoChange;
        };
        let kind = defender.kind();
        let outcome = resolve_attack(&mut self.virus, defender);
        log::trace!(
            "Virus attacked {kind:?} at {coords:?}: {outcome:?}, virus at {}",
            self.virus.coherence()
        );

        if outcome.defender_destroyed() {
            self.grid.detach_token(coords);
            if kind == TokenKind::Core {
                log::debug!("Core destroyed at {coords:?}");
                self.state = BoardState::Won;
                return VisitOutcome::Won;
            }
            return VisitOutcome::Destroyed;
        }
        if outcome.attacker_destroyed() {
            log::debug!("Virus destroyed by {kind:?} at {coords:?}");
            self.state = BoardState::Lost;
            return VisitOutcome::Lost;
        }
        VisitOutcome::Attacked
    }

    /// The exposed, unvisited node addressed by a keystroke, `raw` being the character code.
    ///
    /// Letters map onto input tags from `'a'` upwards; the first match in row-major order wins.
    pub fn node_for_input(&self, raw: u32) -> Option<Coord2> {
        let tag = raw.checked_sub(u32::from(b'a'))?;
        let tag = CellCount::try_from(tag).ok()?;
        self.grid
            .iter_nodes()
            .find(|node| node.is_exposed() && !node.is_visited() && node.input_tag() == tag)
            .map(Node::coords)
    }

    /// Permanently removes a node. A live firewall on it lifts its blocks first.
    pub fn remove_node(&mut self, coords: Coord2) -> Result<Node> {
        self.grid.node(coords)?;
        if let Some(token) = self.grid.detach_token(coords) {
            if token.kind() == TokenKind::Core {
                log::warn!("Removed the core at {coords:?}");
            }
        }
        if self.selected == Some(coords) {
            self.selected = None;
        }
        self.grid.remove(coords).ok_or(BoardError::MissingNode(coords))
    }
}

impl Grid {
    pub(crate) fn place_token(&mut self, coords: Coord2, mut token: Token) -> Result<()> {
        let node = self.node_mut(coords)?;
        if let Some(previous) = &node.token {
            log::warn!("Replacing {:?} at {coords:?}", previous.kind());
        }
        token.attach(coords);
        node.token = Some(token);
        Ok(())
    }

    /// First-visit effects: the node is visited, it and its neighbors are exposed, and its token
    /// gets exposed.
    ///
    /// Newly exposed neighbors are stamped with the running `exposed_count` as their input tag.
    /// The visited node itself is never counted.
    pub(crate) fn reveal(&mut self, coords: Coord2, exposed_count: &mut CellCount) -> Result<()> {
        let node = self.node_mut(coords)?;
        node.expose_untagged();
        node.mark_visited();

        for neighbor in self.neighbors(coords) {
            if let Some(node) = self.get_mut(neighbor)
                && node.expose(*exposed_count)
            {
                *exposed_count = exposed_count.saturating_add(1);
            }
        }

        self.expose_token(coords);
        Ok(())
    }

    fn expose_token(&mut self, coords: Coord2) {
        let Some(token) = self.get_mut(coords).and_then(|node| node.token.as_mut()) else {
            return;
        };
        if !token.mark_exposed() {
            return;
        }
        match token.kind() {
            TokenKind::Firewall => {
                for neighbor in self.neighbors(coords) {
                    if let Some(node) = self.get_mut(neighbor) {
                        node.block();
                    }
                }
            }
            TokenKind::Core | TokenKind::Virus => {}
        }
    }

    /// Destruction hook: takes the token off its node, which stays on the grid.
    pub(crate) fn detach_token(&mut self, coords: Coord2) -> Option<Token> {
        let mut token = self.get_mut(coords)?.token.take()?;
        token.detach();
        if token.kind() == TokenKind::Firewall && token.is_exposed() {
            for neighbor in self.neighbors(coords) {
                if let Some(node) = self.get_mut(neighbor) {
                    node.unblock();
                }
            }
        }
        Some(token)
    }
}
