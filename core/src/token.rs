use serde::{Deserialize, Serialize};

use crate::*;

/// Coherence and strength values.
pub type Points = u16;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// The roaming attacker driven by the player.
    Virus,
    /// The target, destroying it wins the board.
    Core,
    /// Blocks every neighbor of its node while alive and exposed.
    Firewall,
}

impl TokenKind {
    /// Starting `(coherence, strength)` for a fresh token of this kind.
    pub const fn base_stats(self) -> (Points, Points) {
        match self {
            Self::Virus => (80, 20),
            Self::Core => (70, 10),
            Self::Firewall => (80, 10),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    kind: TokenKind,
    coherence: Points,
    strength: Points,
    node: Option<Coord2>,
    exposed: bool,
}

impl Token {
    pub const fn new(kind: TokenKind) -> Self {
        let (coherence, strength) = kind.base_stats();
        Self {
            kind,
            coherence,
            strength,
            node: None,
            exposed: false,
        }
    }

    pub const fn virus() -> Self {
        Self::new(TokenKind::Virus)
    }

    pub const fn core() -> Self {
        Self::new(TokenKind::Core)
    }

    pub const fn firewall() -> Self {
        Self::new(TokenKind::Firewall)
    }

    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    pub const fn coherence(&self) -> Points {
        self.coherence
    }

    pub const fn strength(&self) -> Points {
        self.strength
    }

    /// The node this token sits on, `None` for the virus and for detached tokens.
    pub const fn node(&self) -> Option<Coord2> {
        self.node
    }

    pub const fn is_destroyed(&self) -> bool {
        self.coherence == 0
    }

    /// Whether the exposure hook already ran for this token.
    pub const fn is_exposed(&self) -> bool {
        self.exposed
    }

    pub(crate) fn attach(&mut self, coords: Coord2) {
        self.node = Some(coords);
    }

    pub(crate) fn detach(&mut self) {
        self.node = None;
    }

    pub(crate) fn mark_exposed(&mut self) -> bool {
        !core::mem::replace(&mut self.exposed, true)
    }

    /// Lowers coherence, saturating at zero.
    ///
    /// Returns `true` only on the hit that brings coherence to zero, so the destruction hook
    /// runs exactly once.
    pub fn take_damage(&mut self, amount: Points) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.coherence = self.coherence.saturating_sub(amount);
        self.is_destroyed()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Defender survived and struck back.
    Exchanged { attacker_destroyed: bool },
    /// Defender was destroyed, no retaliation.
    DefenderDestroyed,
}

impl AttackOutcome {
    pub const fn defender_destroyed(self) -> bool {
        matches!(self, Self::DefenderDestroyed)
    }

    pub const fn attacker_destroyed(self) -> bool {
        matches!(
            self,
            Self::Exchanged {
                attacker_destroyed: true
            }
        )
    }
}

/// One mutual exchange: the defender takes the attacker's strength and, if still standing,
/// hits back once with its own.
pub fn resolve_attack(attacker: &mut Token, defender: &mut Token) -> AttackOutcome {
    if defender.take_damage(attacker.strength) {
        return AttackOutcome::DefenderDestroyed;
    }
    let attacker_destroyed = attacker.take_damage(defender.strength);
    AttackOutcome::Exchanged { attacker_destroyed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firewall_trades_blows_with_virus() {
        let mut virus = Token::virus();
        let mut firewall = Token::firewall();

        let outcome = resolve_attack(&mut virus, &mut firewall);

        assert_eq!(
            outcome,
            AttackOutcome::Exchanged {
                attacker_destroyed: false
            }
        );
        assert_eq!(firewall.coherence(), 60);
        assert_eq!(virus.coherence(), 70);
    }

    #[test]
    fn lethal_hit_skips_retaliation() {
        let mut virus = Token::virus();
        let mut core = Token::core();
        for _ in 0..3 {
            resolve_attack(&mut virus, &mut core);
        }
        assert_eq!(core.coherence(), 10);
        assert_eq!(virus.coherence(), 50);

        let outcome = resolve_attack(&mut virus, &mut core);

        assert!(outcome.defender_destroyed());
        assert_eq!(core.coherence(), 0);
        assert_eq!(virus.coherence(), 50);
    }

    #[test]
    fn exact_lethal_counts_as_destroyed() {
        let mut virus = Token::virus();
        let mut firewall = Token::firewall();
        assert!(!firewall.take_damage(60));

        assert!(resolve_attack(&mut virus, &mut firewall).defender_destroyed());
        assert_eq!(virus.coherence(), 80);
    }

    #[test]
    fn destruction_reported_once() {
        let mut core = Token::core();
        assert!(core.take_damage(500));
        assert_eq!(core.coherence(), 0);
        assert!(!core.take_damage(10));
        assert!(core.is_destroyed());
    }

    #[test]
    fn attacker_can_fall_to_retaliation() {
        let mut virus = Token::virus();
        let mut firewall = Token::firewall();
        virus.take_damage(75);

        let outcome = resolve_attack(&mut virus, &mut firewall);

        assert!(outcome.attacker_destroyed());
        assert!(virus.is_destroyed());
        assert_eq!(firewall.coherence(), 60);
    }
}
