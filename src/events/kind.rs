//! Event kinds.
//!
//! Every channel on a ship's bus is keyed by an `EventKind`. The engine
//! fires a fixed set of lifecycle kinds itself; games may define more from
//! [`EventKind::FIRST_CUSTOM`] upward and fire them through the same bus.

use serde::{Deserialize, Serialize};

/// Event kind identifier.
///
/// Trigger resolution is keyed by the same identifier: a trigger registered
/// for `COMBAT_PHASE_START` resolves when the combat phase resolves that kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventKind(pub u32);

impl EventKind {
    /// A new round begins.
    pub const ROUND_START: EventKind = EventKind(1);
    /// The round ends; per-round flags are cleared on this kind.
    pub const ROUND_END: EventKind = EventKind(2);
    /// The combat phase begins.
    pub const COMBAT_PHASE_START: EventKind = EventKind(3);
    /// The combat phase ends.
    pub const COMBAT_PHASE_END: EventKind = EventKind(4);
    /// The ship's attack dealt damage (fired on the attacker).
    pub const ATTACK_HIT: EventKind = EventKind(5);
    /// The ship's attack dealt no damage (fired on the attacker).
    pub const ATTACK_MISSED: EventKind = EventKind(6);
    /// An attack finished; abilities may offer an extra attack.
    pub const COMBAT_CHECK_EXTRA_ATTACK: EventKind = EventKind(7);
    /// A token was placed on the ship.
    pub const TOKEN_ASSIGNED: EventKind = EventKind(8);
    /// A token was removed from the ship.
    pub const TOKEN_REMOVED: EventKind = EventKind(9);
    /// A stat changed or a modifier was added or removed.
    pub const STATS_CHANGED: EventKind = EventKind(10);
    /// The ship's hull reached zero.
    pub const SHIP_DESTROYED: EventKind = EventKind(11);
    /// Another ship bumped into this one.
    pub const SHIP_BUMPED: EventKind = EventKind(12);

    /// First identifier available for game-defined kinds.
    pub const FIRST_CUSTOM: u32 = 1000;

    /// Create a new event kind.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Create a game-defined event kind, offset past the built-in range.
    #[must_use]
    pub const fn custom(offset: u32) -> Self {
        Self(Self::FIRST_CUSTOM + offset)
    }

    /// Is this a game-defined kind?
    #[must_use]
    pub const fn is_custom(self) -> bool {
        self.0 >= Self::FIRST_CUSTOM
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Name of a built-in kind.
    #[must_use]
    pub fn builtin_name(self) -> Option<&'static str> {
        let name = match self {
            Self::ROUND_START => "RoundStart",
            Self::ROUND_END => "RoundEnd",
            Self::COMBAT_PHASE_START => "CombatPhaseStart",
            Self::COMBAT_PHASE_END => "CombatPhaseEnd",
            Self::ATTACK_HIT => "AttackHit",
            Self::ATTACK_MISSED => "AttackMissed",
            Self::COMBAT_CHECK_EXTRA_ATTACK => "CombatCheckExtraAttack",
            Self::TOKEN_ASSIGNED => "TokenAssigned",
            Self::TOKEN_REMOVED => "TokenRemoved",
            Self::STATS_CHANGED => "StatsChanged",
            Self::SHIP_DESTROYED => "ShipDestroyed",
            Self::SHIP_BUMPED => "ShipBumped",
            _ => return None,
        };
        Some(name)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.builtin_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "EventKind({})", self.0),
        }
    }
}
