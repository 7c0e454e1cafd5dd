//! Game configuration.
//!
//! A game is configured once at startup. Everything that is externally
//! observable but not fixed by the rules (seed, tie-break between
//! simultaneous triggers, message retention) lives here.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Highest pilot skill a ship can have.
pub const MAX_PILOT_SKILL: i32 = 12;

/// How triggers with equal priority are ordered.
///
/// The rules do not say which of two simultaneous same-priority triggers
/// resolves first when they belong to different players, so the choice is
/// configurable. Registration order is always the final tie-break.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// First registered, first resolved.
    #[default]
    RegistrationOrder,
    /// Triggers owned by `first` resolve first, then the next seat, and so
    /// on around the table. Triggers without an owner go last.
    SeatOrder {
        /// The seat that resolves first (usually the player with initiative).
        first: PlayerId,
    },
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Seed for the default dice source.
    pub seed: u64,

    /// Ordering of same-priority triggers.
    pub tie_break: TieBreak,

    /// How many messages the game keeps in its history.
    pub message_history: usize,

    /// Most entries the resolution log holds before it drops its oldest
    /// half. 0 keeps everything.
    pub resolution_log_limit: usize,

    /// Upper clamp for pilot skill reads.
    pub max_pilot_skill: i32,
}

impl GameConfig {
    /// Create a new game configuration.
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            seed: 0,
            tie_break: TieBreak::default(),
            message_history: 256,
            resolution_log_limit: 65_536,
            max_pilot_skill: MAX_PILOT_SKILL,
        }
    }

    /// Set the dice seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the tie-break policy.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Set the message history capacity.
    #[must_use]
    pub fn with_message_history(mut self, capacity: usize) -> Self {
        self.message_history = capacity;
        self
    }

    /// Set the resolution log cap (0 for unbounded).
    #[must_use]
    pub fn with_resolution_log_limit(mut self, limit: usize) -> Self {
        self.resolution_log_limit = limit;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_config_defaults() {
        let config = GameConfig::new(2);
        assert_eq!(config.player_count, 2);
        assert_eq!(config.tie_break, TieBreak::RegistrationOrder);
        assert_eq!(config.max_pilot_skill, 12);
    }

    #[test]
    fn test_game_config_builder() {
        let config = GameConfig::new(3)
            .with_seed(99)
            .with_tie_break(TieBreak::SeatOrder { first: PlayerId::new(1) })
            .with_message_history(8)
            .with_resolution_log_limit(0);

        assert_eq!(config.seed, 99);
        assert_eq!(config.tie_break, TieBreak::SeatOrder { first: PlayerId::new(1) });
        assert_eq!(config.message_history, 8);
        assert_eq!(config.resolution_log_limit, 0);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_game_config_zero_players() {
        GameConfig::new(0);
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::new(2)
            .with_tie_break(TieBreak::SeatOrder { first: PlayerId::new(0) });
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
