//! Player identification.
//!
//! Players own ships and answer decisions. The engine only needs a stable
//! identifier and the seat arithmetic used by the trigger tie-break policy.

use serde::{Deserialize, Serialize};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rust_skirmish::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(2).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// Distance in seats from `first`, wrapping around the table.
    ///
    /// `first` itself is seat 0, the player after it seat 1, and so on.
    ///
    /// ```
    /// use rust_skirmish::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).seat_after(PlayerId::new(1), 2), 1);
    /// assert_eq!(PlayerId::new(1).seat_after(PlayerId::new(1), 2), 0);
    /// ```
    #[must_use]
    pub fn seat_after(self, first: PlayerId, player_count: usize) -> usize {
        if player_count == 0 {
            return self.index();
        }
        (self.index() + player_count - first.index() % player_count) % player_count
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id() {
        let p = PlayerId::new(3);
        assert_eq!(p.0, 3);
        assert_eq!(p.index(), 3);
    }

    #[test]
    fn test_player_all() {
        let players: Vec<_> = PlayerId::all(4).collect();
        assert_eq!(players.len(), 4);
        assert_eq!(players[3], PlayerId::new(3));
    }

    #[test]
    fn test_seat_after_wraps() {
        let first = PlayerId::new(2);
        assert_eq!(PlayerId::new(2).seat_after(first, 4), 0);
        assert_eq!(PlayerId::new(3).seat_after(first, 4), 1);
        assert_eq!(PlayerId::new(0).seat_after(first, 4), 2);
        assert_eq!(PlayerId::new(1).seat_after(first, 4), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PlayerId::new(1)), "Player 1");
    }

    #[test]
    fn test_serialization() {
        let p = PlayerId::new(1);
        let json = serde_json::to_string(&p).unwrap();
        let deserialized: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(p, deserialized);
    }
}
