//! Identifiers for ships and the abilities installed on them.
//!
//! Ships are allocated densely by the game context, so a `ShipId` doubles
//! as an index into the ship table. Abilities are indexed per ship in
//! installation order and are never removed, only deactivated.

use serde::{Deserialize, Serialize};

/// Unique identifier for a ship within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipId(pub u32);

impl ShipId {
    /// Create a new ship ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position in the game's ship table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for ShipId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ship({})", self.0)
    }
}

/// Index of an ability on its host ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityId(pub u16);

impl AbilityId {
    /// Create a new ability ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Position in the host's ability list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ability({})", self.0)
    }
}

/// Fully qualified reference to one installed ability.
///
/// Handlers capture this instead of a pointer to the ability so they can
/// look up its state through the game context when they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityRef {
    /// The ship the ability is installed on.
    pub ship: ShipId,
    /// The ability's index on that ship.
    pub ability: AbilityId,
}

impl AbilityRef {
    /// Create a new ability reference.
    #[must_use]
    pub const fn new(ship: ShipId, ability: AbilityId) -> Self {
        Self { ship, ability }
    }
}

impl std::fmt::Display for AbilityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.ship, self.ability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_id() {
        let id = ShipId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.index(), 7);
        assert_eq!(ShipId::from(7), id);
        assert_eq!(format!("{}", id), "Ship(7)");
    }

    #[test]
    fn test_ability_ref_display() {
        let r = AbilityRef::new(ShipId::new(2), AbilityId::new(1));
        assert_eq!(format!("{}", r), "Ship(2)/Ability(1)");
    }

    #[test]
    fn test_ship_id_ordering() {
        let mut ids = vec![ShipId(3), ShipId(1), ShipId(2)];
        ids.sort();
        assert_eq!(ids, vec![ShipId(1), ShipId(2), ShipId(3)]);
    }

    #[test]
    fn test_serialization() {
        let r = AbilityRef::new(ShipId::new(4), AbilityId::new(0));
        let json = serde_json::to_string(&r).unwrap();
        let deserialized: AbilityRef = serde_json::from_str(&json).unwrap();
        assert_eq!(r, deserialized);
    }
}
