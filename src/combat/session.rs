//! State of one attack sequence.

use serde::{Deserialize, Serialize};

use crate::core::ShipId;
use crate::ship::Weapon;

/// One attack from declaration to completion.
///
/// Created by `declare_attack` and discarded when the attack (and any
/// additional attack granted during it) is complete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSession {
    pub attacker: ShipId,
    pub defender: ShipId,
    /// The weapon currently chosen. An additional attack may change it.
    pub weapon: Weapon,
    /// An additional attack has been granted in this combat.
    pub second_attack_performed: bool,
    /// The first attack's outcome is final.
    pub attack_resolved: bool,
}

impl CombatSession {
    #[must_use]
    pub fn new(attacker: ShipId, defender: ShipId, weapon: Weapon) -> Self {
        Self {
            attacker,
            defender,
            weapon,
            second_attack_performed: false,
            attack_resolved: false,
        }
    }

    /// Can this combat still be extended by an additional attack?
    #[must_use]
    pub fn can_extend(&self) -> bool {
        !self.second_attack_performed && !self.attack_resolved
    }

    /// Close the combat to further extensions.
    pub fn mark_extended(&mut self) {
        self.second_attack_performed = true;
        self.attack_resolved = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extends_once() {
        let mut session = CombatSession::new(ShipId(0), ShipId(1), Weapon::primary());
        assert!(session.can_extend());
        session.mark_extended();
        assert!(!session.can_extend());
        assert!(session.second_attack_performed && session.attack_resolved);
    }
}
