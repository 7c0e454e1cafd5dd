//! Weapons a ship can attack with.

use serde::{Deserialize, Serialize};

/// Primary or secondary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    /// The printed primary weapon. Rolls the ship's firepower.
    Primary,
    /// A cannon, missile, torpedo or turret with its own attack value.
    Secondary,
}

/// A weapon carried by a ship.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub kind: WeaponKind,
    /// Attack dice for secondary weapons. Ignored for the primary weapon.
    pub attack: i32,
}

impl Weapon {
    /// The primary weapon.
    #[must_use]
    pub fn primary() -> Self {
        Self {
            name: "Primary Weapon".to_string(),
            kind: WeaponKind::Primary,
            attack: 0,
        }
    }

    /// A secondary weapon with a fixed attack value.
    #[must_use]
    pub fn secondary(name: impl Into<String>, attack: i32) -> Self {
        Self {
            name: name.into(),
            kind: WeaponKind::Secondary,
            attack,
        }
    }

    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.kind == WeaponKind::Primary
    }

    /// Dice this weapon rolls for a ship with `firepower`.
    #[must_use]
    pub fn attack_dice(&self, firepower: i32) -> i32 {
        match self.kind {
            WeaponKind::Primary => firepower.max(0),
            WeaponKind::Secondary => self.attack.max(0),
        }
    }
}
