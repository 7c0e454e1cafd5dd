//! Ship stats and their floors.
//!
//! Stored values are clamped on write; effective values are computed on
//! read by running after-get hooks (and, for pilot skill, the front of the
//! modifier stack) over the stored value and clamping the result. Reads
//! never write back.

use serde::{Deserialize, Serialize};

/// A ship stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Initiative in the combat phase, 0..=12.
    PilotSkill,
    /// Attack dice for the primary weapon.
    Firepower,
    /// Defense dice.
    Agility,
    /// Current hull.
    Hull,
    /// Current shields.
    Shields,
    /// Starting and maximum hull.
    MaxHull,
    /// Starting and maximum shields.
    MaxShields,
}

impl Stat {
    /// Lowest value a read of this stat can return.
    #[must_use]
    pub const fn floor(self) -> i32 {
        match self {
            Stat::MaxHull => 1,
            _ => 0,
        }
    }

    /// Clamp a value to this stat's floor.
    ///
    /// Pilot skill also has a ceiling; see [`clamp_pilot_skill`].
    #[must_use]
    pub fn clamp(self, value: i32) -> i32 {
        value.max(self.floor())
    }
}

/// Clamp a pilot skill value to `0..=max`.
#[must_use]
pub fn clamp_pilot_skill(value: i32, max: i32) -> i32 {
    value.clamp(0, max.max(0))
}

/// Effective stats of a ship at one moment.
///
/// This is what the roster displays and what tests compare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipStats {
    pub pilot_skill: i32,
    pub firepower: i32,
    pub agility: i32,
    pub hull: i32,
    pub shields: i32,
    pub max_hull: i32,
    pub max_shields: i32,
}

impl ShipStats {
    /// Read one stat from the snapshot.
    #[must_use]
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::PilotSkill => self.pilot_skill,
            Stat::Firepower => self.firepower,
            Stat::Agility => self.agility,
            Stat::Hull => self.hull,
            Stat::Shields => self.shields,
            Stat::MaxHull => self.max_hull,
            Stat::MaxShields => self.max_shields,
        }
    }
}
