//! Sample pilots and upgrades.
//!
//! A small, playable set: enough ship types to exercise pilot abilities,
//! upgrade abilities, secondary weapons and every stat floor.

use crate::abilities::chopper_ability;
use crate::ship::{ShipDefinition, Upgrade, UpgradeType, Weapon};

pub use crate::abilities::{gunner, hull_upgrade, shield_upgrade, stealth_device, veteran_instincts};

/// "Chopper", VCX-100. Stresses every ship that bumps into him.
#[must_use]
pub fn chopper() -> ShipDefinition {
    vcx_100("\"Chopper\"")
        .unique()
        .with_pilot_skill(4)
        .with_cost(37)
        .with_ability(chopper_ability)
}

/// Lothal Rebel, VCX-100. No pilot ability.
#[must_use]
pub fn lothal_rebel() -> ShipDefinition {
    vcx_100("Lothal Rebel").with_pilot_skill(3).with_cost(35)
}

fn vcx_100(pilot: &str) -> ShipDefinition {
    ShipDefinition::new("VCX-100", pilot)
        .with_firepower(4)
        .with_agility(0)
        .with_hull(10)
        .with_shields(6)
        .with_slot(UpgradeType::System)
        .with_slot(UpgradeType::Turret)
        .with_slot(UpgradeType::Torpedo)
        .with_slot(UpgradeType::Crew)
        .with_slot(UpgradeType::Crew)
        .with_slot(UpgradeType::Modification)
        .with_slot(UpgradeType::Title)
}

/// Rookie Pilot, X-wing.
#[must_use]
pub fn rookie_pilot() -> ShipDefinition {
    ShipDefinition::new("X-wing", "Rookie Pilot")
        .with_pilot_skill(2)
        .with_firepower(3)
        .with_agility(2)
        .with_hull(3)
        .with_shields(2)
        .with_slot(UpgradeType::Torpedo)
        .with_slot(UpgradeType::Astromech)
        .with_slot(UpgradeType::Modification)
        .with_cost(21)
}

/// Academy Pilot, TIE Fighter.
#[must_use]
pub fn academy_pilot() -> ShipDefinition {
    ShipDefinition::new("TIE Fighter", "Academy Pilot")
        .with_pilot_skill(1)
        .with_firepower(2)
        .with_agility(3)
        .with_hull(3)
        .with_shields(0)
        .with_cost(12)
}

/// Black Squadron Pilot, TIE Fighter with an elite slot.
#[must_use]
pub fn black_squadron_pilot() -> ShipDefinition {
    ShipDefinition::new("TIE Fighter", "Black Squadron Pilot")
        .with_pilot_skill(4)
        .with_firepower(2)
        .with_agility(3)
        .with_hull(3)
        .with_shields(0)
        .with_slot(UpgradeType::Elite)
        .with_slot(UpgradeType::Modification)
        .with_cost(14)
}

/// Ion Cannon Turret: secondary weapon, attack 3.
#[must_use]
pub fn ion_cannon_turret() -> Upgrade {
    Upgrade::new("Ion Cannon Turret", UpgradeType::Turret, 5).with_weapon(Weapon::secondary("Ion Cannon Turret", 3))
}
