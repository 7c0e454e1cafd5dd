//! Upgrade cards and the slots they fit into.
//!
//! A ship's definition prints a row of upgrade icons; each becomes one
//! [`UpgradeSlot`]. Installing an upgrade fills the first free slot of its
//! type and hands back the abilities (and weapon, if any) it carries. The
//! abilities are not active yet; the game activates them during ship
//! initialization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::abilities::Ability;

use super::Weapon;

/// Upgrade icon types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeType {
    Elite,
    Crew,
    System,
    Modification,
    Astromech,
    Cannon,
    Missile,
    Torpedo,
    Turret,
    Title,
}

impl fmt::Display for UpgradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// An upgrade card, ready to install.
pub struct Upgrade {
    pub name: String,
    pub kind: UpgradeType,
    pub cost: u32,
    pub abilities: Vec<Ability>,
    pub weapon: Option<Weapon>,
}

impl Upgrade {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: UpgradeType, cost: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            cost,
            abilities: Vec::new(),
            weapon: None,
        }
    }

    /// Add an ability (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Attach a secondary weapon (builder pattern).
    #[must_use]
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }
}

impl fmt::Debug for Upgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upgrade")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("cost", &self.cost)
            .field("abilities", &self.abilities.len())
            .field("weapon", &self.weapon)
            .finish()
    }
}

/// What an installed upgrade contributes to its ship.
#[derive(Debug)]
pub struct Fitted {
    pub name: String,
    pub abilities: Vec<Ability>,
    pub weapon: Option<Weapon>,
}

/// One printed upgrade icon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeSlot {
    kind: UpgradeType,
    installed: Option<String>,
    cost: u32,
}

impl UpgradeSlot {
    #[must_use]
    pub fn new(kind: UpgradeType) -> Self {
        Self { kind, installed: None, cost: 0 }
    }

    #[must_use]
    pub fn kind(&self) -> UpgradeType {
        self.kind
    }

    /// Name of the installed upgrade, if any.
    #[must_use]
    pub fn installed(&self) -> Option<&str> {
        self.installed.as_deref()
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.installed.is_none()
    }

    /// Install `upgrade` if the slot is free and of the right type.
    ///
    /// On failure the upgrade is handed back untouched.
    pub fn try_install(&mut self, upgrade: Upgrade) -> Result<Fitted, Upgrade> {
        if !self.is_free() || upgrade.kind != self.kind {
            return Err(upgrade);
        }
        self.installed = Some(upgrade.name.clone());
        self.cost = upgrade.cost;
        Ok(Fitted {
            name: upgrade.name,
            abilities: upgrade.abilities,
            weapon: upgrade.weapon,
        })
    }
}

/// All upgrade slots on a ship, in printed order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeBar {
    slots: Vec<UpgradeSlot>,
}

impl UpgradeBar {
    #[must_use]
    pub fn new(kinds: &[UpgradeType]) -> Self {
        Self {
            slots: kinds.iter().copied().map(UpgradeSlot::new).collect(),
        }
    }

    #[must_use]
    pub fn slots(&self) -> &[UpgradeSlot] {
        &self.slots
    }

    /// Install into the first free slot that accepts the upgrade.
    pub fn install(&mut self, mut upgrade: Upgrade) -> Result<Fitted, Upgrade> {
        for slot in &mut self.slots {
            match slot.try_install(upgrade) {
                Ok(fitted) => return Ok(fitted),
                Err(rejected) => upgrade = rejected,
            }
        }
        Err(upgrade)
    }

    /// Names of installed upgrades, in slot order.
    #[must_use]
    pub fn installed_names(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter_map(|s| s.installed().map(str::to_string))
            .collect()
    }

    /// Total squad points of installed upgrades.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.slots.iter().map(|s| s.cost).sum()
    }
}
