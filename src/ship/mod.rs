//! Ships: stats, modifiers, tokens, weapons and upgrades.
//!
//! ## Key Types
//!
//! - `Ship`: the aggregate abilities act upon
//! - `ShipDefinition`: printed pilot card data
//! - `Stat` / `ShipStats`: stat names and an effective-stat snapshot
//! - `ModifierStack`: LIFO pilot skill modifiers
//! - `UpgradeBar` / `UpgradeSlot` / `Upgrade`: upgrade icons and cards

pub mod modifiers;
#[allow(clippy::module_inception)]
pub mod ship;
pub mod stats;
pub mod tokens;
pub mod upgrades;
pub mod weapons;

pub use modifiers::{ModifierId, ModifierStack, PilotSkillModifier, SharedModifier};
pub use ship::{AbilityFactory, Ship, ShipDefinition};
pub use stats::{clamp_pilot_skill, ShipStats, Stat};
pub use tokens::{Token, TokenKind};
pub use upgrades::{Fitted, Upgrade, UpgradeBar, UpgradeSlot, UpgradeType};
pub use weapons::{Weapon, WeaponKind};
