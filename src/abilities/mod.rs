//! Abilities: behavior units attached to ships.
//!
//! An [`Ability`] is data. Its wiring closure says what to install on the
//! host (event handlers, stat hooks, pilot skill modifiers); the game's
//! `activate_ability` installs them and records the handles, and
//! `deactivate_ability` removes exactly those. Concrete abilities are plain
//! constructor functions.
//!
//! ## Lifecycle
//!
//! ```text
//! Inactive --activate--> Active --deactivate--> Inactive
//! ```
//!
//! Activating an active ability does nothing.

pub mod ability;
pub mod chopper;
pub mod gunner;
mod lifecycle;
pub mod stat_bonuses;

pub use ability::{Ability, AbilitySource, AbilityState, Hook, Wiring};
pub use chopper::chopper_ability;
pub use gunner::{gunner, gunner_ability};
pub use stat_bonuses::{hull_upgrade, shield_upgrade, stealth_device, veteran_instincts};
