//! Core engine types: identifiers, players, RNG, configuration, errors.
//!
//! These are the leaves every other module builds on. Nothing in here knows
//! about events, triggers or ships beyond their identifiers.

pub mod ids;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use ids::{AbilityId, AbilityRef, ShipId};
pub use player::PlayerId;
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, TieBreak, MAX_PILOT_SKILL};
pub use error::{EngineError, Result};
