//! Combat: dice, the per-attack session and attack resolution.
//!
//! ## Key Types
//!
//! - `CombatSession`: attacker, defender, chosen weapon and extension guards
//! - `DiceSource`: seeded or scripted dice
//! - `AttackRoll` / `DefenseRoll`: counted results
//!
//! The entry points (`declare_attack`, `start_additional_attack`) are
//! methods on `Game`.

mod attack;
pub mod dice;
pub mod session;

pub use dice::{AttackFace, AttackRoll, DefenseFace, DefenseRoll, DiceSource, ScriptedDice};
pub use session::CombatSession;
