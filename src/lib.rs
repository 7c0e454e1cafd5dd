//! # rust-skirmish
//!
//! A trigger-driven ability and combat resolution engine for squadron
//! skirmish games.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Emission follows subscription order, triggers drain
//!    by priority then a configured tie-break then registration order, and
//!    dice are seeded or scripted. Two runs with the same inputs produce the
//!    same `ResolutionLog`, byte for byte.
//!
//! 2. **Never Blocks**: A step that needs a player's answer returns at once
//!    and parks its continuation. The trigger queue waits on an explicit
//!    `Completion` rather than on the call stack.
//!
//! 3. **No Globals**: Everything lives in a `Game` handed mutably to every
//!    handler and trigger action.
//!
//! ## Architecture
//!
//! - **Per-ship event buses** with removable handles and snapshot-on-emit
//!   (`im::Vector` makes the snapshot O(1)).
//!
//! - **Abilities as data**: a wiring closure lists what to install;
//!   activation records the handles so deactivation removes exactly those.
//!
//! - **Resolution frames**: resolving an event kind pushes a frame; frames
//!   nest and each runs its continuation when it empties.
//!
//! ## Modules
//!
//! - `core`: ids, players, RNG, configuration, errors
//! - `events`: event kinds, ship events, the event bus
//! - `triggers`: trigger queue, completions, sequential fan-out, resolution log
//! - `ship`: ships, stats, modifier stack, tokens, weapons, upgrades
//! - `abilities`: ability lifecycle and concrete abilities
//! - `combat`: dice, combat session, attacks
//! - `game`: the game context, phases, decisions, collaborators
//! - `catalog`: sample pilots and upgrades

pub mod core;
pub mod events;
pub mod triggers;
pub mod ship;
pub mod abilities;
pub mod combat;
pub mod game;
pub mod catalog;

// Re-export commonly used types
pub use crate::core::{
    AbilityId, AbilityRef, ShipId, PlayerId,
    GameRng, GameRngState,
    GameConfig, TieBreak, MAX_PILOT_SKILL,
    EngineError, Result,
};

pub use crate::events::{
    Channel, EventBus, EventKind, ShipEvent,
    SubscriptionHandle, SubscriptionId,
};

pub use crate::triggers::{
    in_sequence, register, resolve,
    Completion, Continuation, QueueStatus, ResolutionEntry, ResolutionLog,
    Trigger, TriggerHost, TriggerId, TriggerQueue,
};

pub use crate::ship::{
    ModifierId, ModifierStack, Ship, ShipDefinition, ShipStats, Stat,
    Token, TokenKind, Upgrade, UpgradeBar, UpgradeSlot, UpgradeType, Weapon, WeaponKind,
};

pub use crate::abilities::{Ability, AbilitySource, AbilityState, Hook};

pub use crate::combat::{
    AttackFace, AttackRoll, CombatSession, DefenseFace, DefenseRoll, DiceSource, ScriptedDice,
};

pub use crate::game::{
    Game, Message, MessageLevel, MessageSink, ModelFactory, ModelHandle,
    NullServices, PanelHandle, PendingDecision, Phase, Position, Roster, Services,
};
