//! Engine error types.
//!
//! Rules decisions (an ineligible extra attack, an ability already used
//! this round) are never errors: they become messages and the trigger
//! still completes. `EngineError` covers misuse of the public API only.

use thiserror::Error;

use super::{AbilityRef, PlayerId, ShipId};
use crate::events::EventKind;
use crate::ship::UpgradeType;
use crate::triggers::TriggerId;

/// Errors returned by the public game API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No ship with this id exists in the game.
    #[error("unknown ship {0}")]
    UnknownShip(ShipId),

    /// The ship has no ability at this index.
    #[error("unknown ability {0}")]
    UnknownAbility(AbilityRef),

    /// An attack is already being resolved.
    #[error("{attacker} cannot declare an attack while another attack is in progress")]
    CombatInProgress {
        /// Ship that tried to attack.
        attacker: ShipId,
    },

    /// The ship has already attacked this round.
    #[error("{0} has already attacked this round")]
    AlreadyAttacked(ShipId),

    /// The ship has no weapon at this index.
    #[error("{ship} has no weapon #{index}")]
    UnknownWeapon {
        /// Attacking ship.
        ship: ShipId,
        /// Requested weapon index.
        index: usize,
    },

    /// Resolution of some event kind has not finished.
    #[error("resolution of {kind} is still pending{}", trigger.map_or_else(String::new, |t| format!(" (waiting on {t})")))]
    ResolutionPending {
        /// Kind of the innermost unfinished resolution.
        kind: EventKind,
        /// Trigger the queue is waiting on, if one has started.
        trigger: Option<TriggerId>,
    },

    /// Triggers are queued for a kind the engine never resolves.
    #[error("{count} trigger(s) for {kind} are queued but {kind} is never resolved")]
    UnresolvedTriggers {
        /// The stranded kind.
        kind: EventKind,
        /// How many triggers wait on it.
        count: usize,
    },

    /// A decision was answered but none is pending.
    #[error("no decision is pending")]
    NoPendingDecision,

    /// A decision was answered with an index outside its options.
    #[error("choice {choice} is out of range for {options} option(s)")]
    InvalidChoice {
        /// The submitted choice.
        choice: usize,
        /// Number of options offered.
        options: usize,
    },

    /// The decision belongs to another player.
    #[error("decision is for {expected}, not {actual}")]
    WrongPlayer {
        /// Player the decision was posted to.
        expected: PlayerId,
        /// Player that answered.
        actual: PlayerId,
    },

    /// No free slot of the upgrade's type exists on the ship.
    #[error("{ship} has no free {kind:?} slot for {upgrade}")]
    NoFreeSlot {
        /// Target ship.
        ship: ShipId,
        /// Upgrade slot type required.
        kind: UpgradeType,
        /// Upgrade name.
        upgrade: String,
    },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
