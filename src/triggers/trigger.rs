//! Trigger definitions.
//!
//! A trigger is one unit of deferred work: "when `kind` resolves, run this
//! action". Triggers are created while handlers react to an event and are
//! consumed exactly once by the queue.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, ShipId};
use crate::events::EventKind;

use super::queue::Completion;

/// Unique identifier for a trigger.
///
/// Allocated by the queue in registration order, so comparing ids compares
/// registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TriggerId(pub u64);

impl TriggerId {
    /// Create a new trigger ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Trigger({})", self.0)
    }
}

/// The work a trigger does.
///
/// The action must eventually call [`Completion::finish`] exactly once,
/// either before returning or from a continuation it hands to a later step.
pub type TriggerAction<C> = Box<dyn FnOnce(&mut C, Completion)>;

/// Eligibility check, evaluated when the trigger would start.
pub type TriggerCondition<C> = Box<dyn Fn(&C) -> bool>;

/// A pending trigger.
pub struct Trigger<C> {
    /// Assigned by the queue on registration.
    pub(crate) id: TriggerId,

    /// Human-readable name (for logs and the resolution record).
    pub name: String,

    /// The event kind whose resolution runs this trigger.
    pub kind: EventKind,

    /// Lower values resolve first.
    pub priority: i32,

    /// Player responsible for the trigger, for seat-order tie-breaks.
    pub owner: Option<PlayerId>,

    /// Ship the trigger belongs to.
    pub host: Option<ShipId>,

    pub(crate) condition: Option<TriggerCondition<C>>,

    /// Resolution frame that claimed this trigger.
    pub(crate) frame: Option<u64>,

    pub(crate) action: TriggerAction<C>,
}

impl<C> Trigger<C> {
    /// Create a new trigger with priority 0.
    pub fn new(
        name: impl Into<String>,
        kind: EventKind,
        action: impl FnOnce(&mut C, Completion) + 'static,
    ) -> Self {
        Self {
            id: TriggerId::new(0),
            name: name.into(),
            kind,
            priority: 0,
            owner: None,
            host: None,
            condition: None,
            frame: None,
            action: Box::new(action),
        }
    }

    /// Set priority (builder pattern). Lower values resolve first.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the owning player (builder pattern).
    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the host ship (builder pattern).
    #[must_use]
    pub fn with_host(mut self, host: ShipId) -> Self {
        self.host = Some(host);
        self
    }

    /// Only run if `condition` holds when the trigger comes up.
    #[must_use]
    pub fn with_condition(mut self, condition: impl Fn(&C) -> bool + 'static) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    /// The id assigned at registration (0 before).
    #[must_use]
    pub fn id(&self) -> TriggerId {
        self.id
    }
}

impl<C> std::fmt::Debug for Trigger<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trigger")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("priority", &self.priority)
            .field("owner", &self.owner)
            .field("host", &self.host)
            .field("conditional", &self.condition.is_some())
            .field("frame", &self.frame)
            .finish()
    }
}
