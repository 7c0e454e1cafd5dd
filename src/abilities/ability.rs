//! Ability data.
//!
//! An ability is a name, a source, lifecycle state and a wiring closure.
//! The wiring closure is called on activation with the ability's own
//! reference and returns the hooks to install; the ability records what was
//! installed so deactivation removes exactly that.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::core::AbilityRef;
use crate::events::{EventKind, Handler, ShipEvent, StatHook, SubscriptionHandle};
use crate::game::Game;
use crate::ship::{ModifierId, SharedModifier, Stat};

/// Where an ability came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbilitySource {
    Pilot,
    Upgrade(String),
}

/// Lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilityState {
    Inactive,
    Active,
}

/// One thing an ability installs on its host when activated.
pub enum Hook {
    /// An event handler.
    Event(EventKind, Handler<Game>),
    /// An after-get stat hook.
    Stat(Stat, StatHook),
    /// A pilot skill modifier pushed onto the front of the stack.
    PilotSkill(SharedModifier),
}

impl Hook {
    /// Event handler hook.
    pub fn event(kind: EventKind, handler: impl Fn(&mut Game, &ShipEvent) + 'static) -> Self {
        Hook::Event(kind, Rc::new(handler))
    }

    /// After-get hook on `stat`.
    pub fn stat(stat: Stat, hook: impl Fn(&mut i32) + 'static) -> Self {
        Hook::Stat(stat, Rc::new(hook))
    }

    /// Pilot skill modifier.
    pub fn pilot_skill(modifier: impl Fn(&mut i32) + 'static) -> Self {
        Hook::PilotSkill(Rc::new(modifier))
    }
}

/// Something installed on the host that deactivation must remove.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Installed {
    Subscription(SubscriptionHandle),
    Modifier(ModifierId),
}

/// Produces the hooks for one activation.
pub type Wiring = Rc<dyn Fn(AbilityRef) -> Vec<Hook>>;

/// A behavior unit attached to a ship.
pub struct Ability {
    name: String,
    source: AbilitySource,
    pub(crate) state: AbilityState,
    pub(crate) installed: SmallVec<[Installed; 4]>,
    pub(crate) used: bool,
    pub(crate) wiring: Wiring,
}

impl Ability {
    /// Create an inactive pilot ability.
    pub fn new(name: impl Into<String>, wiring: impl Fn(AbilityRef) -> Vec<Hook> + 'static) -> Self {
        Self {
            name: name.into(),
            source: AbilitySource::Pilot,
            state: AbilityState::Inactive,
            installed: SmallVec::new(),
            used: false,
            wiring: Rc::new(wiring),
        }
    }

    /// Set the source (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: AbilitySource) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn source(&self) -> &AbilitySource {
        &self.source
    }

    #[must_use]
    pub fn state(&self) -> AbilityState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == AbilityState::Active
    }

    /// The per-round usage guard.
    #[must_use]
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Number of things currently recorded as installed.
    #[must_use]
    pub fn installed_count(&self) -> usize {
        self.installed.len()
    }
}

impl fmt::Debug for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ability")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("state", &self.state)
            .field("installed", &self.installed)
            .field("used", &self.used)
            .finish()
    }
}
