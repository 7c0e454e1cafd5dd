//! External collaborators.
//!
//! The engine never renders, lays out panels or moves models itself. It
//! calls these traits at the moments a front end would care about, and
//! ships the no-op [`NullServices`] for headless use and tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ShipId;
use crate::ship::ShipStats;

/// Opaque handle to a ship's model, issued by the [`ModelFactory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelHandle(pub u64);

/// Opaque handle to a ship's info panel, issued by the [`Roster`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelHandle(pub u64);

/// Where a ship is placed at setup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    /// Degrees.
    pub heading: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32, heading: f32) -> Self {
        Self { x, y, heading }
    }
}

/// Message severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageLevel {
    Info,
    Error,
    /// An error only worth showing to a human player.
    ErrorToHuman,
}

/// A message shown to the players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub level: MessageLevel,
    pub text: String,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.level, self.text)
    }
}

/// Shows messages. Messages never affect control flow.
pub trait MessageSink {
    fn show(&mut self, message: &Message);
}

/// The squad roster UI.
pub trait Roster {
    /// A ship's effective stats changed.
    fn notify_stats_changed(&mut self, ship: ShipId, stats: &ShipStats);

    /// Create the info panel for a newly initialized ship.
    fn create_info_panel(&mut self, ship: ShipId) -> PanelHandle;

    /// Refresh the upgrade list shown on a ship's panel.
    fn update_upgrade_panel(&mut self, ship: ShipId, panel: PanelHandle, upgrades: &[String]);
}

/// Instantiates ship models.
pub trait ModelFactory {
    fn create_model(&mut self, ship: ShipId, position: Position) -> ModelHandle;

    /// Tag every child object of the model, e.g. `"ShipId:3"`.
    fn tag_children(&mut self, model: ModelHandle, tag: &str);
}

/// Collaborators that do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullServices;

impl MessageSink for NullServices {
    fn show(&mut self, _message: &Message) {}
}

impl Roster for NullServices {
    fn notify_stats_changed(&mut self, _ship: ShipId, _stats: &ShipStats) {}

    fn create_info_panel(&mut self, ship: ShipId) -> PanelHandle {
        PanelHandle(u64::from(ship.raw()))
    }

    fn update_upgrade_panel(&mut self, _ship: ShipId, _panel: PanelHandle, _upgrades: &[String]) {}
}

impl ModelFactory for NullServices {
    fn create_model(&mut self, ship: ShipId, _position: Position) -> ModelHandle {
        ModelHandle(u64::from(ship.raw()))
    }

    fn tag_children(&mut self, _model: ModelHandle, _tag: &str) {}
}

/// The collaborator bundle owned by the game.
pub struct Services {
    pub messages: Box<dyn MessageSink>,
    pub roster: Box<dyn Roster>,
    pub models: Box<dyn ModelFactory>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            messages: Box::new(NullServices),
            roster: Box::new(NullServices),
            models: Box::new(NullServices),
        }
    }
}

impl Services {
    /// Replace the message sink (builder pattern).
    #[must_use]
    pub fn with_messages(mut self, sink: impl MessageSink + 'static) -> Self {
        self.messages = Box::new(sink);
        self
    }

    /// Replace the roster (builder pattern).
    #[must_use]
    pub fn with_roster(mut self, roster: impl Roster + 'static) -> Self {
        self.roster = Box::new(roster);
        self
    }

    /// Replace the model factory (builder pattern).
    #[must_use]
    pub fn with_models(mut self, models: impl ModelFactory + 'static) -> Self {
        self.models = Box::new(models);
        self
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
