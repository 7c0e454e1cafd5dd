//! Ship events.
//!
//! A `ShipEvent` is the argument passed to every handler subscribed to a
//! channel. It names the ship whose bus fired it and carries whatever the
//! firing code knows about the occurrence.

use serde::{Deserialize, Serialize};

use crate::core::ShipId;
use crate::ship::TokenKind;

use super::EventKind;

/// An event fired on one ship's bus.
///
/// ## Event Data
///
/// - `kind`: which channel fired
/// - `ship`: the ship whose bus fired (the host from the handler's view)
/// - `other`: the counterpart, if any (defender, bumping ship)
/// - `token`: the token kind for token events
/// - `value`: a numeric payload (damage dealt, stat delta, round number)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipEvent {
    /// The kind of event.
    pub kind: EventKind,

    /// The ship whose bus fired.
    pub ship: ShipId,

    /// The other ship involved, if any.
    pub other: Option<ShipId>,

    /// Token involved, for token events.
    pub token: Option<TokenKind>,

    /// Numeric payload. Meaning depends on the kind.
    pub value: i64,
}

impl ShipEvent {
    /// Create a new event with just a kind and host.
    pub fn new(kind: EventKind, ship: ShipId) -> Self {
        Self {
            kind,
            ship,
            other: None,
            token: None,
            value: 0,
        }
    }

    /// Set the other ship (builder pattern).
    #[must_use]
    pub fn with_other(mut self, other: ShipId) -> Self {
        self.other = Some(other);
        self
    }

    /// Set the token kind (builder pattern).
    #[must_use]
    pub fn with_token(mut self, token: TokenKind) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the numeric payload (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }
}

/// Builders for common event shapes.
impl ShipEvent {
    /// Attack outcome on the attacker's bus.
    ///
    /// `value` = damage dealt (0 for a miss).
    pub fn attack(kind: EventKind, attacker: ShipId, defender: ShipId, damage: i64) -> Self {
        Self::new(kind, attacker).with_other(defender).with_value(damage)
    }

    /// Token change on the target's bus.
    pub fn token(kind: EventKind, target: ShipId, token: TokenKind) -> Self {
        Self::new(kind, target).with_token(token)
    }

    /// Round or phase boundary.
    ///
    /// `value` = round number.
    pub fn boundary(kind: EventKind, ship: ShipId, round: u32) -> Self {
        Self::new(kind, ship).with_value(i64::from(round))
    }
}
