//! Tokens placed on ships.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ShipId;

/// Kinds of token a ship can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenKind {
    Focus,
    Evade,
    Stress,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Focus => "Focus",
            TokenKind::Evade => "Evade",
            TokenKind::Stress => "Stress",
        };
        f.write_str(name)
    }
}

/// One token headed for one ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub target: ShipId,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, target: ShipId) -> Self {
        Self { kind, target }
    }

    #[must_use]
    pub const fn stress(target: ShipId) -> Self {
        Self::new(TokenKind::Stress, target)
    }
}
