//! Attack and defense dice.
//!
//! Dice come from a [`DiceSource`] so a game can run on seeded random
//! rolls ([`GameRng`]) or on a fixed script ([`ScriptedDice`]) for replays
//! and tests.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Face of an eight-sided attack die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackFace {
    Blank,
    Focus,
    Hit,
    Crit,
}

/// Face of an eight-sided defense die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenseFace {
    Blank,
    Focus,
    Evade,
}

// Face layouts, indexed by a 0..8 roll.
const ATTACK_FACES: [AttackFace; 8] = [
    AttackFace::Hit,
    AttackFace::Hit,
    AttackFace::Hit,
    AttackFace::Crit,
    AttackFace::Focus,
    AttackFace::Focus,
    AttackFace::Blank,
    AttackFace::Blank,
];

const DEFENSE_FACES: [DefenseFace; 8] = [
    DefenseFace::Evade,
    DefenseFace::Evade,
    DefenseFace::Evade,
    DefenseFace::Focus,
    DefenseFace::Focus,
    DefenseFace::Blank,
    DefenseFace::Blank,
    DefenseFace::Blank,
];

/// Where dice results come from.
pub trait DiceSource {
    fn roll_attack(&mut self) -> AttackFace;
    fn roll_defense(&mut self) -> DefenseFace;
}

impl DiceSource for GameRng {
    fn roll_attack(&mut self) -> AttackFace {
        ATTACK_FACES[self.roll_face(ATTACK_FACES.len())]
    }

    fn roll_defense(&mut self) -> DefenseFace {
        DEFENSE_FACES[self.roll_face(DEFENSE_FACES.len())]
    }
}

/// Dice that replay fixed results. Once a script runs out every roll is
/// blank.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedDice {
    attack: VecDeque<AttackFace>,
    defense: VecDeque<DefenseFace>,
}

impl ScriptedDice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue attack results (builder pattern).
    #[must_use]
    pub fn with_attack(mut self, faces: impl IntoIterator<Item = AttackFace>) -> Self {
        self.attack.extend(faces);
        self
    }

    /// Queue defense results (builder pattern).
    #[must_use]
    pub fn with_defense(mut self, faces: impl IntoIterator<Item = DefenseFace>) -> Self {
        self.defense.extend(faces);
        self
    }

    /// Results not yet rolled: (attack, defense).
    #[must_use]
    pub fn remaining(&self) -> (usize, usize) {
        (self.attack.len(), self.defense.len())
    }
}

impl DiceSource for ScriptedDice {
    fn roll_attack(&mut self) -> AttackFace {
        self.attack.pop_front().unwrap_or(AttackFace::Blank)
    }

    fn roll_defense(&mut self) -> DefenseFace {
        self.defense.pop_front().unwrap_or(DefenseFace::Blank)
    }
}

/// Result of one attack roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRoll {
    pub hits: u32,
    pub crits: u32,
    pub focus: u32,
}

impl AttackRoll {
    /// Roll `count` attack dice.
    pub fn roll(dice: &mut dyn DiceSource, count: i32) -> Self {
        let mut roll = Self::default();
        for _ in 0..count.max(0) {
            match dice.roll_attack() {
                AttackFace::Hit => roll.hits += 1,
                AttackFace::Crit => roll.crits += 1,
                AttackFace::Focus => roll.focus += 1,
                AttackFace::Blank => {}
            }
        }
        roll
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.hits + self.crits
    }
}

/// Result of one defense roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseRoll {
    pub evades: u32,
    pub focus: u32,
}

impl DefenseRoll {
    /// Roll `count` defense dice.
    pub fn roll(dice: &mut dyn DiceSource, count: i32) -> Self {
        let mut roll = Self::default();
        for _ in 0..count.max(0) {
            match dice.roll_defense() {
                DefenseFace::Evade => roll.evades += 1,
                DefenseFace::Focus => roll.focus += 1,
                DefenseFace::Blank => {}
            }
        }
        roll
    }
}
