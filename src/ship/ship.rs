//! The ship aggregate and its printed definition.
//!
//! A `Ship` owns its event bus, its abilities, its upgrade bar and its
//! modifier stack. Everything that acts on a ship (abilities, combat, the
//! phase driver) goes through the `Game` that owns it and refers to the ship
//! by id.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::abilities::{Ability, AbilitySource};
use crate::core::{PlayerId, ShipId};
use crate::events::EventBus;
use crate::game::{Game, ModelHandle, PanelHandle};

use super::stats::clamp_pilot_skill;
use super::{ModifierStack, SharedModifier, ShipStats, Stat, TokenKind, UpgradeBar, UpgradeType, Weapon};

/// Builds a fresh, inactive ability. Definitions are shared between ships,
/// abilities are not.
pub type AbilityFactory = Rc<dyn Fn() -> Ability>;

/// Printed data for one pilot card.
///
/// ## Example
///
/// ```
/// use rust_skirmish::ship::{ShipDefinition, UpgradeType};
///
/// let rookie = ShipDefinition::new("X-wing", "Rookie Pilot")
///     .with_pilot_skill(2)
///     .with_firepower(3)
///     .with_agility(2)
///     .with_hull(3)
///     .with_shields(2)
///     .with_slot(UpgradeType::Torpedo)
///     .with_cost(21);
///
/// assert_eq!(rookie.pilot_skill, 2);
/// assert_eq!(rookie.slots, vec![UpgradeType::Torpedo]);
/// ```
#[derive(Clone)]
pub struct ShipDefinition {
    pub ship_type: String,
    pub pilot_name: String,
    pub unique: bool,
    pub cost: u32,
    pub pilot_skill: i32,
    pub firepower: i32,
    pub agility: i32,
    pub hull: i32,
    pub shields: i32,
    pub slots: Vec<UpgradeType>,
    /// Secondary weapons printed on the card. The primary weapon is implied.
    pub weapons: Vec<Weapon>,
    pub abilities: Vec<AbilityFactory>,
}

impl ShipDefinition {
    #[must_use]
    pub fn new(ship_type: impl Into<String>, pilot_name: impl Into<String>) -> Self {
        Self {
            ship_type: ship_type.into(),
            pilot_name: pilot_name.into(),
            unique: false,
            cost: 0,
            pilot_skill: 0,
            firepower: 0,
            agility: 0,
            hull: 1,
            shields: 0,
            slots: Vec::new(),
            weapons: Vec::new(),
            abilities: Vec::new(),
        }
    }

    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_pilot_skill(mut self, value: i32) -> Self {
        self.pilot_skill = value;
        self
    }

    #[must_use]
    pub fn with_firepower(mut self, value: i32) -> Self {
        self.firepower = value;
        self
    }

    #[must_use]
    pub fn with_agility(mut self, value: i32) -> Self {
        self.agility = value;
        self
    }

    #[must_use]
    pub fn with_hull(mut self, value: i32) -> Self {
        self.hull = value;
        self
    }

    #[must_use]
    pub fn with_shields(mut self, value: i32) -> Self {
        self.shields = value;
        self
    }

    #[must_use]
    pub fn with_slot(mut self, kind: UpgradeType) -> Self {
        self.slots.push(kind);
        self
    }

    #[must_use]
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.push(weapon);
        self
    }

    /// Add a pilot ability (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, factory: impl Fn() -> Ability + 'static) -> Self {
        self.abilities.push(Rc::new(factory));
        self
    }
}

impl fmt::Debug for ShipDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShipDefinition")
            .field("ship_type", &self.ship_type)
            .field("pilot_name", &self.pilot_name)
            .field("pilot_skill", &self.pilot_skill)
            .field("slots", &self.slots)
            .field("abilities", &self.abilities.len())
            .finish_non_exhaustive()
    }
}

/// A ship in play.
pub struct Ship {
    id: ShipId,
    owner: PlayerId,
    pilot_name: String,
    ship_type: String,
    unique: bool,
    cost: u32,

    // Stored values, clamped on write.
    pilot_skill: i32,
    firepower: i32,
    agility: i32,
    hull: i32,
    shields: i32,
    max_hull: i32,
    max_shields: i32,
    max_pilot_skill: i32,

    pub(crate) pilot_skill_modifiers: ModifierStack<SharedModifier>,
    pub(crate) bus: EventBus<Game>,
    pub(crate) abilities: Vec<Ability>,
    pub(crate) upgrades: UpgradeBar,
    pub(crate) weapons: SmallVec<[Weapon; 2]>,

    tokens: FxHashMap<TokenKind, u32>,
    bumped: Vec<ShipId>,
    pub(crate) attack_performed: bool,
    pub(crate) destroyed: bool,
    pub(crate) model: Option<ModelHandle>,
    pub(crate) panel: Option<PanelHandle>,
}

impl Ship {
    /// Build an uninitialized ship from its definition.
    ///
    /// Pilot abilities are created inactive; max hull and max shields take
    /// the printed values.
    #[must_use]
    pub fn from_definition(id: ShipId, owner: PlayerId, def: &ShipDefinition, max_pilot_skill: i32) -> Self {
        let mut weapons: SmallVec<[Weapon; 2]> = SmallVec::new();
        weapons.push(Weapon::primary());
        weapons.extend(def.weapons.iter().cloned());

        let abilities = def
            .abilities
            .iter()
            .map(|factory| factory().with_source(AbilitySource::Pilot))
            .collect();

        Self {
            id,
            owner,
            pilot_name: def.pilot_name.clone(),
            ship_type: def.ship_type.clone(),
            unique: def.unique,
            cost: def.cost,
            pilot_skill: clamp_pilot_skill(def.pilot_skill, max_pilot_skill),
            firepower: Stat::Firepower.clamp(def.firepower),
            agility: Stat::Agility.clamp(def.agility),
            hull: Stat::Hull.clamp(def.hull),
            shields: Stat::Shields.clamp(def.shields),
            max_hull: Stat::MaxHull.clamp(def.hull),
            max_shields: Stat::MaxShields.clamp(def.shields),
            max_pilot_skill,
            pilot_skill_modifiers: ModifierStack::new(),
            bus: EventBus::new(),
            abilities,
            upgrades: UpgradeBar::new(&def.slots),
            weapons,
            tokens: FxHashMap::default(),
            bumped: Vec::new(),
            attack_performed: false,
            destroyed: false,
            model: None,
            panel: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> ShipId {
        self.id
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn pilot_name(&self) -> &str {
        &self.pilot_name
    }

    #[must_use]
    pub fn ship_type(&self) -> &str {
        &self.ship_type
    }

    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Squad points: pilot plus installed upgrades.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost + self.upgrades.cost()
    }

    // === Stat reads ===

    /// Effective value of `stat`: hooks applied, then clamped.
    ///
    /// Pilot skill additionally passes through the front of the modifier
    /// stack before its `0..=max` clamp.
    #[must_use]
    pub fn stat(&self, stat: Stat) -> i32 {
        let hooked = self.bus.apply_stat_hooks(stat, self.raw_stat(stat));
        match stat {
            Stat::PilotSkill => {
                clamp_pilot_skill(self.pilot_skill_modifiers.apply(hooked), self.max_pilot_skill)
            }
            _ => stat.clamp(hooked),
        }
    }

    /// Stored value of `stat`, without hooks or modifiers.
    #[must_use]
    pub fn raw_stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::PilotSkill => self.pilot_skill,
            Stat::Firepower => self.firepower,
            Stat::Agility => self.agility,
            Stat::Hull => self.hull,
            Stat::Shields => self.shields,
            Stat::MaxHull => self.max_hull,
            Stat::MaxShields => self.max_shields,
        }
    }

    #[must_use]
    pub fn pilot_skill(&self) -> i32 {
        self.stat(Stat::PilotSkill)
    }

    #[must_use]
    pub fn firepower(&self) -> i32 {
        self.stat(Stat::Firepower)
    }

    #[must_use]
    pub fn agility(&self) -> i32 {
        self.stat(Stat::Agility)
    }

    #[must_use]
    pub fn hull(&self) -> i32 {
        self.stat(Stat::Hull)
    }

    #[must_use]
    pub fn shields(&self) -> i32 {
        self.stat(Stat::Shields)
    }

    #[must_use]
    pub fn max_hull(&self) -> i32 {
        self.stat(Stat::MaxHull)
    }

    #[must_use]
    pub fn max_shields(&self) -> i32 {
        self.stat(Stat::MaxShields)
    }

    /// Snapshot of every effective stat.
    #[must_use]
    pub fn stats(&self) -> ShipStats {
        ShipStats {
            pilot_skill: self.pilot_skill(),
            firepower: self.firepower(),
            agility: self.agility(),
            hull: self.hull(),
            shields: self.shields(),
            max_hull: self.max_hull(),
            max_shields: self.max_shields(),
        }
    }

    /// Overwrite the stored value of `stat`, clamped.
    pub fn set_raw_stat(&mut self, stat: Stat, value: i32) {
        let value = match stat {
            Stat::PilotSkill => clamp_pilot_skill(value, self.max_pilot_skill),
            _ => stat.clamp(value),
        };
        match stat {
            Stat::PilotSkill => self.pilot_skill = value,
            Stat::Firepower => self.firepower = value,
            Stat::Agility => self.agility = value,
            Stat::Hull => self.hull = value,
            Stat::Shields => self.shields = value,
            Stat::MaxHull => self.max_hull = value,
            Stat::MaxShields => self.max_shields = value,
        }
    }

    // === Components ===

    /// The ship's event bus.
    #[must_use]
    pub fn bus(&self) -> &EventBus<Game> {
        &self.bus
    }

    #[must_use]
    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    #[must_use]
    pub fn upgrades(&self) -> &UpgradeBar {
        &self.upgrades
    }

    /// Weapons, the primary weapon first.
    #[must_use]
    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    /// Number of pilot skill modifiers, dormant ones included.
    #[must_use]
    pub fn modifier_count(&self) -> usize {
        self.pilot_skill_modifiers.len()
    }

    // === Tokens ===

    #[must_use]
    pub fn token_count(&self, kind: TokenKind) -> u32 {
        self.tokens.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn has_token(&self, kind: TokenKind) -> bool {
        self.token_count(kind) > 0
    }

    pub(crate) fn add_token(&mut self, kind: TokenKind) -> u32 {
        let count = self.tokens.entry(kind).or_insert(0);
        *count += 1;
        *count
    }

    pub(crate) fn take_token(&mut self, kind: TokenKind) -> bool {
        match self.tokens.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.tokens.remove(&kind);
                }
                true
            }
            _ => false,
        }
    }

    // === Round state ===

    /// Ships that bumped into this one this round, in bump order.
    #[must_use]
    pub fn bumped(&self) -> &[ShipId] {
        &self.bumped
    }

    pub(crate) fn push_bump(&mut self, other: ShipId) {
        if !self.bumped.contains(&other) {
            self.bumped.push(other);
        }
    }

    #[must_use]
    pub fn attack_performed(&self) -> bool {
        self.attack_performed
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn model(&self) -> Option<ModelHandle> {
        self.model
    }

    #[must_use]
    pub fn panel(&self) -> Option<PanelHandle> {
        self.panel
    }

    pub(crate) fn clear_round_state(&mut self) {
        self.bumped.clear();
        self.attack_performed = false;
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ship")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("pilot_name", &self.pilot_name)
            .field("stats", &self.stats())
            .field("modifiers", &self.pilot_skill_modifiers.len())
            .field("abilities", &self.abilities)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> ShipDefinition {
        ShipDefinition::new("TIE Fighter", "Academy Pilot")
            .with_pilot_skill(1)
            .with_firepower(2)
            .with_agility(3)
            .with_hull(3)
    }

    fn ship() -> Ship {
        Ship::from_definition(ShipId(0), PlayerId::new(1), &definition(), 12)
    }

    #[test]
    fn test_from_definition() {
        let ship = ship();
        assert_eq!(ship.pilot_name(), "Academy Pilot");
        assert_eq!(ship.owner(), PlayerId::new(1));
        assert_eq!(ship.weapons().len(), 1);
        assert!(ship.weapons()[0].is_primary());
        assert_eq!(ship.max_hull(), 3);
        assert_eq!(ship.max_shields(), 0);
    }

    #[test]
    fn test_reads_never_below_floor() {
        let mut ship = ship();
        ship.set_raw_stat(Stat::Agility, -4);
        ship.set_raw_stat(Stat::MaxHull, 0);
        ship.set_raw_stat(Stat::MaxShields, -1);
        assert_eq!(ship.agility(), 0);
        assert_eq!(ship.max_hull(), 1);
        assert_eq!(ship.max_shields(), 0);

        // Hooks pushing below the floor are clamped on read.
        ship.set_raw_stat(Stat::Agility, 1);
        ship.bus.subscribe_stat(Stat::Agility, |v| *v -= 3);
        assert_eq!(ship.agility(), 0);
        assert_eq!(ship.raw_stat(Stat::Agility), 1);
    }

    #[test]
    fn test_pilot_skill_front_modifier() {
        let mut ship = ship();
        ship.pilot_skill_modifiers.push(Rc::new(|ps: &mut i32| *ps += 2));
        assert_eq!(ship.pilot_skill(), 3);

        ship.pilot_skill_modifiers.push(Rc::new(|ps: &mut i32| *ps += 20));
        assert_eq!(ship.pilot_skill(), 12);
    }

    #[test]
    fn test_tokens() {
        let mut ship = ship();
        assert!(!ship.has_token(TokenKind::Stress));
        assert_eq!(ship.add_token(TokenKind::Stress), 1);
        assert_eq!(ship.add_token(TokenKind::Stress), 2);
        assert!(ship.take_token(TokenKind::Stress));
        assert_eq!(ship.token_count(TokenKind::Stress), 1);
        assert!(!ship.take_token(TokenKind::Focus));
    }

    #[test]
    fn test_bumps_deduplicated_and_cleared() {
        let mut ship = ship();
        ship.push_bump(ShipId(3));
        ship.push_bump(ShipId(1));
        ship.push_bump(ShipId(3));
        assert_eq!(ship.bumped(), &[ShipId(3), ShipId(1)]);

        ship.attack_performed = true;
        ship.clear_round_state();
        assert!(ship.bumped().is_empty());
        assert!(!ship.attack_performed());
    }
}
