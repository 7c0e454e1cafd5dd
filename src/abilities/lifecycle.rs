//! Activate / deactivate, and subscriptions an ability adds while active.

use std::rc::Rc;

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::core::{AbilityId, AbilityRef, EngineError, Result, ShipId};
use crate::events::{Channel, EventBus, EventKind, ShipEvent, SubscriptionHandle};
use crate::game::Game;

use super::ability::{AbilityState, Hook, Installed};
use super::Ability;

impl Game {
    /// The ability behind `ability`.
    pub fn ability(&self, ability: AbilityRef) -> Result<&Ability> {
        self.ship(ability.ship)?
            .abilities
            .get(ability.ability.index())
            .ok_or(EngineError::UnknownAbility(ability))
    }

    pub(crate) fn ability_mut(&mut self, ability: AbilityRef) -> Result<&mut Ability> {
        self.ship_mut(ability.ship)?
            .abilities
            .get_mut(ability.ability.index())
            .ok_or(EngineError::UnknownAbility(ability))
    }

    /// Wire an ability into its host.
    ///
    /// Returns `Ok(false)` if it was already active; nothing is installed
    /// twice.
    pub fn activate_ability(&mut self, ability: AbilityRef) -> Result<bool> {
        let current = self.ability(ability)?;
        if current.is_active() {
            debug!(%ability, name = current.name(), "ability already active");
            return Ok(false);
        }
        let wiring = Rc::clone(&current.wiring);
        let hooks = wiring(ability);

        let ship = self.ship_mut(ability.ship)?;
        let mut installed: SmallVec<[Installed; 4]> = SmallVec::new();
        let mut stats_touched = false;
        for hook in hooks {
            match hook {
                Hook::Event(kind, handler) => {
                    installed.push(Installed::Subscription(ship.bus.subscribe_shared(kind, handler)));
                }
                Hook::Stat(stat, stat_hook) => {
                    installed.push(Installed::Subscription(ship.bus.subscribe_stat_shared(stat, stat_hook)));
                    stats_touched = true;
                }
                Hook::PilotSkill(modifier) => {
                    installed.push(Installed::Modifier(ship.pilot_skill_modifiers.push(modifier)));
                    stats_touched = true;
                }
            }
        }

        let target = ship
            .abilities
            .get_mut(ability.ability.index())
            .ok_or(EngineError::UnknownAbility(ability))?;
        info!(%ability, name = target.name(), hooks = installed.len(), "ability activated");
        target.installed.extend(installed);
        target.state = AbilityState::Active;

        if stats_touched {
            self.stats_changed(ability.ship, 0);
        }
        Ok(true)
    }

    /// Unwire an ability: remove exactly what it installed.
    ///
    /// Returns `Ok(false)` if it was not active.
    pub fn deactivate_ability(&mut self, ability: AbilityRef) -> Result<bool> {
        let target = self.ability_mut(ability)?;
        if !target.is_active() {
            return Ok(false);
        }
        target.state = AbilityState::Inactive;
        let installed = std::mem::take(&mut target.installed);
        info!(%ability, name = target.name(), hooks = installed.len(), "ability deactivated");

        let ship = self.ship_mut(ability.ship)?;
        let mut stats_touched = false;
        for item in installed {
            match item {
                Installed::Subscription(handle) => {
                    if ship.bus.unsubscribe(handle) && matches!(handle.channel(), Channel::Stat(_)) {
                        stats_touched = true;
                    }
                }
                Installed::Modifier(id) => {
                    stats_touched |= ship.pilot_skill_modifiers.remove(id).is_some();
                }
            }
        }

        if stats_touched {
            self.stats_changed(ability.ship, 0);
        }
        Ok(true)
    }

    /// Activate every ability on `ship`, in order.
    pub fn activate_all(&mut self, ship: ShipId) -> Result<()> {
        for ability in self.ability_refs(ship)? {
            self.activate_ability(ability)?;
        }
        Ok(())
    }

    /// Deactivate every ability on `ship`.
    pub fn deactivate_all(&mut self, ship: ShipId) -> Result<()> {
        for ability in self.ability_refs(ship)? {
            self.deactivate_ability(ability)?;
        }
        Ok(())
    }

    fn ability_refs(&self, ship: ShipId) -> Result<Vec<AbilityRef>> {
        let count = self.ship(ship)?.abilities.len();
        Ok((0..count)
            .filter_map(|i| u16::try_from(i).ok())
            .map(|i| AbilityRef::new(ship, AbilityId::new(i)))
            .collect())
    }

    /// Subscribe on the ability's host on the ability's behalf.
    ///
    /// The handle is recorded with the ability, so deactivation removes it
    /// along with the activation hooks.
    pub fn subscribe_for(
        &mut self,
        ability: AbilityRef,
        kind: EventKind,
        handler: impl Fn(&mut Game, &ShipEvent) + 'static,
    ) -> Result<SubscriptionHandle> {
        self.record_subscription(ability, |bus| bus.subscribe(kind, handler))
    }

    /// Like [`Game::subscribe_for`], retired after the first emission that
    /// reaches it.
    pub fn subscribe_once_for(
        &mut self,
        ability: AbilityRef,
        kind: EventKind,
        handler: impl Fn(&mut Game, &ShipEvent) + 'static,
    ) -> Result<SubscriptionHandle> {
        self.record_subscription(ability, |bus| bus.subscribe_once(kind, handler))
    }

    fn record_subscription(
        &mut self,
        ability: AbilityRef,
        subscribe: impl FnOnce(&mut EventBus<Game>) -> SubscriptionHandle,
    ) -> Result<SubscriptionHandle> {
        let ship = self.ship_mut(ability.ship)?;
        let target = ship
            .abilities
            .get_mut(ability.ability.index())
            .ok_or(EngineError::UnknownAbility(ability))?;
        let handle = subscribe(&mut ship.bus);

        // Retired one-shots leave stale handles behind.
        let bus = &ship.bus;
        target.installed.retain(|item| match item {
            Installed::Subscription(h) => bus.is_subscribed(*h),
            Installed::Modifier(_) => true,
        });
        target.installed.push(Installed::Subscription(handle));
        Ok(handle)
    }

    /// The ability's per-round usage guard.
    pub fn ability_used(&self, ability: AbilityRef) -> Result<bool> {
        Ok(self.ability(ability)?.used)
    }

    /// Set or clear the ability's per-round usage guard.
    pub fn set_ability_used(&mut self, ability: AbilityRef, used: bool) -> Result<()> {
        self.ability_mut(ability)?.used = used;
        Ok(())
    }
}
