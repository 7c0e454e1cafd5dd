//! Ship setup and ship-level operations.

use tracing::{debug, info};

use crate::abilities::AbilitySource;
use crate::core::{AbilityId, AbilityRef, EngineError, PlayerId, Result, ShipId};
use crate::events::{EventKind, ShipEvent};
use crate::ship::{ModifierId, SharedModifier, Ship, ShipDefinition, Stat, Token, TokenKind, Upgrade};
use crate::triggers::resolve;

use super::{Game, Position};

impl Game {
    /// Put a ship into play.
    ///
    /// Upgrades are installed first; if any does not fit, nothing is added.
    /// Then the model is created and tagged, the ship's pilot and upgrade
    /// abilities are activated, current hull and shields are set to the
    /// effective maxima and the roster gets its panel.
    pub fn add_ship(
        &mut self,
        owner: PlayerId,
        definition: &ShipDefinition,
        upgrades: Vec<Upgrade>,
        position: Position,
    ) -> Result<ShipId> {
        let id = self.next_ship_id();
        let mut ship = Ship::from_definition(id, owner, definition, self.config().max_pilot_skill);
        for upgrade in upgrades {
            fit_upgrade(&mut ship, upgrade)?;
        }

        let model = self.services().models.create_model(id, position);
        self.services().models.tag_children(model, &format!("ShipId:{}", id.raw()));
        ship.model = Some(model);
        self.push_ship(ship);

        self.activate_all(id)?;

        let ship = self.ship_mut(id)?;
        let max_hull = ship.max_hull();
        let max_shields = ship.max_shields();
        ship.set_raw_stat(Stat::Hull, max_hull);
        ship.set_raw_stat(Stat::Shields, max_shields);
        let names = ship.upgrades.installed_names();

        let panel = self.services().roster.create_info_panel(id);
        self.services().roster.update_upgrade_panel(id, panel, &names);
        self.ship_mut(id)?.panel = Some(panel);

        info!(ship = %id, %owner, pilot = %definition.pilot_name, upgrades = names.len(), "ship added");
        Ok(id)
    }

    /// Install an upgrade on a ship already in play and activate its
    /// abilities.
    pub fn install_upgrade(&mut self, ship: ShipId, upgrade: Upgrade) -> Result<()> {
        let host = self.ship_mut(ship)?;
        let first_new = host.abilities.len();
        fit_upgrade(host, upgrade)?;
        let count = host.abilities.len();
        let names = host.upgrades.installed_names();
        let panel = host.panel;

        for index in (first_new..count).filter_map(|i| u16::try_from(i).ok()) {
            self.activate_ability(AbilityRef::new(ship, AbilityId::new(index)))?;
        }
        if let Some(panel) = panel {
            self.services().roster.update_upgrade_panel(ship, panel, &names);
        }
        Ok(())
    }

    /// Tell the roster and the ship's subscribers that stats moved.
    pub(crate) fn stats_changed(&mut self, ship: ShipId, delta: i32) {
        let Ok(host) = self.ship(ship) else {
            return;
        };
        let stats = host.stats();
        self.services().roster.notify_stats_changed(ship, &stats);
        self.emit(ship, &ShipEvent::new(EventKind::STATS_CHANGED, ship).with_value(i64::from(delta)));
    }

    /// Add `delta` to a stored stat. Returns the new effective value.
    pub fn change_stat(&mut self, ship: ShipId, stat: Stat, delta: i32) -> Result<i32> {
        let host = self.ship_mut(ship)?;
        let raw = host.raw_stat(stat);
        host.set_raw_stat(stat, raw.saturating_add(delta));
        let value = host.stat(stat);
        debug!(%ship, ?stat, delta, value, "stat changed");
        self.stats_changed(ship, delta);
        Ok(value)
    }

    /// Push a pilot skill modifier onto the front of the ship's stack.
    pub fn add_pilot_skill_modifier(&mut self, ship: ShipId, modifier: SharedModifier) -> Result<ModifierId> {
        let id = self.ship_mut(ship)?.pilot_skill_modifiers.push(modifier);
        self.stats_changed(ship, 0);
        Ok(id)
    }

    /// Remove a pilot skill modifier. Returns whether it was present.
    pub fn remove_pilot_skill_modifier(&mut self, ship: ShipId, id: ModifierId) -> Result<bool> {
        let removed = self.ship_mut(ship)?.pilot_skill_modifiers.remove(id).is_some();
        if removed {
            self.stats_changed(ship, 0);
        }
        Ok(removed)
    }

    // === Tokens ===

    /// Give a token to its target, then resolve TOKEN_ASSIGNED triggers.
    ///
    /// `on_done` runs once those triggers have all finished, which may be
    /// after this returns.
    pub fn assign_token(&mut self, token: Token, on_done: impl FnOnce(&mut Game) + 'static) -> Result<()> {
        let count = self.ship_mut(token.target)?.add_token(token.kind);
        info!(ship = %token.target, token = %token.kind, count, "token assigned");
        self.emit(
            token.target,
            &ShipEvent::token(EventKind::TOKEN_ASSIGNED, token.target, token.kind).with_value(i64::from(count)),
        );
        resolve(self, EventKind::TOKEN_ASSIGNED, on_done);
        Ok(())
    }

    /// Take one token of `kind` from `ship`. Returns whether one was there.
    pub fn remove_token(&mut self, ship: ShipId, kind: TokenKind) -> Result<bool> {
        let removed = self.ship_mut(ship)?.take_token(kind);
        if removed {
            debug!(%ship, token = %kind, "token removed");
            self.emit(ship, &ShipEvent::token(EventKind::TOKEN_REMOVED, ship, kind));
        }
        Ok(removed)
    }

    // === Bumps ===

    /// Record that `ship` bumped into `other` during its maneuver.
    ///
    /// Both ships remember the bump until round end. SHIP_BUMPED fires on
    /// the ship that was bumped into.
    pub fn record_bump(&mut self, ship: ShipId, other: ShipId) -> Result<()> {
        self.ship(other)?;
        self.ship_mut(ship)?.push_bump(other);
        self.ship_mut(other)?.push_bump(ship);
        debug!(%ship, %other, "bump recorded");
        self.emit(other, &ShipEvent::new(EventKind::SHIP_BUMPED, other).with_other(ship));
        Ok(())
    }
}

fn fit_upgrade(ship: &mut Ship, upgrade: Upgrade) -> Result<()> {
    match ship.upgrades.install(upgrade) {
        Ok(fitted) => {
            let source = AbilitySource::Upgrade(fitted.name.clone());
            ship.abilities
                .extend(fitted.abilities.into_iter().map(|a| a.with_source(source.clone())));
            if let Some(weapon) = fitted.weapon {
                ship.weapons.push(weapon);
            }
            debug!(ship = %ship.id(), upgrade = %fitted.name, "upgrade installed");
            Ok(())
        }
        Err(rejected) => Err(EngineError::NoFreeSlot {
            ship: ship.id(),
            kind: rejected.kind,
            upgrade: rejected.name,
        }),
    }
}
