//! Attack resolution and additional attacks.

use tracing::{info, warn};

use crate::core::{EngineError, Result, ShipId};
use crate::events::{EventKind, ShipEvent};
use crate::game::Game;
use crate::ship::{Stat, Weapon};
use crate::triggers::{resolve, Continuation};

use super::{AttackRoll, CombatSession, DefenseRoll};

impl Game {
    /// Declare an attack by `attacker` on `defender` with the weapon at
    /// `weapon_index` (0 is the primary weapon).
    ///
    /// The attack is rolled and applied, ATTACK_HIT or ATTACK_MISSED fires on
    /// the attacker, and then COMBAT_CHECK_EXTRA_ATTACK triggers resolve.
    /// `on_done` runs after the session is discarded, which may be after this
    /// returns if an additional attack waits for a weapon choice.
    pub fn declare_attack(
        &mut self,
        attacker: ShipId,
        defender: ShipId,
        weapon_index: usize,
        on_done: impl FnOnce(&mut Game) + 'static,
    ) -> Result<()> {
        self.ship(defender)?;
        let ship = self.ship(attacker)?;
        if self.combat.is_some() {
            return Err(EngineError::CombatInProgress { attacker });
        }
        if ship.attack_performed() {
            return Err(EngineError::AlreadyAttacked(attacker));
        }
        let weapon = ship
            .weapons()
            .get(weapon_index)
            .cloned()
            .ok_or(EngineError::UnknownWeapon { ship: attacker, index: weapon_index })?;

        info!(%attacker, %defender, weapon = %weapon.name, "attack declared");
        self.combat = Some(CombatSession::new(attacker, defender, weapon));
        self.perform_attack(Box::new(move |game: &mut Game| {
            if let Ok(ship) = game.ship_mut(attacker) {
                ship.attack_performed = true;
            }
            game.combat = None;
            info!(%attacker, "attack complete");
            on_done(game);
        }));
        Ok(())
    }

    /// Roll and apply the current session's attack, then resolve
    /// COMBAT_CHECK_EXTRA_ATTACK triggers and continue with `then`.
    fn perform_attack(&mut self, then: Continuation<Game>) {
        let Some(session) = self.combat.clone() else {
            warn!("attack performed with no combat session");
            then(self);
            return;
        };
        let (attacker, defender) = (session.attacker, session.defender);
        let (Ok(attacking), Ok(defending)) = (self.ship(attacker), self.ship(defender)) else {
            warn!(%attacker, %defender, "attack between unknown ships");
            then(self);
            return;
        };
        let attack_dice = session.weapon.attack_dice(attacking.firepower());
        let defense_dice = defending.agility();

        let attack = AttackRoll::roll(&mut *self.dice, attack_dice);
        let defense = DefenseRoll::roll(&mut *self.dice, defense_dice);
        let damage = attack.total().saturating_sub(defense.evades);
        info!(%attacker, %defender, ?attack, ?defense, damage, "attack rolled");

        let destroyed = self.deal_damage(defender, damage);
        let kind = if damage > 0 { EventKind::ATTACK_HIT } else { EventKind::ATTACK_MISSED };
        self.emit(attacker, &ShipEvent::attack(kind, attacker, defender, i64::from(damage)));

        if destroyed {
            info!(ship = %defender, by = %attacker, "ship destroyed");
            self.emit(defender, &ShipEvent::new(EventKind::SHIP_DESTROYED, defender).with_other(attacker));
            if let Err(err) = self.deactivate_all(defender) {
                warn!(%err, "could not deactivate destroyed ship");
            }
        }

        self.emit(
            attacker,
            &ShipEvent::new(EventKind::COMBAT_CHECK_EXTRA_ATTACK, attacker).with_other(defender),
        );
        resolve(self, EventKind::COMBAT_CHECK_EXTRA_ATTACK, then);
    }

    /// Apply damage: shields first, then hull. Returns whether this damage
    /// destroyed the ship.
    fn deal_damage(&mut self, ship: ShipId, damage: u32) -> bool {
        if damage == 0 {
            return false;
        }
        let Ok(target) = self.ship_mut(ship) else {
            return false;
        };
        let damage = i32::try_from(damage).unwrap_or(i32::MAX);
        let shields = target.raw_stat(Stat::Shields);
        let absorbed = damage.min(shields);
        target.set_raw_stat(Stat::Shields, shields - absorbed);
        let hull = target.raw_stat(Stat::Hull);
        target.set_raw_stat(Stat::Hull, hull - (damage - absorbed));

        let destroyed = !target.destroyed && target.hull() == 0;
        if destroyed {
            target.destroyed = true;
        }
        self.stats_changed(ship, -damage);
        destroyed
    }

    /// Grant `host` an additional attack in the current combat.
    ///
    /// At most one additional attack per combat: if there is no combat for
    /// `host` or it was already extended, a message is shown and `on_finish`
    /// runs. Otherwise the combat is marked extended, the weapon is chosen
    /// (a player decision when the host has more than one) and `predicate`
    /// judges it. A rejected weapon abandons the attack; `on_finish` runs
    /// either way.
    pub fn start_additional_attack(
        &mut self,
        host: ShipId,
        on_finish: impl FnOnce(&mut Game) + 'static,
        predicate: impl Fn(&mut Game, ShipId, &Weapon) -> bool + 'static,
    ) {
        let Ok(ship) = self.ship(host) else {
            warn!(%host, "additional attack for unknown ship");
            on_finish(self);
            return;
        };
        let pilot = ship.pilot_name().to_string();
        let owner = ship.owner();
        let weapons: Vec<Weapon> = ship.weapons().to_vec();

        let extendable = self
            .combat
            .as_ref()
            .is_some_and(|session| session.attacker == host && session.can_extend());
        let defender = match self.combat.as_mut() {
            Some(session) if extendable => {
                session.mark_extended();
                session.defender
            }
            _ => {
                warn!(%host, "additional attack refused");
                self.show_error_to_human(format!("{pilot} cannot attack one more time"));
                on_finish(self);
                return;
            }
        };

        let names = weapons.iter().map(|w| w.name.clone()).collect();
        self.request_decision(owner, "Choose weapon for additional attack", names, move |game: &mut Game, choice| {
            let chosen = weapons.get(choice).cloned();
            let weapon = match (chosen, game.combat.as_mut()) {
                (Some(weapon), Some(session)) => {
                    session.weapon = weapon.clone();
                    weapon
                }
                _ => {
                    warn!(%host, "combat ended before the additional attack");
                    on_finish(game);
                    return;
                }
            };
            if predicate(game, defender, &weapon) {
                info!(%host, %defender, weapon = %weapon.name, "additional attack");
                game.perform_attack(Box::new(on_finish));
            } else {
                warn!(%host, weapon = %weapon.name, "additional attack abandoned");
                on_finish(game);
            }
        });
    }
}
