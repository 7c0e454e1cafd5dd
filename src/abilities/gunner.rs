//! Gunner (crew): after a missed attack, once per round, perform an
//! additional attack with the primary weapon.
//!
//! The extra attack is not decided on the miss itself. The miss arms a
//! one-shot handler on COMBAT_CHECK_EXTRA_ATTACK, and that handler
//! registers the trigger right before the kind is resolved.

use tracing::debug;

use crate::core::{AbilityRef, ShipId};
use crate::events::EventKind;
use crate::game::Game;
use crate::ship::{Upgrade, UpgradeType, Weapon};
use crate::triggers::{register, Completion, Trigger};

use super::{Ability, Hook};

pub const NAME: &str = "Gunner";

/// The Gunner upgrade card.
#[must_use]
pub fn gunner() -> Upgrade {
    Upgrade::new(NAME, UpgradeType::Crew, 5).with_ability(gunner_ability())
}

/// The Gunner ability on its own.
#[must_use]
pub fn gunner_ability() -> Ability {
    Ability::new(NAME, |me: AbilityRef| {
        vec![
            Hook::event(EventKind::ATTACK_MISSED, move |game: &mut Game, _| on_attack_missed(game, me)),
            Hook::event(EventKind::ROUND_END, move |game: &mut Game, _| {
                if let Err(err) = game.set_ability_used(me, false) {
                    debug!(%err, "gunner guard not cleared");
                }
            }),
        ]
    })
}

fn on_attack_missed(game: &mut Game, me: AbilityRef) {
    let used = game.ability_used(me).unwrap_or(true);
    let extendable = game.combat().is_some_and(|c| c.attacker == me.ship && c.can_extend());
    if used || !extendable {
        debug!(ability = %me, used, extendable, "gunner not armed");
        return;
    }
    if game.set_ability_used(me, true).is_err() {
        return;
    }
    let armed = game.subscribe_once_for(me, EventKind::COMBAT_CHECK_EXTRA_ATTACK, move |game: &mut Game, _| {
        register_second_attack(game, me);
    });
    if let Err(err) = armed {
        debug!(%err, "gunner could not arm");
    }
}

fn register_second_attack(game: &mut Game, me: AbilityRef) {
    let Ok(ship) = game.ship(me.ship) else {
        return;
    };
    let trigger = Trigger::new(NAME, EventKind::COMBAT_CHECK_EXTRA_ATTACK, move |game: &mut Game, done: Completion| {
        use_gunner(game, me.ship, done);
    })
    .with_owner(ship.owner())
    .with_host(me.ship);
    register(game, trigger);
}

fn use_gunner(game: &mut Game, host: ShipId, done: Completion) {
    let pilot = game.ship(host).map(|s| s.pilot_name().to_string()).unwrap_or_default();
    let extendable = game.combat().is_some_and(|c| c.attacker == host && c.can_extend());
    if !extendable {
        game.show_error_to_human(format!("{pilot} cannot attack one more time"));
        done.finish(game);
        return;
    }

    game.show_info(format!("{pilot} can perform second attack\nfrom primary weapon"));
    game.start_additional_attack(
        host,
        move |game: &mut Game| {
            // A skipped additional attack must not leave the regular attack available.
            if let Ok(ship) = game.ship_mut(host) {
                ship.attack_performed = true;
            }
            done.finish(game);
        },
        is_primary_weapon_shot,
    );
}

fn is_primary_weapon_shot(game: &mut Game, _defender: ShipId, weapon: &Weapon) -> bool {
    if weapon.is_primary() {
        return true;
    }
    game.show_error("Attack must be performed from primary weapon");
    false
}
