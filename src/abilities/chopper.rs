//! "Chopper" (pilot): at the start of the combat phase, every ship that
//! bumped into Chopper this round receives a stress token.

use tracing::warn;

use crate::core::{AbilityRef, ShipId};
use crate::events::EventKind;
use crate::game::Game;
use crate::ship::Token;
use crate::triggers::{in_sequence, register, Completion, Continuation, Trigger};

use super::{Ability, Hook};

pub const NAME: &str = "\"Chopper\"";

#[must_use]
pub fn chopper_ability() -> Ability {
    Ability::new(NAME, |me: AbilityRef| {
        vec![Hook::event(EventKind::COMBAT_PHASE_START, move |game: &mut Game, _| {
            let Ok(ship) = game.ship(me.ship) else {
                return;
            };
            let trigger = Trigger::new(NAME, EventKind::COMBAT_PHASE_START, move |game: &mut Game, done: Completion| {
                assign_stress_tokens(game, me.ship, done);
            })
            .with_owner(ship.owner())
            .with_host(me.ship);
            register(game, trigger);
        })]
    })
}

fn assign_stress_tokens(game: &mut Game, host: ShipId, done: Completion) {
    let bumped = game.ship(host).map(|s| s.bumped().to_vec()).unwrap_or_default();
    in_sequence(game, bumped, stress_one, move |game: &mut Game| done.finish(game));
}

fn stress_one(game: &mut Game, target: ShipId, next: Continuation<Game>) {
    let Ok(ship) = game.ship(target) else {
        warn!(%target, "bumped ship is gone");
        next(game);
        return;
    };
    let pilot = ship.pilot_name().to_string();
    game.show_error_to_human(format!("{pilot} is bumped into \"Chopper\" and gets Stress"));
    if let Err(err) = game.assign_token(Token::stress(target), next) {
        warn!(%err, "stress not assigned");
    }
}
