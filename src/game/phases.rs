//! Round and phase boundaries.
//!
//! Each boundary fires its event kind on every ship's bus and then resolves
//! the triggers handlers registered for that kind. Round start and round
//! end go in id order; combat phase start goes in combat order (highest
//! pilot skill first).

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{Result, ShipId};
use crate::events::{EventKind, ShipEvent};
use crate::triggers::resolve;

use super::Game;

/// Where the round is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Ships are being placed; no round has started.
    Setup,
    /// Planning and activation (movement is external).
    Activation,
    Combat,
    /// The round's end has been processed.
    End,
}

impl Game {
    /// Ships able to act in the combat phase: not destroyed, highest pilot
    /// skill first, ties by id.
    #[must_use]
    pub fn combat_order(&self) -> Vec<ShipId> {
        let mut order: Vec<(i32, ShipId)> = self
            .ships()
            .filter(|s| !s.is_destroyed())
            .map(|s| (s.pilot_skill(), s.id()))
            .collect();
        order.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        order.into_iter().map(|(_, id)| id).collect()
    }

    fn broadcast(&mut self, kind: EventKind, ships: &[ShipId]) {
        let round = self.round();
        for &ship in ships {
            self.emit(ship, &ShipEvent::boundary(kind, ship, round));
        }
    }

    /// Begin the next round and resolve ROUND_START triggers.
    pub fn start_round(&mut self) -> Result<()> {
        self.ensure_idle()?;
        let round = self.advance_round();
        info!(round, "round started");
        self.set_phase(Phase::Activation);
        let ships = self.ship_ids();
        self.broadcast(EventKind::ROUND_START, &ships);
        resolve(self, EventKind::ROUND_START, |_| {});
        Ok(())
    }

    /// Enter the combat phase.
    ///
    /// `on_done` runs once every COMBAT_PHASE_START trigger has finished,
    /// which may be after this returns if one of them waits for a player.
    pub fn start_combat_phase(&mut self, on_done: impl FnOnce(&mut Game) + 'static) -> Result<()> {
        self.ensure_idle()?;
        self.set_phase(Phase::Combat);
        let order = self.combat_order();
        self.broadcast(EventKind::COMBAT_PHASE_START, &order);
        resolve(self, EventKind::COMBAT_PHASE_START, on_done);
        Ok(())
    }

    /// Leave the combat phase.
    pub fn end_combat_phase(&mut self, on_done: impl FnOnce(&mut Game) + 'static) -> Result<()> {
        self.ensure_idle()?;
        let order = self.combat_order();
        self.broadcast(EventKind::COMBAT_PHASE_END, &order);
        resolve(self, EventKind::COMBAT_PHASE_END, on_done);
        Ok(())
    }

    /// End the round.
    ///
    /// Fails while any trigger is unresolved. Otherwise fires ROUND_END
    /// (usage guards clear here) and resolves its triggers. Once they have
    /// all finished, this round's bumps and attacks are forgotten and the
    /// phase becomes `End`.
    pub fn end_round(&mut self) -> Result<()> {
        self.ensure_idle()?;
        let ships = self.ship_ids();
        self.broadcast(EventKind::ROUND_END, &ships);
        resolve(self, EventKind::ROUND_END, |game: &mut Game| {
            for ship in game.ship_ids() {
                if let Ok(ship) = game.ship_mut(ship) {
                    ship.clear_round_state();
                }
            }
            game.set_phase(Phase::End);
            info!(round = game.round(), "round ended");
        });
        Ok(())
    }
}
