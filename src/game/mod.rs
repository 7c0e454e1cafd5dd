//! The game context.
//!
//! `Game` owns every ship, the trigger queue, the current combat session,
//! pending player decisions, the dice and the external collaborators. It is
//! handed mutably to every event handler and trigger action; nothing in the
//! engine is global.
//!
//! ## Key Types
//!
//! - `Game`: the context
//! - `Phase`: where the round is
//! - `Services`: external collaborators (messages, roster, models)
//! - `PendingDecision`: a question waiting for a player
//!
//! ## Example Usage
//!
//! ```
//! use rust_skirmish::catalog;
//! use rust_skirmish::core::{GameConfig, PlayerId};
//! use rust_skirmish::game::{Game, Position};
//!
//! let mut game = Game::new(GameConfig::new(2).with_seed(7));
//! let chopper = game
//!     .add_ship(PlayerId::new(0), &catalog::chopper(), Vec::new(), Position::default())
//!     .unwrap();
//! let tie = game
//!     .add_ship(PlayerId::new(1), &catalog::academy_pilot(), Vec::new(), Position::default())
//!     .unwrap();
//!
//! game.start_round().unwrap();
//! game.record_bump(tie, chopper).unwrap();
//! game.start_combat_phase(|_| {}).unwrap();
//! assert_eq!(game.ship(tie).unwrap().token_count(rust_skirmish::ship::TokenKind::Stress), 1);
//! ```

mod decisions;
mod phases;
mod services;
mod ships;

pub use decisions::PendingDecision;
pub use phases::Phase;
pub use services::{
    Message, MessageLevel, MessageSink, ModelFactory, ModelHandle, NullServices, PanelHandle, Position,
    Roster, Services,
};

use std::collections::VecDeque;

use tracing::{info, warn};

use crate::combat::{CombatSession, DiceSource};
use crate::core::{EngineError, GameConfig, GameRng, Result, ShipId};
use crate::events::{EventKind, ShipEvent, SubscriptionHandle};
use crate::ship::Ship;
use crate::triggers::{QueueStatus, TriggerHost, TriggerQueue};

/// The game context.
pub struct Game {
    config: GameConfig,
    ships: Vec<Ship>,
    triggers: TriggerQueue<Game>,
    pub(crate) combat: Option<CombatSession>,
    round: u32,
    phase: Phase,
    services: Services,
    decisions: VecDeque<PendingDecision>,
    pub(crate) dice: Box<dyn DiceSource>,
    history: VecDeque<Message>,
}

impl TriggerHost for Game {
    fn trigger_queue(&mut self) -> &mut TriggerQueue<Self> {
        &mut self.triggers
    }

    /// Phase boundaries, token assignment and the extra-attack check are
    /// resolved by the engine. Game-defined kinds are resolved by the
    /// caller. Everything else is only ever emitted.
    fn resolves(&self, kind: EventKind) -> bool {
        kind.is_custom()
            || matches!(
                kind,
                EventKind::ROUND_START
                    | EventKind::ROUND_END
                    | EventKind::COMBAT_PHASE_START
                    | EventKind::COMBAT_PHASE_END
                    | EventKind::COMBAT_CHECK_EXTRA_ATTACK
                    | EventKind::TOKEN_ASSIGNED
            )
    }
}

impl Game {
    /// Create a game with no ships, seeded dice and no-op collaborators.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            triggers: TriggerQueue::new(config.tie_break, config.player_count)
                .with_log_limit(config.resolution_log_limit),
            dice: Box::new(GameRng::new(config.seed)),
            ships: Vec::new(),
            combat: None,
            round: 0,
            phase: Phase::Setup,
            services: Services::default(),
            decisions: VecDeque::new(),
            history: VecDeque::new(),
            config,
        }
    }

    /// Replace the collaborators (builder pattern).
    #[must_use]
    pub fn with_services(mut self, services: Services) -> Self {
        self.services = services;
        self
    }

    /// Replace the dice (builder pattern).
    #[must_use]
    pub fn with_dice(mut self, dice: impl DiceSource + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current round, 0 before the first round starts.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        info!(round = self.round, from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
    }

    pub(crate) fn advance_round(&mut self) -> u32 {
        self.round += 1;
        self.round
    }

    pub fn ship(&self, id: ShipId) -> Result<&Ship> {
        self.ships.get(id.index()).ok_or(EngineError::UnknownShip(id))
    }

    pub(crate) fn ship_mut(&mut self, id: ShipId) -> Result<&mut Ship> {
        self.ships.get_mut(id.index()).ok_or(EngineError::UnknownShip(id))
    }

    /// All ships, in id order. Destroyed ships are included.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    /// Ids of every ship, in id order.
    #[must_use]
    pub fn ship_ids(&self) -> Vec<ShipId> {
        self.ships.iter().map(Ship::id).collect()
    }

    pub(crate) fn push_ship(&mut self, ship: Ship) {
        self.ships.push(ship);
    }

    pub(crate) fn next_ship_id(&self) -> ShipId {
        ShipId::new(u32::try_from(self.ships.len()).unwrap_or(u32::MAX))
    }

    pub(crate) fn services(&mut self) -> &mut Services {
        &mut self.services
    }

    /// The attack currently being resolved, if any.
    #[must_use]
    pub fn combat(&self) -> Option<&CombatSession> {
        self.combat.as_ref()
    }

    /// The trigger queue (read-only).
    #[must_use]
    pub fn triggers(&self) -> &TriggerQueue<Game> {
        &self.triggers
    }

    /// Take the resolution log recorded so far.
    pub fn take_resolution_log(&mut self) -> crate::triggers::ResolutionLog {
        self.triggers.take_log()
    }

    /// Fail with `ResolutionPending` unless the trigger queue is idle, or
    /// with `UnresolvedTriggers` if triggers wait on a kind the engine never
    /// resolves. Those are drained with an explicit [`crate::triggers::resolve`].
    pub fn ensure_idle(&self) -> Result<()> {
        match self.triggers.status() {
            QueueStatus::Idle => {}
            QueueStatus::Waiting { kind, trigger } => {
                return Err(EngineError::ResolutionPending { kind, trigger: Some(trigger) });
            }
            QueueStatus::Resolving { kind } => {
                return Err(EngineError::ResolutionPending { kind, trigger: None });
            }
        }
        match self.triggers.pending_kinds().into_iter().find(|&(kind, _)| !self.resolves(kind)) {
            Some((kind, count)) => Err(EngineError::UnresolvedTriggers { kind, count }),
            None => Ok(()),
        }
    }

    // === Events ===

    /// Fire `event` on `ship`'s bus.
    ///
    /// Handlers run synchronously, in subscription order, against the
    /// subscriber list as it was when emission began. Returns the number of
    /// handlers invoked; an unknown ship reaches nobody.
    pub fn emit(&mut self, ship: ShipId, event: &ShipEvent) -> usize {
        let Ok(host) = self.ship(ship) else {
            warn!(%ship, kind = %event.kind, "emit on unknown ship");
            return 0;
        };
        let emission = host.bus.snapshot(event.kind);
        emission.dispatch(self, event, move |game: &mut Game, handle| {
            game.ship_mut(ship).is_ok_and(|s| s.bus.unsubscribe(handle))
        })
    }

    /// Subscribe a handler on `ship`'s bus.
    ///
    /// For code outside any ability: scenario scripts, front ends, tests.
    /// Abilities use [`Game::subscribe_for`] so deactivation cleans up.
    pub fn subscribe(
        &mut self,
        ship: ShipId,
        kind: EventKind,
        handler: impl Fn(&mut Game, &ShipEvent) + 'static,
    ) -> Result<SubscriptionHandle> {
        Ok(self.ship_mut(ship)?.bus.subscribe(kind, handler))
    }

    /// Remove a subscription from `ship`'s bus. Returns `Ok(false)` if it
    /// was already gone.
    pub fn unsubscribe(&mut self, ship: ShipId, handle: SubscriptionHandle) -> Result<bool> {
        Ok(self.ship_mut(ship)?.bus.unsubscribe(handle))
    }

    // === Messages ===

    /// Show a message and keep it in the bounded history.
    pub fn show_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        let message = Message { level, text: text.into() };
        match level {
            MessageLevel::Info => info!(text = %message.text, "message"),
            MessageLevel::Error | MessageLevel::ErrorToHuman => warn!(?level, text = %message.text, "message"),
        }
        self.services.messages.show(&message);
        if self.config.message_history == 0 {
            return;
        }
        if self.history.len() == self.config.message_history {
            self.history.pop_front();
        }
        self.history.push_back(message);
    }

    pub fn show_info(&mut self, text: impl Into<String>) {
        self.show_message(MessageLevel::Info, text);
    }

    pub fn show_error(&mut self, text: impl Into<String>) {
        self.show_message(MessageLevel::Error, text);
    }

    pub fn show_error_to_human(&mut self, text: impl Into<String>) {
        self.show_message(MessageLevel::ErrorToHuman, text);
    }

    /// Recent messages, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.history.iter()
    }

    /// The most recent message, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.history.back()
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("round", &self.round)
            .field("phase", &self.phase)
            .field("ships", &self.ships)
            .field("triggers", &self.triggers)
            .field("combat", &self.combat)
            .field("decisions", &self.decisions.len())
            .finish_non_exhaustive()
    }
}
