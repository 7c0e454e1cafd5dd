//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rust_skirmish::combat::ScriptedDice;
use rust_skirmish::core::{GameConfig, PlayerId, ShipId};
use rust_skirmish::game::{Game, Message, MessageLevel, MessageSink, NullServices, PanelHandle, Position, Roster, Services};
use rust_skirmish::ship::{ShipDefinition, ShipStats, Upgrade};

/// Install a test subscriber once. `RUST_LOG=debug` shows engine logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Roster that records every stats notification.
#[derive(Clone, Default)]
pub struct RecordingRoster {
    pub notifications: Rc<RefCell<Vec<(ShipId, ShipStats)>>>,
    pub panels: Rc<RefCell<Vec<(ShipId, Vec<String>)>>>,
}

impl Roster for RecordingRoster {
    fn notify_stats_changed(&mut self, ship: ShipId, stats: &ShipStats) {
        self.notifications.borrow_mut().push((ship, *stats));
    }

    fn create_info_panel(&mut self, ship: ShipId) -> PanelHandle {
        PanelHandle(u64::from(ship.raw()))
    }

    fn update_upgrade_panel(&mut self, ship: ShipId, _panel: PanelHandle, upgrades: &[String]) {
        self.panels.borrow_mut().push((ship, upgrades.to_vec()));
    }
}

/// Message sink that records every message.
#[derive(Clone, Default)]
pub struct RecordingMessages {
    pub messages: Rc<RefCell<Vec<Message>>>,
}

impl RecordingMessages {
    pub fn texts(&self, level: MessageLevel) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|m| m.level == level)
            .map(|m| m.text.clone())
            .collect()
    }
}

impl MessageSink for RecordingMessages {
    fn show(&mut self, message: &Message) {
        self.messages.borrow_mut().push(message.clone());
    }
}

/// A two-player game with recording collaborators and scripted dice.
pub struct Table {
    pub game: Game,
    pub roster: RecordingRoster,
    pub messages: RecordingMessages,
}

impl Table {
    pub fn new(dice: ScriptedDice) -> Self {
        init_tracing();
        let roster = RecordingRoster::default();
        let messages = RecordingMessages::default();
        let services = Services::default()
            .with_roster(roster.clone())
            .with_messages(messages.clone())
            .with_models(NullServices);
        let game = Game::new(GameConfig::new(2).with_seed(42))
            .with_services(services)
            .with_dice(dice);
        Self { game, roster, messages }
    }

    pub fn add(&mut self, player: u8, definition: &ShipDefinition, upgrades: Vec<Upgrade>) -> ShipId {
        self.game
            .add_ship(PlayerId::new(player), definition, upgrades, Position::default())
            .unwrap()
    }
}
