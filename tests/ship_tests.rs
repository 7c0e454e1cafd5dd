//! Ship, stat and ability lifecycle integration tests.

mod common;

use std::rc::Rc;

use common::Table;
use proptest::prelude::*;
use rust_skirmish::catalog;
use rust_skirmish::combat::ScriptedDice;
use rust_skirmish::core::{AbilityId, AbilityRef, EngineError, ShipId};
use rust_skirmish::events::EventKind;
use rust_skirmish::ship::{Stat, TokenKind, UpgradeType};

// =============================================================================
// Initialization
// =============================================================================

/// Test that initialization sets hull and shields to the effective maxima.
#[test]
fn test_hull_and_shield_upgrades_apply_at_setup() {
    let mut table = Table::new(ScriptedDice::new());
    let vcx = table.add(0, &catalog::lothal_rebel(), vec![catalog::shield_upgrade()]);
    let rookie = table.add(0, &catalog::rookie_pilot(), vec![catalog::hull_upgrade()]);

    let stats = table.game.ship(rookie).unwrap().stats();
    assert_eq!(stats.max_hull, 4);
    assert_eq!(stats.hull, 4);
    assert_eq!(stats.shields, 2);

    let stats = table.game.ship(vcx).unwrap().stats();
    assert_eq!(stats.max_shields, 7);
    assert_eq!(stats.shields, 7);
}

/// Test that the roster gets a panel with the installed upgrade names.
#[test]
fn test_upgrade_panel_updated() {
    let mut table = Table::new(ScriptedDice::new());
    let vcx = table.add(
        0,
        &catalog::lothal_rebel(),
        vec![catalog::gunner(), catalog::ion_cannon_turret()],
    );

    let panels = table.roster.panels.borrow();
    assert_eq!(panels.len(), 1);
    assert_eq!(panels[0].0, vcx);
    assert_eq!(panels[0].1, vec!["Ion Cannon Turret", "Gunner"]);
    assert!(table.game.ship(vcx).unwrap().panel().is_some());
    assert!(table.game.ship(vcx).unwrap().model().is_some());
}

/// Test that an upgrade without a free slot is refused and nothing is added.
#[test]
fn test_no_free_slot() {
    let mut table = Table::new(ScriptedDice::new());
    let result = table.game.add_ship(
        rust_skirmish::core::PlayerId::new(0),
        &catalog::rookie_pilot(),
        vec![catalog::hull_upgrade(), catalog::shield_upgrade()],
        Default::default(),
    );

    assert_eq!(
        result,
        Err(EngineError::NoFreeSlot {
            ship: ShipId(0),
            kind: UpgradeType::Modification,
            upgrade: "Shield Upgrade".to_string(),
        })
    );
    assert_eq!(table.game.ships().count(), 0);
}

/// Test that an upgrade installed mid-game is activated immediately.
#[test]
fn test_install_after_setup() {
    let mut table = Table::new(ScriptedDice::new());
    let tie = table.add(0, &catalog::academy_pilot(), Vec::new());
    assert_eq!(table.game.ship(tie).unwrap().agility(), 3);

    // Academy pilots have no modification slot.
    assert!(table.game.install_upgrade(tie, catalog::stealth_device()).is_err());

    let black = table.add(0, &catalog::black_squadron_pilot(), Vec::new());
    table.game.install_upgrade(black, catalog::stealth_device()).unwrap();
    assert_eq!(table.game.ship(black).unwrap().agility(), 4);
    assert!(table.game.ship(black).unwrap().abilities()[0].is_active());
}

// =============================================================================
// Pilot skill modifiers
// =============================================================================

/// Test Veteran Instincts through the modifier stack.
#[test]
fn test_veteran_instincts() {
    let mut table = Table::new(ScriptedDice::new());
    let black = table.add(0, &catalog::black_squadron_pilot(), vec![catalog::veteran_instincts()]);
    assert_eq!(table.game.ship(black).unwrap().pilot_skill(), 6);

    table
        .game
        .deactivate_ability(AbilityRef::new(black, AbilityId::new(0)))
        .unwrap();
    assert_eq!(table.game.ship(black).unwrap().pilot_skill(), 4);
    assert_eq!(table.game.ship(black).unwrap().modifier_count(), 0);
}

/// Test LIFO precedence: M1, M2, M3 added, M2 removed -> M3; M3 removed -> M1.
#[test]
fn test_modifier_lifo_through_game() {
    let mut table = Table::new(ScriptedDice::new());
    let tie = table.add(0, &catalog::academy_pilot(), Vec::new());

    let m1 = table.game.add_pilot_skill_modifier(tie, Rc::new(|ps: &mut i32| *ps = 7)).unwrap();
    let m2 = table.game.add_pilot_skill_modifier(tie, Rc::new(|ps: &mut i32| *ps = 8)).unwrap();
    let m3 = table.game.add_pilot_skill_modifier(tie, Rc::new(|ps: &mut i32| *ps = 9)).unwrap();
    assert_eq!(table.game.ship(tie).unwrap().pilot_skill(), 9);

    assert!(table.game.remove_pilot_skill_modifier(tie, m2).unwrap());
    assert_eq!(table.game.ship(tie).unwrap().pilot_skill(), 9);

    assert!(table.game.remove_pilot_skill_modifier(tie, m3).unwrap());
    assert_eq!(table.game.ship(tie).unwrap().pilot_skill(), 7);

    assert!(table.game.remove_pilot_skill_modifier(tie, m1).unwrap());
    assert_eq!(table.game.ship(tie).unwrap().pilot_skill(), 1);
}

/// Test that modifier changes notify the roster and fire STATS_CHANGED.
#[test]
fn test_modifier_changes_notify() {
    let mut table = Table::new(ScriptedDice::new());
    let tie = table.add(0, &catalog::academy_pilot(), Vec::new());
    let fired = Rc::new(std::cell::RefCell::new(0));
    let counter = Rc::clone(&fired);
    table
        .game
        .subscribe(tie, EventKind::STATS_CHANGED, move |_, _| *counter.borrow_mut() += 1)
        .unwrap();
    let before = table.roster.notifications.borrow().len();

    let id = table.game.add_pilot_skill_modifier(tie, Rc::new(|ps: &mut i32| *ps += 1)).unwrap();
    table.game.remove_pilot_skill_modifier(tie, id).unwrap();

    let notifications = table.roster.notifications.borrow();
    assert_eq!(notifications.len() - before, 2);
    assert_eq!(notifications[before].1.pilot_skill, 2);
    assert_eq!(notifications[before + 1].1.pilot_skill, 1);
    assert_eq!(*fired.borrow(), 2);
}

/// Test that combat order follows effective pilot skill.
#[test]
fn test_combat_order_uses_modifiers() {
    let mut table = Table::new(ScriptedDice::new());
    let chopper = table.add(0, &catalog::chopper(), Vec::new());
    let black = table.add(1, &catalog::black_squadron_pilot(), vec![catalog::veteran_instincts()]);
    let tie = table.add(1, &catalog::academy_pilot(), Vec::new());

    assert_eq!(table.game.combat_order(), vec![black, chopper, tie]);
}

// =============================================================================
// Stats and errors
// =============================================================================

/// Test change_stat clamps and reports the effective value.
#[test]
fn test_change_stat() {
    let mut table = Table::new(ScriptedDice::new());
    let tie = table.add(0, &catalog::academy_pilot(), vec![]);

    assert_eq!(table.game.change_stat(tie, Stat::Agility, -1).unwrap(), 2);
    assert_eq!(table.game.change_stat(tie, Stat::Agility, -10).unwrap(), 0);
    assert_eq!(table.game.change_stat(tie, Stat::Firepower, 1).unwrap(), 3);
    assert_eq!(
        table.game.change_stat(ShipId(9), Stat::Hull, 1),
        Err(EngineError::UnknownShip(ShipId(9)))
    );
}

/// Test token removal fires TOKEN_REMOVED only when a token was there.
#[test]
fn test_remove_token() {
    let mut table = Table::new(ScriptedDice::new());
    let tie = table.add(0, &catalog::academy_pilot(), Vec::new());
    let removed = Rc::new(std::cell::RefCell::new(0));
    let counter = Rc::clone(&removed);
    table
        .game
        .subscribe(tie, EventKind::TOKEN_REMOVED, move |_, _| *counter.borrow_mut() += 1)
        .unwrap();

    table
        .game
        .assign_token(rust_skirmish::ship::Token::new(TokenKind::Focus, tie), |_| {})
        .unwrap();
    assert!(table.game.remove_token(tie, TokenKind::Focus).unwrap());
    assert!(!table.game.remove_token(tie, TokenKind::Focus).unwrap());
    assert_eq!(*removed.borrow(), 1);
}

/// Test the combat phase boundary reaches ships in combat order and the
/// message history keeps the newest messages.
#[test]
fn test_end_combat_phase_and_messages() {
    let mut table = Table::new(ScriptedDice::new());
    let tie = table.add(0, &catalog::academy_pilot(), Vec::new());
    let rookie = table.add(1, &catalog::rookie_pilot(), Vec::new());
    let order = Rc::new(std::cell::RefCell::new(Vec::new()));
    for ship in [tie, rookie] {
        let order = Rc::clone(&order);
        table
            .game
            .subscribe(ship, EventKind::COMBAT_PHASE_END, move |_, event| order.borrow_mut().push(event.ship))
            .unwrap();
    }

    table.game.start_round().unwrap();
    table.game.start_combat_phase(|_| {}).unwrap();
    table.game.end_combat_phase(|game| game.show_info("combat over")).unwrap();

    assert_eq!(*order.borrow(), vec![rookie, tie]);
    assert_eq!(table.game.last_message().map(|m| m.text.as_str()), Some("combat over"));
    assert_eq!(table.game.phase(), rust_skirmish::game::Phase::Combat);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Repeated activation never installs more than the declared hooks.
    #[test]
    fn prop_activation_idempotent(ops in proptest::collection::vec(any::<bool>(), 1..24)) {
        let mut table = Table::new(ScriptedDice::new());
        let rebel = table.add(0, &catalog::lothal_rebel(), vec![catalog::gunner(), catalog::stealth_device()]);
        let gunner = AbilityRef::new(rebel, AbilityId::new(0));
        let stealth = AbilityRef::new(rebel, AbilityId::new(1));

        for activate in ops {
            for ability in [gunner, stealth] {
                if activate {
                    table.game.activate_ability(ability).unwrap();
                } else {
                    table.game.deactivate_ability(ability).unwrap();
                }
            }
            let ship = table.game.ship(rebel).unwrap();
            let expected = usize::from(activate);
            prop_assert_eq!(ship.bus().subscriber_count(EventKind::ATTACK_MISSED), expected);
            prop_assert_eq!(ship.bus().subscriber_count(EventKind::ROUND_END), expected);
            prop_assert_eq!(ship.bus().stat_hook_count(Stat::Agility), expected);
            prop_assert_eq!(ship.agility(), i32::from(activate));
        }
    }

    /// Floors hold whatever is done to the stored values.
    #[test]
    fn prop_stat_floors(deltas in proptest::collection::vec((0usize..4, -20i32..20), 0..32)) {
        let mut table = Table::new(ScriptedDice::new());
        let tie = table.add(0, &catalog::academy_pilot(), Vec::new());
        let stats = [Stat::MaxHull, Stat::MaxShields, Stat::Agility, Stat::PilotSkill];

        for (index, delta) in deltas {
            table.game.change_stat(tie, stats[index], delta).unwrap();
            let ship = table.game.ship(tie).unwrap();
            prop_assert!(ship.max_hull() >= 1);
            prop_assert!(ship.max_shields() >= 0);
            prop_assert!(ship.agility() >= 0);
            prop_assert!((0..=12).contains(&ship.pilot_skill()));
        }
    }
}
