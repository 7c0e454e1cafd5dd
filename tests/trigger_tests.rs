//! Trigger system integration tests.
//!
//! These run the queue inside a real `Game`: triggers registered from ship
//! event handlers, resolved at phase boundaries, recorded in the
//! resolution log.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::Table;
use proptest::prelude::*;
use rust_skirmish::catalog;
use rust_skirmish::combat::ScriptedDice;
use rust_skirmish::core::{EngineError, GameConfig, PlayerId, TieBreak};
use rust_skirmish::events::EventKind;
use rust_skirmish::game::{Game, Phase, Position};
use rust_skirmish::triggers::{in_sequence, register, resolve, Completion, ResolutionLog, Trigger};

const CUSTOM: EventKind = EventKind::custom(1);

type Log = Rc<RefCell<Vec<String>>>;

fn logging_trigger(name: &'static str, log: &Log) -> Trigger<Game> {
    let log = Rc::clone(log);
    Trigger::new(name, CUSTOM, move |game: &mut Game, done: Completion| {
        log.borrow_mut().push(format!("start {name}"));
        log.borrow_mut().push(format!("finish {name}"));
        done.finish(game);
    })
}

/// Test that a lower priority value starts and finishes first.
#[test]
fn test_priority_order() {
    let mut table = Table::new(ScriptedDice::new());
    let log: Log = Rc::default();

    register(&mut table.game, logging_trigger("T1", &log).with_priority(2));
    register(&mut table.game, logging_trigger("T2", &log).with_priority(1));
    resolve(&mut table.game, CUSTOM, |_| {});

    assert_eq!(
        *log.borrow(),
        vec!["start T2", "finish T2", "start T1", "finish T1"]
    );
}

/// Test seat-order tie-breaking from the game configuration.
#[test]
fn test_seat_order_from_config() {
    let config = GameConfig::new(3).with_tie_break(TieBreak::SeatOrder { first: PlayerId::new(2) });
    let mut game = Game::new(config);
    let log: Log = Rc::default();

    register(&mut game, logging_trigger("p0", &log).with_owner(PlayerId::new(0)));
    register(&mut game, logging_trigger("p1", &log).with_owner(PlayerId::new(1)));
    register(&mut game, logging_trigger("p2", &log).with_owner(PlayerId::new(2)));
    resolve(&mut game, CUSTOM, |_| {});

    assert_eq!(game.triggers().log().started(), vec!["p2", "p0", "p1"]);
}

/// Test that triggers registered from handlers during a phase boundary
/// resolve before the phase continues.
#[test]
fn test_handlers_register_for_boundary() {
    let mut table = Table::new(ScriptedDice::new());
    let ships: Vec<_> = (0..3)
        .map(|i| table.add(i % 2, &catalog::academy_pilot(), Vec::new()))
        .collect();
    let log: Log = Rc::default();

    for &ship in &ships {
        let log = Rc::clone(&log);
        table
            .game
            .subscribe(ship, EventKind::ROUND_START, move |game: &mut Game, event| {
                let log = Rc::clone(&log);
                let label = event.ship.to_string();
                register(
                    game,
                    Trigger::new(label.clone(), EventKind::ROUND_START, move |game: &mut Game, done: Completion| {
                        log.borrow_mut().push(label);
                        done.finish(game);
                    }),
                );
            })
            .unwrap();
    }

    table.game.start_round().unwrap();
    assert_eq!(*log.borrow(), vec!["Ship(0)", "Ship(1)", "Ship(2)"]);
    assert!(table.game.triggers().is_empty());
}

/// Test that identical games produce byte-identical resolution logs.
#[test]
fn test_resolution_log_replays() {
    fn play() -> Vec<u8> {
        let mut table = Table::new(ScriptedDice::new());
        let chopper = table.add(0, &catalog::chopper(), Vec::new());
        let rebel = table.add(0, &catalog::lothal_rebel(), vec![catalog::gunner()]);
        let a = table.add(1, &catalog::academy_pilot(), Vec::new());
        let b = table.add(1, &catalog::rookie_pilot(), Vec::new());

        table.game.start_round().unwrap();
        table.game.record_bump(a, chopper).unwrap();
        table.game.record_bump(b, chopper).unwrap();
        table.game.start_combat_phase(|_| {}).unwrap();
        table.game.declare_attack(rebel, a, 0, |_| {}).unwrap();
        table.game.end_round().unwrap();
        table.game.take_resolution_log().encode().unwrap()
    }

    let first = play();
    let second = play();
    assert_eq!(first, second);

    let log = ResolutionLog::decode(&first).unwrap();
    assert!(log.started().contains(&"\"Chopper\""));
    assert!(log.started().contains(&"Gunner"));
}

/// Test seeded dice give identical outcomes for the same seed.
#[test]
fn test_seeded_games_agree() {
    fn hull_after_attack(seed: u64) -> i32 {
        let mut game = Game::new(GameConfig::new(2).with_seed(seed));
        let rebel = game
            .add_ship(PlayerId::new(0), &catalog::lothal_rebel(), Vec::new(), Position::default())
            .unwrap();
        let x = game
            .add_ship(PlayerId::new(1), &catalog::rookie_pilot(), Vec::new(), Position::default())
            .unwrap();
        game.start_round().unwrap();
        game.declare_attack(rebel, x, 0, |_| {}).unwrap();
        let ship = game.ship(x).unwrap();
        ship.hull() + ship.shields()
    }

    assert_eq!(hull_after_attack(11), hull_after_attack(11));
}

/// Test that a trigger queued for a kind the engine only emits blocks the
/// next boundary until the caller resolves that kind.
#[test]
fn test_stranded_trigger_blocks_boundary() {
    let mut table = Table::new(ScriptedDice::new());
    let rebel = table.add(0, &catalog::lothal_rebel(), Vec::new());
    let tie = table.add(1, &catalog::academy_pilot(), Vec::new());
    let log: Log = Rc::default();

    let seen = Rc::clone(&log);
    table
        .game
        .subscribe(rebel, EventKind::ATTACK_MISSED, move |game: &mut Game, _| {
            let seen = Rc::clone(&seen);
            register(
                game,
                Trigger::new("Regroup", EventKind::ATTACK_MISSED, move |game: &mut Game, done: Completion| {
                    seen.borrow_mut().push("regroup".to_string());
                    done.finish(game);
                }),
            );
        })
        .unwrap();

    table.game.start_round().unwrap();
    table.game.declare_attack(rebel, tie, 0, |_| {}).unwrap();

    let stranded = Err(EngineError::UnresolvedTriggers { kind: EventKind::ATTACK_MISSED, count: 1 });
    assert_eq!(table.game.end_round(), stranded);
    assert_eq!(table.game.end_combat_phase(|_| {}), stranded);
    assert!(log.borrow().is_empty());

    resolve(&mut table.game, EventKind::ATTACK_MISSED, |_| {});
    assert_eq!(*log.borrow(), vec!["regroup"]);
    table.game.end_round().unwrap();
    assert_eq!(table.game.phase(), Phase::End);
}

/// Test that the round only ends once its ROUND_END triggers finish.
#[test]
fn test_round_end_waits_for_triggers() {
    let mut table = Table::new(ScriptedDice::new());
    let chopper = table.add(0, &catalog::chopper(), Vec::new());
    let tie = table.add(1, &catalog::academy_pilot(), Vec::new());
    table
        .game
        .subscribe(tie, EventKind::ROUND_END, |game: &mut Game, _| {
            register(
                game,
                Trigger::new("Debrief", EventKind::ROUND_END, |game: &mut Game, done: Completion| {
                    game.request_decision(
                        PlayerId::new(1),
                        "Debrief",
                        vec!["Ok".into(), "Later".into()],
                        move |game: &mut Game, _| done.finish(game),
                    );
                }),
            );
        })
        .unwrap();

    table.game.start_round().unwrap();
    table.game.record_bump(tie, chopper).unwrap();
    table.game.end_round().unwrap();

    assert_eq!(table.game.phase(), Phase::Activation);
    assert_eq!(table.game.ship(tie).unwrap().bumped(), &[chopper]);

    table.game.decide(PlayerId::new(1), 0).unwrap();
    assert_eq!(table.game.phase(), Phase::End);
    assert!(table.game.ship(tie).unwrap().bumped().is_empty());
}

/// Test that the resolution log stays within the configured cap.
#[test]
fn test_resolution_log_capped() {
    let mut game = Game::new(GameConfig::new(2).with_resolution_log_limit(16));
    let log: Log = Rc::default();
    for _ in 0..20 {
        register(&mut game, logging_trigger("t", &log));
        resolve(&mut game, CUSTOM, |_| {});
    }

    assert!(game.triggers().log().len() <= 16);
    assert!(game.triggers().log().dropped() > 0);
    assert_eq!(log.borrow().len(), 40, "every trigger still ran");

    let taken = game.take_resolution_log();
    assert!(!taken.is_empty());
    assert!(game.triggers().log().is_empty());
}

proptest! {
    /// Fan-out over K items runs K steps and one trailing completion.
    #[test]
    fn prop_fan_out_counts(k in 0usize..16) {
        let mut game = Game::new(GameConfig::default());
        let steps = Rc::new(RefCell::new(Vec::new()));
        let completions = Rc::new(RefCell::new(0));

        let seen = Rc::clone(&steps);
        let done = Rc::clone(&completions);
        in_sequence(
            &mut game,
            0..k,
            move |game: &mut Game, item, next| {
                seen.borrow_mut().push(item);
                next(game);
            },
            move |_: &mut Game| *done.borrow_mut() += 1,
        );

        prop_assert_eq!(steps.borrow().clone(), (0..k).collect::<Vec<_>>());
        prop_assert_eq!(*completions.borrow(), 1);
    }

    /// Drain order is priority ascending, then registration order.
    #[test]
    fn prop_drain_order(priorities in proptest::collection::vec(-3i32..3, 0..12)) {
        let mut game = Game::new(GameConfig::default());
        let order = Rc::new(RefCell::new(Vec::new()));
        for (index, priority) in priorities.iter().enumerate() {
            let order = Rc::clone(&order);
            register(
                &mut game,
                Trigger::new(format!("t{index}"), CUSTOM, move |game: &mut Game, done: Completion| {
                    order.borrow_mut().push(index);
                    done.finish(game);
                })
                .with_priority(*priority),
            );
        }
        resolve(&mut game, CUSTOM, |_| {});

        let mut expected: Vec<usize> = (0..priorities.len()).collect();
        expected.sort_by_key(|&i| (priorities[i], i));
        prop_assert_eq!(order.borrow().clone(), expected);
    }
}
