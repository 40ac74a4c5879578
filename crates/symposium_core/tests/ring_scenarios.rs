//! # Ring Scenario Tests
//!
//! Deterministic walks through the grant protocol on a real table, one
//! step at a time and without actor threads.

use std::time::Duration;

use symposium_core::ActorState::{Active, Idle, Wanting};
use symposium_core::{any_eligible, StateStore, Table, TableConfig, WakeOutcome};

fn table(actors: u32) -> Table {
    Table::new(TableConfig::new(actors, Duration::ZERO, Duration::ZERO)).unwrap()
}

fn active_count(table: &Table) -> usize {
    table.snapshot().iter().filter(|&&s| s == Active).count()
}

#[test]
fn three_actors_request_together_and_take_turns() {
    let table = table(3);

    // all three get hungry "at once": the first to take the guard wins
    let granted: Vec<bool> = (0..3).map(|id| table.request(id)).collect();
    assert_eq!(granted, vec![true, false, false]);
    assert_eq!(table.snapshot(), vec![Active, Wanting, Wanting]);
    assert_eq!(table.await_grant(0), WakeOutcome::Granted);

    // in a ring of three everyone is adjacent: exactly one successor
    let handoff = table.release(0);
    assert_eq!(handoff.len(), 1);
    let next = handoff.iter().next().unwrap();
    assert_eq!(active_count(&table), 1);
    assert_eq!(table.await_grant(next), WakeOutcome::Granted);

    let handoff = table.release(next);
    assert_eq!(handoff.len(), 1);
    let last = handoff.iter().next().unwrap();
    assert_ne!(last, next);
    assert_ne!(last, 0);
    assert_eq!(table.await_grant(last), WakeOutcome::Granted);

    assert!(table.release(last).is_empty());
    assert_eq!(table.snapshot(), vec![Idle, Idle, Idle]);
    assert_eq!(table.frame().meals, vec![1, 1, 1]);
    for id in 0..3 {
        assert_eq!(table.channel(id).pending(), 0);
    }
}

#[test]
fn three_actors_release_order_follows_left_then_right() {
    let table = table(3);
    for id in 0..3 {
        table.request(id);
    }
    let _ = table.await_grant(0);

    // left(0) = 2 is tested first and wins
    let handoff = table.release(0);
    assert!(handoff.contains(2));
    assert_eq!(table.snapshot(), vec![Idle, Wanting, Active]);
}

#[test]
fn single_actor_is_not_blocked_by_itself() {
    let table = table(1);
    for round in 1..=3 {
        assert!(table.request(0));
        assert_eq!(table.await_grant(0), WakeOutcome::Granted);
        assert_eq!(table.snapshot(), vec![Active]);
        assert!(table.release(0).is_empty());
        assert_eq!(table.frame().meals, vec![round]);
    }
}

#[test]
fn pair_alternates() {
    let table = table(2);
    assert!(table.request(0));
    assert!(!table.request(1));
    let _ = table.await_grant(0);

    let handoff = table.release(0);
    assert_eq!(handoff.iter().collect::<Vec<_>>(), vec![1]);
    assert_eq!(table.channel(1).pending(), 1);

    assert!(!table.request(0));
    let _ = table.await_grant(1);
    assert!(table.release(1).contains(0));
    assert_eq!(table.snapshot(), vec![Active, Idle]);
}

#[test]
fn five_actors_non_adjacent_pairs_eat_together() {
    let table = table(5);
    assert!(table.request(0));
    assert!(table.request(2));
    assert!(!table.request(1));
    assert!(!table.request(3));
    assert!(!table.request(4));
    assert_eq!(active_count(&table), 2);

    let _ = table.await_grant(2);
    // 3's other neighbor is only wanting, so 3 goes
    let handoff = table.release(2);
    assert!(handoff.contains(3));
    // 1 stays blocked by 0
    assert!(!handoff.contains(1));
    assert_eq!(table.snapshot(), vec![Active, Wanting, Idle, Active, Wanting]);
}

#[test]
fn all_wanting_never_deadlocks() {
    for len in [1usize, 2, 3, 5, 8] {
        let store = StateStore::from_states(&vec![Wanting; len]);
        assert!(any_eligible(&store), "ring of {len} is stuck");

        // and on a live table, someone always gets through
        let table = table(u32::try_from(len).unwrap());
        let granted = (0..len).filter(|&id| table.request(id)).count();
        assert!(granted >= 1);
        assert!(granted <= len.div_ceil(2).max(1));
    }
}

#[test]
fn destroy_after_cycles_reports_final_frame() {
    let table = std::sync::Arc::new(table(4));
    for id in [0, 2, 1, 3] {
        if table.acquire(id) == WakeOutcome::Granted {
            table.release(id);
        }
    }
    let frame = Table::destroy(table).unwrap();
    assert_eq!(frame.states, vec![Idle; 4]);
    assert_eq!(frame.total_meals(), 4);
}
