//! No-hold-and-wait contracts for the kitchen crew.

use std::thread;
use std::time::{Duration, Instant};

use banquet_core::{FixedJitter, Kitchen, KitchenConfig, MemorySink, WorkerSpec};

fn overlapping_trio() -> KitchenConfig {
    let ms = Duration::from_millis;
    KitchenConfig::new(&["a", "b", "c"])
        .with_worker(WorkerSpec::new("ab", &["a", "b"], ms(1)))
        .with_worker(WorkerSpec::new("bc", &["b", "c"], ms(1)))
        .with_worker(WorkerSpec::new("ac", &["a", "c"], ms(1)))
        .with_rest_duration(ms(1))
}

/// Workers with pairwise-overlapping requirements never hold a partial set,
/// and every worker makes progress (no deadlock, no double-claim).
#[test]
fn overlapping_requirements_stay_all_or_nothing() {
    let mut kitchen = Kitchen::new(overlapping_trio(), MemorySink::new(), FixedJitter).unwrap();
    kitchen.start().unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut samples = 0usize;
    while Instant::now() < deadline && samples < 500 {
        let partial = kitchen.partial_holders();
        assert!(partial.is_empty(), "partial holds: {partial:?}");

        // One appliance, one holder: the board can never double-claim, but
        // check that each observed holder is one of the configured workers.
        for (_, holder) in kitchen.holders() {
            if let Some(name) = holder {
                assert!(["ab", "bc", "ac"].contains(&name.as_str()));
            }
        }
        samples += 1;
        thread::sleep(Duration::from_micros(200));
    }

    kitchen.stop();

    let counts = kitchen.dish_counts();
    for (name, count) in &counts {
        assert!(*count > 0, "{name} starved");
    }
}

/// All worker iterations complete in bounded time under full contention.
#[test]
fn full_contention_makes_progress() {
    let ms = Duration::from_millis;
    let config = KitchenConfig::new(&["solo"])
        .with_worker(WorkerSpec::new("one", &["solo"], ms(2)))
        .with_worker(WorkerSpec::new("two", &["solo"], ms(2)))
        .with_worker(WorkerSpec::new("three", &["solo"], ms(2)))
        .with_rest_duration(ms(1));
    let mut kitchen = Kitchen::new(config, MemorySink::new(), FixedJitter).unwrap();
    kitchen.start().unwrap();
    thread::sleep(Duration::from_millis(300));
    kitchen.stop();

    let counts = kitchen.dish_counts();
    let total: u64 = counts.values().sum();
    assert!(total > 0);
    for (name, count) in &counts {
        assert!(*count > 0, "{name} starved on the shared appliance");
    }
}

/// Stopping returns promptly even when workers are blocked in acquire, and
/// leaves every appliance released.
#[test]
fn stop_unblocks_waiting_workers() {
    let ms = Duration::from_millis;
    let config = KitchenConfig::new(&["solo"])
        .with_worker(WorkerSpec::new("holder", &["solo"], ms(100)))
        .with_worker(WorkerSpec::new("blocked", &["solo"], ms(100)))
        .with_rest_duration(ms(1));
    let mut kitchen = Kitchen::new(config, MemorySink::new(), FixedJitter).unwrap();
    kitchen.start().unwrap();

    // Let "holder" get to work so "blocked" is parked in acquire.
    thread::sleep(Duration::from_millis(20));
    let begun = Instant::now();
    kitchen.stop();

    assert!(begun.elapsed() < Duration::from_secs(2));
    assert!(kitchen.holders().iter().all(|(_, h)| h.is_none()));
}

/// Dish counts are keyed by worker name and survive stop.
#[test]
fn dish_counts_keyed_by_name() {
    let mut kitchen = Kitchen::new(overlapping_trio(), MemorySink::new(), FixedJitter).unwrap();
    kitchen.start().unwrap();
    thread::sleep(Duration::from_millis(50));
    kitchen.stop();

    let counts = kitchen.dish_counts();
    let mut names: Vec<_> = counts.keys().cloned().collect();
    names.sort();
    assert_eq!(names, vec!["ab", "ac", "bc"]);
}
