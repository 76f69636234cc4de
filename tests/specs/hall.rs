//! Hall allocation contracts under real contention.

use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use banquet_core::{Hall, MemorySink, StatusEvent};

/// Ranges claimed by concurrent allocations never overlap.
///
/// Each thread registers its range in a shared audit set right after
/// `allocate` returns and removes it just before `free`; any overlap at
/// registration is a mutual-exclusion violation.
#[test]
fn concurrent_allocations_never_overlap() {
    let hall = Arc::new(Hall::with_sink(32, MemorySink::new()).unwrap());
    let active: Arc<Mutex<Vec<(usize, usize)>>> = Arc::new(Mutex::new(Vec::new()));

    let mut handles = Vec::new();
    for party in 0..8usize {
        let hall = Arc::clone(&hall);
        let active = Arc::clone(&active);
        handles.push(thread::spawn(move || {
            let name = format!("p{party}");
            for round in 0..20usize {
                let width = 1 + (party + round) % 4;
                let start = hall.allocate(&name, width).unwrap();

                {
                    let mut active = active.lock().unwrap();
                    for &(s, w) in active.iter() {
                        let disjoint = start + width <= s || s + w <= start;
                        assert!(
                            disjoint,
                            "[{start}, {}) overlaps active [{s}, {})",
                            start + width,
                            s + w
                        );
                    }
                    active.push((start, width));
                }

                thread::sleep(Duration::from_millis(1));

                active
                    .lock()
                    .unwrap()
                    .retain(|&range| range != (start, width));
                hall.free(&name, start, width);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    // Everything was released.
    assert_eq!(hall.free_slots(), 32);
}

/// The deterministic first-fit scenario: capacity 10 with runs [1..4] and
/// [6..9] free must place a width-3 request at index 1.
#[test]
fn first_fit_returns_lowest_fitting_run() {
    let sink = MemorySink::new();
    let hall = Hall::with_sink(10, sink.clone()).unwrap();
    hall.allocate("x", 1).unwrap();
    hall.allocate("mid", 4).unwrap();
    hall.allocate("y", 1).unwrap();
    hall.free("mid", 1, 4);
    assert_eq!(hall.layout(), "x****y****");

    assert_eq!(hall.allocate("req", 3).unwrap(), 1);
    assert_eq!(hall.layout(), "xrrr*y****");
}

/// A blocked request completes only after the freeing call, and the claimed
/// slots are the newly freed ones.
#[test]
fn blocked_request_wakes_after_free() {
    let sink = MemorySink::new();
    let hall = Arc::new(Hall::with_sink(6, sink.clone()).unwrap());
    hall.allocate("a", 6).unwrap();

    let (tx, rx) = mpsc::channel();
    let waiter = {
        let hall = Arc::clone(&hall);
        thread::spawn(move || {
            let start = hall.allocate("b", 4).unwrap();
            tx.send(start).unwrap();
        })
    };

    thread::sleep(Duration::from_millis(50));
    assert!(rx.try_recv().is_err(), "allocate returned before any free");

    // A free that is too small does not unblock the waiter.
    hall.free("a", 0, 2);
    thread::sleep(Duration::from_millis(50));
    assert!(rx.try_recv().is_err(), "allocate returned on insufficient space");

    hall.free("a", 2, 4);
    let start = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(start, 0);
    waiter.join().unwrap();
}

/// Freed slots are reusable at once, whatever tag occupied them.
#[test]
fn free_clears_exactly_the_range() {
    let hall = Hall::with_sink(8, MemorySink::new()).unwrap();
    hall.allocate("aa", 4).unwrap();
    hall.allocate("bb", 4).unwrap();
    hall.free("zz", 2, 4);
    assert_eq!(hall.layout(), "aa****bb");
    assert_eq!(hall.allocate("cc", 4).unwrap(), 2);
}

/// Width equal to capacity succeeds immediately; one more never completes.
#[test]
fn capacity_boundary() {
    let hall = Hall::with_sink(5, MemorySink::new()).unwrap();
    assert_eq!(hall.allocate("all", 5).unwrap(), 0);
    hall.free("all", 0, 5);

    let oversized = hall
        .allocate_for("big", 6, Duration::from_millis(100))
        .unwrap();
    assert_eq!(oversized, None);
    assert_eq!(hall.free_slots(), 5);
}

/// Status lines are emitted while the lock is held: the layout carried by
/// each event is internally consistent with the claimed width.
#[test]
fn event_layouts_are_consistent_snapshots() {
    let sink = MemorySink::new();
    let hall = Arc::new(Hall::with_sink(16, sink.clone()).unwrap());

    let mut handles = Vec::new();
    for party in 0..4usize {
        let hall = Arc::clone(&hall);
        handles.push(thread::spawn(move || {
            let name = format!("w{party}");
            for _ in 0..10 {
                let start = hall.allocate(&name, 3).unwrap();
                hall.free(&name, start, 3);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let names: HashSet<&str> = ["w0", "w1", "w2", "w3"].into();
    for event in sink.events() {
        if let StatusEvent::SpaceAllocated {
            name,
            start,
            width,
            layout,
        } = event
        {
            assert!(names.contains(name.as_str()));
            let tag = name.chars().next().unwrap();
            let claimed: Vec<char> = layout.chars().skip(start).take(width).collect();
            assert!(
                claimed.iter().all(|&c| c == tag),
                "snapshot {layout} does not show {width} slots of `{tag}` at {start}"
            );
        }
    }
}
