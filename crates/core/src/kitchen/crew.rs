// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! Worker threads sharing the appliance board
//!
//! One OS thread per worker runs a cook/rest loop. The acquire step is
//! all-or-nothing inside a single critical section; releases broadcast so
//! every blocked worker re-evaluates its own requirement.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::KitchenError;
use crate::jitter::Jitter;
use crate::monitor::Monitor;
use crate::status::{StatusEvent, StatusSink};

use super::spec::KitchenConfig;
use super::state::KitchenState;

/// Worker spec with appliance names resolved to board indices.
#[derive(Clone, Debug)]
struct ResolvedWorker {
    name: String,
    required: Vec<usize>,
    base_duration: Duration,
}

/// State shared between the controller and every worker thread.
struct Shared<S, J> {
    monitor: Monitor<KitchenState>,
    workers: Vec<ResolvedWorker>,
    appliances: Vec<String>,
    rest_duration: Duration,
    running: AtomicBool,
    sink: S,
    jitter: J,
}

/// Outcome of the acquire-all step.
enum Acquire {
    Acquired,
    ShuttingDown,
}

/// A crew of worker threads, each cooking only while holding its full
/// appliance set.
pub struct Kitchen<S: StatusSink, J: Jitter> {
    shared: Arc<Shared<S, J>>,
    handles: Vec<JoinHandle<()>>,
}

impl<S: StatusSink, J: Jitter> Kitchen<S, J> {
    /// Validate `config` and build an idle kitchen.
    pub fn new(config: KitchenConfig, sink: S, jitter: J) -> Result<Self, KitchenError> {
        config.validate()?;
        let workers: Vec<ResolvedWorker> = config
            .workers
            .iter()
            .map(|w| {
                let mut required: Vec<usize> = w
                    .appliances
                    .iter()
                    .filter_map(|a| config.appliance_index(a))
                    .collect();
                required.sort_unstable();
                required.dedup();
                ResolvedWorker {
                    name: w.name.clone(),
                    required,
                    base_duration: w.base_duration,
                }
            })
            .collect();
        let worker_count = workers.len();
        Ok(Self {
            shared: Arc::new(Shared {
                monitor: Monitor::new(KitchenState::new(config.appliances.len(), worker_count)),
                workers,
                appliances: config.appliances,
                rest_duration: config.rest_duration,
                running: AtomicBool::new(false),
                sink,
                jitter,
            }),
            handles: Vec::new(),
        })
    }

    /// Whether worker threads are active.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Ask every worker to finish its current interval, then join them.
    ///
    /// Cooperative: a worker mid-cook or mid-rest completes the interval
    /// before observing the cleared flag; a worker blocked in acquire wakes,
    /// claims nothing, and exits. Idempotent.
    pub fn stop(&mut self) {
        self.shared.running.store(false, Ordering::SeqCst);
        // Wake workers blocked in acquire so they observe shutdown.
        self.shared.monitor.notify_all();
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                tracing::warn!("worker thread panicked");
            }
        }
    }

    /// Completed dishes per worker name (consistent snapshot).
    pub fn dish_counts(&self) -> HashMap<String, u64> {
        self.shared.monitor.with_lock(|state| {
            self.shared
                .workers
                .iter()
                .zip(&state.dishes)
                .map(|(w, &count)| (w.name.clone(), count))
                .collect()
        })
    }

    /// Current holder of each appliance: `(appliance, worker)`.
    ///
    /// Taken in one critical section, so a partial acquisition can never be
    /// observed here.
    pub fn holders(&self) -> Vec<(String, Option<String>)> {
        self.shared.monitor.with_lock(|state| {
            self.shared
                .appliances
                .iter()
                .zip(state.board.holders())
                .map(|(appliance, holder)| {
                    let name = holder
                        .and_then(|w| self.shared.workers.get(w))
                        .map(|w| w.name.clone());
                    (appliance.clone(), name)
                })
                .collect()
        })
    }

    /// Workers currently holding a non-empty strict subset of their required
    /// appliances. Always empty while acquisition is all-or-nothing.
    pub fn partial_holders(&self) -> Vec<String> {
        self.shared.monitor.with_lock(|state| {
            self.shared
                .workers
                .iter()
                .enumerate()
                .filter(|(i, w)| {
                    let held = state.board.held_by(*i);
                    held > 0 && held < w.required.len()
                })
                .map(|(_, w)| w.name.clone())
                .collect()
        })
    }
}

impl<S, J> Kitchen<S, J>
where
    S: StatusSink + 'static,
    J: Jitter + 'static,
{
    /// Spawn one named thread per worker.
    ///
    /// A repeated call while already running is a no-op.
    pub fn start(&mut self) -> Result<(), KitchenError> {
        if self.shared.running.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        for index in 0..self.shared.workers.len() {
            let shared = Arc::clone(&self.shared);
            let name = self.shared.workers[index].name.clone();
            let handle = match thread::Builder::new()
                .name(name.clone())
                .spawn(move || worker_loop(&shared, index))
            {
                Ok(handle) => handle,
                Err(source) => {
                    // Unwind the workers already spawned.
                    self.stop();
                    return Err(KitchenError::Spawn {
                        worker: name,
                        source,
                    });
                }
            };
            self.handles.push(handle);
        }
        tracing::info!(workers = self.shared.workers.len(), "kitchen started");
        Ok(())
    }
}

impl<S: StatusSink, J: Jitter> Drop for Kitchen<S, J> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn worker_loop<S: StatusSink, J: Jitter>(shared: &Shared<S, J>, index: usize) {
    let worker = &shared.workers[index];
    while shared.running.load(Ordering::SeqCst) {
        match acquire_all(shared, index) {
            Acquire::ShuttingDown => break,
            Acquire::Acquired => {}
        }

        // Cook outside the lock, holding the full appliance set.
        shared.sink.emit(StatusEvent::Cooking {
            worker: worker.name.clone(),
        });
        thread::sleep(shared.jitter.pause(worker.base_duration));

        // Release everything, count the dish, then wake all waiters.
        shared.monitor.with_lock(|state| {
            state.board.release_all(index, &worker.required);
            state.dishes[index] += 1;
        });
        shared.monitor.notify_all();

        shared.sink.emit(StatusEvent::Resting {
            worker: worker.name.clone(),
        });
        thread::sleep(shared.jitter.pause(shared.rest_duration));
    }
    tracing::debug!(worker = %worker.name, "worker exiting");
}

fn acquire_all<S: StatusSink, J: Jitter>(shared: &Shared<S, J>, index: usize) -> Acquire {
    let required = &shared.workers[index].required;
    let mut guard = shared.monitor.lock();
    loop {
        if !shared.running.load(Ordering::SeqCst) {
            return Acquire::ShuttingDown;
        }
        // Check and commit in the same critical section: the whole set is
        // claimed at once or not at all.
        if guard.board.take_all(index, required) {
            return Acquire::Acquired;
        }
        guard = shared.monitor.wait_until(guard, |state| {
            !shared.running.load(Ordering::SeqCst) || state.board.all_available(required)
        });
    }
}

#[cfg(test)]
#[path = "crew_tests.rs"]
mod tests;
