// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! Monitor primitive: one mutex plus one condition variable
//!
//! All waiters share the single condition variable, so wakeups are always
//! broadcast ([`Monitor::notify_all`]); distinct predicates may be waiting on
//! the same condvar, and a targeted wake is not generally identifiable. A
//! woken thread must re-check its own predicate, which [`Monitor::wait_until`]
//! does in a loop.

use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// A monitor guarding shared state `T`.
pub struct Monitor<T> {
    state: Mutex<T>,
    cond: Condvar,
}

impl<T> Monitor<T> {
    pub fn new(state: T) -> Self {
        Self {
            state: Mutex::new(state),
            cond: Condvar::new(),
        }
    }

    /// Enter the critical section.
    ///
    /// A poisoned mutex is recovered rather than propagated: every mutation
    /// of the guarded state happens in a short critical section that leaves
    /// it consistent.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` inside the critical section; the lock is released on every
    /// exit path, including early return.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    /// Suspend the calling thread until `pred` holds.
    ///
    /// Re-checks `pred` after every wakeup: a broadcast wakes all waiters and
    /// only some will find their predicate true, and spurious wakeups are
    /// possible besides.
    pub fn wait_until<'a>(
        &self,
        mut guard: MutexGuard<'a, T>,
        pred: impl Fn(&T) -> bool,
    ) -> MutexGuard<'a, T> {
        while !pred(&guard) {
            guard = self.cond.wait(guard).unwrap_or_else(|e| e.into_inner());
        }
        guard
    }

    /// Bounded [`Monitor::wait_until`]: gives up once `timeout` elapses.
    ///
    /// Returns the guard plus whether the predicate held when the wait ended.
    pub fn wait_until_for<'a>(
        &self,
        mut guard: MutexGuard<'a, T>,
        timeout: Duration,
        pred: impl Fn(&T) -> bool,
    ) -> (MutexGuard<'a, T>, bool) {
        let deadline = Instant::now() + timeout;
        loop {
            if pred(&guard) {
                return (guard, true);
            }
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return (guard, false);
            };
            let (next, _) = self
                .cond
                .wait_timeout(guard, remaining)
                .unwrap_or_else(|e| e.into_inner());
            guard = next;
        }
    }

    /// Wake every waiter for predicate re-evaluation.
    pub fn notify_all(&self) {
        self.cond.notify_all();
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
