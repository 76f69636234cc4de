// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! Blocking monitor over the hall occupancy
//!
//! All occupancy access happens inside the monitor's critical section, and
//! status events are emitted while the lock is still held so each carried
//! layout snapshot reflects a state that cannot change before the event is
//! delivered.

use std::time::{Duration, Instant};

use crate::error::ConfigError;
use crate::monitor::Monitor;
use crate::status::{StatusEvent, StatusSink, StdoutSink};

use super::state::{Occupancy, OwnerTag};

/// A hall of interchangeable slots allocated in contiguous runs.
///
/// `allocate` blocks until a fitting run exists; `free` releases a range and
/// wakes every blocked caller for re-evaluation. There is no fairness
/// guarantee among waiters: whichever re-scan runs first after a wake takes
/// the first fitting run.
pub struct Hall<S: StatusSink = StdoutSink> {
    monitor: Monitor<Occupancy>,
    sink: S,
}

impl Hall<StdoutSink> {
    /// Hall with `capacity` free slots, reporting on stdout.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_sink(capacity, StdoutSink)
    }
}

impl<S: StatusSink> Hall<S> {
    pub fn with_sink(capacity: usize, sink: S) -> Result<Self, ConfigError> {
        Ok(Self {
            monitor: Monitor::new(Occupancy::new(capacity)?),
            sink,
        })
    }

    pub fn capacity(&self) -> usize {
        self.monitor.with_lock(|occ| occ.capacity())
    }

    /// Current number of free slots (consistent snapshot).
    pub fn free_slots(&self) -> usize {
        self.monitor.with_lock(|occ| occ.free_slots())
    }

    /// Rendered occupancy snapshot: `*` per free slot, owner tag otherwise.
    pub fn layout(&self) -> String {
        self.monitor.with_lock(|occ| occ.render())
    }

    /// Reserve `width` contiguous slots for `name`, blocking until a fitting
    /// run exists. Returns the start index of the claimed run.
    ///
    /// First-fit: the lowest-index fitting run wins. A request wider than any
    /// run that will ever appear blocks forever; callers that need a bound
    /// use [`Hall::allocate_for`] or pre-validate against [`Hall::capacity`].
    pub fn allocate(&self, name: &str, width: usize) -> Result<usize, ConfigError> {
        let tag = validated(name, width)?;
        let mut guard = self.monitor.lock();
        if let Some(start) = guard.first_fit(width) {
            return Ok(self.commit(&mut guard, name, tag, start, width));
        }
        self.sink.emit(StatusEvent::SpaceWaiting {
            name: name.to_string(),
            width,
            layout: guard.render(),
        });
        loop {
            // Re-scan from scratch on every wake: a broadcast wakes all
            // waiters and only some will find a fit.
            guard = self
                .monitor
                .wait_until(guard, |occ| occ.first_fit(width).is_some());
            if let Some(start) = guard.first_fit(width) {
                return Ok(self.commit(&mut guard, name, tag, start, width));
            }
        }
    }

    /// Like [`Hall::allocate`], but gives up after `timeout`, returning
    /// `Ok(None)` with no slots claimed.
    pub fn allocate_for(
        &self,
        name: &str,
        width: usize,
        timeout: Duration,
    ) -> Result<Option<usize>, ConfigError> {
        let tag = validated(name, width)?;
        let mut guard = self.monitor.lock();
        if let Some(start) = guard.first_fit(width) {
            return Ok(Some(self.commit(&mut guard, name, tag, start, width)));
        }
        self.sink.emit(StatusEvent::SpaceWaiting {
            name: name.to_string(),
            width,
            layout: guard.render(),
        });
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let (next, fits) = self
                .monitor
                .wait_until_for(guard, remaining, |occ| occ.first_fit(width).is_some());
            guard = next;
            if !fits {
                tracing::debug!(name, width, "allocation timed out");
                return Ok(None);
            }
            if let Some(start) = guard.first_fit(width) {
                return Ok(Some(self.commit(&mut guard, name, tag, start, width)));
            }
        }
    }

    /// Release `[start, start + width)` unconditionally and wake all waiters.
    ///
    /// Trusted-caller contract: there is no check that `name` owns the range.
    /// Out-of-bounds ranges are clamped to the hall.
    pub fn free(&self, name: &str, start: usize, width: usize) {
        {
            let mut guard = self.monitor.lock();
            if start.saturating_add(width) > guard.capacity() {
                tracing::warn!(name, start, width, "free range clamped to hall bounds");
            }
            guard.clear(start, width);
            self.sink.emit(StatusEvent::SpaceFreed {
                name: name.to_string(),
                start,
                width,
                layout: guard.render(),
            });
        }
        // Every blocked allocate re-evaluates.
        self.monitor.notify_all();
    }

    fn commit(
        &self,
        occ: &mut Occupancy,
        name: &str,
        tag: OwnerTag,
        start: usize,
        width: usize,
    ) -> usize {
        occ.claim(tag, start, width);
        self.sink.emit(StatusEvent::SpaceAllocated {
            name: name.to_string(),
            start,
            width,
            layout: occ.render(),
        });
        tracing::debug!(name, start, width, "space allocated");
        start
    }
}

fn validated(name: &str, width: usize) -> Result<OwnerTag, ConfigError> {
    if width == 0 {
        return Err(ConfigError::InvalidWidth);
    }
    OwnerTag::from_name(name)
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
