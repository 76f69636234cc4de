// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! Status events emitted at state transitions
//!
//! Hall events carry a `layout` snapshot rendered while the monitor lock is
//! still held, so the reported occupancy cannot be invalidated before the
//! line is written.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Human-readable progress notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusEvent {
    /// A contiguous run of hall slots was claimed.
    SpaceAllocated {
        name: String,
        start: usize,
        width: usize,
        layout: String,
    },
    /// No fitting run exists yet; the caller is about to block.
    SpaceWaiting {
        name: String,
        width: usize,
        layout: String,
    },
    /// A run of hall slots was released.
    SpaceFreed {
        name: String,
        start: usize,
        width: usize,
        layout: String,
    },
    /// A worker holds its full appliance set and started cooking.
    Cooking { worker: String },
    /// A worker released its appliances and is resting.
    Resting { worker: String },
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEvent::SpaceAllocated { name, layout, .. } => {
                write!(f, "{name} allocated: {layout}")
            }
            StatusEvent::SpaceWaiting { name, layout, .. } => {
                write!(f, "{name} waiting: {layout}")
            }
            StatusEvent::SpaceFreed { name, layout, .. } => {
                write!(f, "{name} freed: {layout}")
            }
            StatusEvent::Cooking { worker } => write!(f, "{worker} is cooking"),
            StatusEvent::Resting { worker } => write!(f, "{worker} is resting"),
        }
    }
}

/// Destination for status events.
///
/// Emission happens inside the emitting component's critical section where
/// noted, so implementations must not call back into the component.
pub trait StatusSink: Send + Sync {
    fn emit(&self, event: StatusEvent);
}

/// Prints each event as one line on stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutSink;

impl StatusSink for StdoutSink {
    fn emit(&self, event: StatusEvent) {
        println!("{event}");
    }
}

/// Captures events in memory for test assertions.
///
/// Cloning shares the underlying buffer, so a test can keep one handle while
/// handing another to the component under test.
#[derive(Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<StatusEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Drain the captured events.
    pub fn take(&self) -> Vec<StatusEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl StatusSink for MemorySink {
    fn emit(&self, event: StatusEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
