// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! banquet-core: blocking resource coordination for one process
//!
//! This crate provides:
//! - A monitor primitive (mutex + condition variable + predicate waits)
//! - A hall: fixed-capacity contiguous-slot allocator with blocking first-fit
//! - A kitchen: a crew of workers sharing appliances under a strict
//!   no-hold-and-wait discipline
//! - Status events emitted at state transitions, with pluggable sinks

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod error;
pub mod hall;
pub mod jitter;
pub mod kitchen;
pub mod monitor;
pub mod status;

// Re-exports
pub use error::{ConfigError, KitchenError};
pub use hall::{Hall, Occupancy, OwnerTag};
pub use jitter::{FixedJitter, Jitter, UniformJitter};
pub use kitchen::{ApplianceBoard, Kitchen, KitchenConfig, KitchenState, WorkerSpec};
pub use monitor::Monitor;
pub use status::{MemorySink, StatusEvent, StatusSink, StdoutSink};
