// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! No-hold-and-wait appliance sharing
//!
//! A fixed roster of workers each needs a fixed subset of shared appliances.
//! Acquisition is all-or-nothing within one critical section, so no worker
//! ever holds a partial set and circular wait cannot form.

mod crew;
mod spec;
mod state;

pub use crew::Kitchen;
pub use spec::{KitchenConfig, WorkerSpec};
pub use state::{ApplianceBoard, KitchenState};
