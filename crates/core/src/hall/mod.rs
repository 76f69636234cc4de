// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! Contiguous-slot hall allocation
//!
//! [`Occupancy`] is the pure slot state with the first-fit scan; [`Hall`]
//! wraps it in a monitor with blocking allocation and broadcast wakeups.

mod monitor;
mod state;

pub use monitor::Hall;
pub use state::{Occupancy, OwnerTag};
