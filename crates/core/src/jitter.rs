// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! Pause-duration jitter abstraction for testable timing

use rand::Rng;
use std::time::Duration;

/// Source of randomized pause durations for cook/rest intervals.
pub trait Jitter: Send + Sync {
    /// Stretch `base` into the actual pause duration.
    fn pause(&self, base: Duration) -> Duration;
}

/// Uniform jitter over `[base, 1.5 * base]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformJitter;

impl Jitter for UniformJitter {
    fn pause(&self, base: Duration) -> Duration {
        let stretch = rand::thread_rng().gen_range(1.0..=1.5);
        base.mul_f64(stretch)
    }
}

/// Returns `base` unchanged; keeps tests deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedJitter;

impl Jitter for FixedJitter {
    fn pause(&self, base: Duration) -> Duration {
        base
    }
}

#[cfg(test)]
#[path = "jitter_tests.rs"]
mod tests;
