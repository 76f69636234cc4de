// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! Shared kitchen state guarded by the crew monitor

/// Availability of each appliance, tracked by holder.
///
/// `None` means available. Tracking the holding worker rather than a plain
/// flag lets observers audit that no appliance is ever double-claimed.
#[derive(Clone, Debug)]
pub struct ApplianceBoard {
    holders: Vec<Option<usize>>,
}

impl ApplianceBoard {
    pub fn new(appliance_count: usize) -> Self {
        Self {
            holders: vec![None; appliance_count],
        }
    }

    /// True when every appliance in `required` is available.
    pub fn all_available(&self, required: &[usize]) -> bool {
        required
            .iter()
            .all(|&a| self.holders.get(a).is_some_and(|h| h.is_none()))
    }

    /// Claim every appliance in `required` for `worker`, or none of them.
    ///
    /// Check and commit happen in this single call, inside the caller's
    /// critical section; a worker can never be observed holding a strict
    /// non-empty subset of its required set.
    pub fn take_all(&mut self, worker: usize, required: &[usize]) -> bool {
        if !self.all_available(required) {
            return false;
        }
        for &a in required {
            if let Some(slot) = self.holders.get_mut(a) {
                *slot = Some(worker);
            }
        }
        true
    }

    /// Release every appliance in `required` that `worker` holds.
    pub fn release_all(&mut self, worker: usize, required: &[usize]) {
        for &a in required {
            if let Some(slot) = self.holders.get_mut(a) {
                if *slot == Some(worker) {
                    *slot = None;
                }
            }
        }
    }

    /// Current holder of each appliance, by worker index.
    pub fn holders(&self) -> &[Option<usize>] {
        &self.holders
    }

    /// Number of appliances `worker` currently holds.
    pub fn held_by(&self, worker: usize) -> usize {
        self.holders.iter().filter(|h| **h == Some(worker)).count()
    }
}

/// Board plus per-worker completed-dish counters.
///
/// Counters are bumped inside the release critical section, so a count
/// snapshot always agrees with the board it was taken with.
#[derive(Clone, Debug)]
pub struct KitchenState {
    pub board: ApplianceBoard,
    pub dishes: Vec<u64>,
}

impl KitchenState {
    pub fn new(appliance_count: usize, worker_count: usize) -> Self {
        Self {
            board: ApplianceBoard::new(appliance_count),
            dishes: vec![0; worker_count],
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
