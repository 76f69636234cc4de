// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! Pure occupancy state for the hall

use crate::error::ConfigError;

/// Display tag identifying which owner occupies a slot.
///
/// Derived from the first character of the owner name; the rendered layout
/// uses `*` for a free slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OwnerTag(char);

impl OwnerTag {
    /// Tag for an owner name. The name must be non-empty.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        name.chars()
            .next()
            .map(Self)
            .ok_or(ConfigError::EmptyOwnerName)
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

/// Fixed-length sequence of slots, each free or tagged with its occupant.
///
/// Slots carry only the owner tag, not block boundaries: adjacent runs do not
/// merge identity, and a release must know its own `(start, width)`.
#[derive(Clone, Debug)]
pub struct Occupancy {
    slots: Vec<Option<OwnerTag>>,
}

impl Occupancy {
    /// All-free occupancy with `capacity` slots; capacity must be positive.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        Ok(Self {
            slots: vec![None; capacity],
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Lowest start index of a free run of at least `width` slots.
    ///
    /// Single left-to-right scan; the run counter resets at every occupied
    /// slot, so the first run to reach `width` wins. First-fit: ties are
    /// broken by position only.
    pub fn first_fit(&self, width: usize) -> Option<usize> {
        if width == 0 {
            return None;
        }
        let mut run = 0;
        let mut start = 0;
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.is_none() {
                if run == 0 {
                    start = i;
                }
                run += 1;
                if run == width {
                    return Some(start);
                }
            } else {
                run = 0;
            }
        }
        None
    }

    /// Tag `[start, start + width)` as occupied by `tag`.
    ///
    /// The range is clamped to the hall bounds.
    pub fn claim(&mut self, tag: OwnerTag, start: usize, width: usize) {
        for slot in self.range_mut(start, width) {
            *slot = Some(tag);
        }
    }

    /// Mark `[start, start + width)` free, whatever occupied it.
    ///
    /// No ownership check: the caller is trusted to pass its own range. The
    /// range is clamped to the hall bounds.
    pub fn clear(&mut self, start: usize, width: usize) {
        for slot in self.range_mut(start, width) {
            *slot = None;
        }
    }

    fn range_mut(&mut self, start: usize, width: usize) -> &mut [Option<OwnerTag>] {
        let len = self.slots.len();
        let start = start.min(len);
        let end = start.saturating_add(width).min(len);
        &mut self.slots[start..end]
    }

    pub fn free_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Length of the longest free run.
    pub fn largest_free_run(&self) -> usize {
        let mut best = 0;
        let mut run = 0;
        for slot in &self.slots {
            if slot.is_none() {
                run += 1;
                best = best.max(run);
            } else {
                run = 0;
            }
        }
        best
    }

    /// Occupant of the slot at `index`, if any.
    pub fn tag_at(&self, index: usize) -> Option<OwnerTag> {
        self.slots.get(index).copied().flatten()
    }

    /// One character per slot: `*` for free, the owner tag otherwise.
    pub fn render(&self) -> String {
        self.slots
            .iter()
            .map(|slot| slot.map_or('*', |tag| tag.as_char()))
            .collect()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
