//! Capacity-bounded waypoint memory.
//!
//! `M` and `W` commands program a flat list of raw 3-digit fields. The
//! interpretation (time, azimuth, elevation interleavings) depends on the
//! command shape, so the memory stores plain `u16` values and leaves the
//! meaning to the caller.

use std::slice;

/// Number of values the rotator can memorize.
pub const MEMORY_CAPACITY: usize = 3800;

/// Returned by [`WaypointMemory::push`] once the memory is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("waypoint memory full ({capacity} values)")]
pub struct CapacityExceeded {
    pub capacity: usize,
}

/// Ordered list of at most [`MEMORY_CAPACITY`] values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaypointMemory {
    values: Vec<u16>,
}

impl WaypointMemory {
    /// Create an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a memory from a slice, failing if it exceeds the capacity.
    pub fn from_values(values: &[u16]) -> Result<Self, CapacityExceeded> {
        if values.len() > MEMORY_CAPACITY {
            return Err(CapacityExceeded {
                capacity: MEMORY_CAPACITY,
            });
        }
        Ok(Self {
            values: values.to_vec(),
        })
    }

    /// Append a value.
    pub fn push(&mut self, value: u16) -> Result<(), CapacityExceeded> {
        if self.is_full() {
            return Err(CapacityExceeded {
                capacity: MEMORY_CAPACITY,
            });
        }
        self.values.push(value);
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        MEMORY_CAPACITY
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() >= MEMORY_CAPACITY
    }

    pub fn first(&self) -> Option<u16> {
        self.values.first().copied()
    }

    pub fn get(&self, index: usize) -> Option<u16> {
        self.values.get(index).copied()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.values
    }

    pub fn iter(&self) -> slice::Iter<'_, u16> {
        self.values.iter()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<'a> IntoIterator for &'a WaypointMemory {
    type Item = &'a u16;
    type IntoIter = slice::Iter<'a, u16>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
