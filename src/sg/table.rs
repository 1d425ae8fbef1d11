//! Fixed-capacity scatter table.

use super::ScatterSegment;
use crate::driver::error::{CapacityError, CapacityResult};

/// Fixed-capacity scatter-gather table.
///
/// Slots fill from the front; the first `len` slots are occupied and the
/// rest are free. An end marker may shorten the usable table below `N`.
///
/// # Type Parameters
/// * `N` - Number of slots
#[derive(Debug, Clone)]
pub struct ScatterTable<const N: usize> {
    /// Segment slots
    slots: [ScatterSegment; N],
    /// Occupied slot count
    len: usize,
    /// Usable slot count (end marker)
    limit: usize,
}

impl<const N: usize> ScatterTable<N> {
    /// Create an empty table. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [ScatterSegment::new(0, 0); N],
            len: 0,
            limit: N,
        }
    }

    /// Total number of slots
    #[inline(always)]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of occupied slots
    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if no slot is occupied
    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the first free slot, if any.
    #[must_use]
    pub fn first_free(&self) -> Option<usize> {
        (self.len < self.limit).then_some(self.len)
    }

    /// Occupied slots as a scatter list
    #[must_use]
    pub fn as_slice(&self) -> &[ScatterSegment] {
        &self.slots[..self.len]
    }

    /// Segment at `index`, if occupied
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ScatterSegment> {
        self.as_slice().get(index)
    }

    /// Total bytes described by the occupied slots
    #[must_use]
    pub fn total_length(&self) -> usize {
        super::total_length(self.as_slice())
    }

    /// Append one segment into the first free slot. Returns the slot index.
    pub fn push(&mut self, segment: ScatterSegment) -> CapacityResult<usize> {
        let idx = self.first_free().ok_or(CapacityError::NoFreeSlot)?;
        self.slots[idx] = segment;
        self.len += 1;
        Ok(idx)
    }

    /// Graft segments from `source` into the free slots, clipped to `max_len`
    /// bytes in total.
    ///
    /// Copies while free slots, source segments and budget all remain; a
    /// segment larger than the remaining budget is clipped to it. Returns the
    /// index of the last slot written, or `None` if nothing was written
    /// (empty source or zero budget). Fails only when the table has no free
    /// slot at all.
    pub fn append(
        &mut self,
        source: &[ScatterSegment],
        max_len: usize,
    ) -> CapacityResult<Option<usize>> {
        let mut idx = self.first_free().ok_or(CapacityError::NoFreeSlot)?;
        let mut remaining = max_len;
        let mut last = None;

        for segment in source {
            if idx >= self.limit || remaining == 0 {
                break;
            }

            let clipped = segment.clipped(remaining);
            self.slots[idx] = clipped;
            last = Some(idx);
            remaining -= clipped.length;
            idx += 1;
        }

        self.len = idx;
        Ok(last)
    }

    /// Mark `index` as the last usable slot.
    ///
    /// Slots after the marker are dropped from the list and no longer
    /// accept segments until [`clear`](Self::clear).
    pub fn mark_end(&mut self, index: usize) {
        let limit = core::cmp::min(index.saturating_add(1), N);
        self.limit = limit;
        self.len = core::cmp::min(self.len, limit);
    }

    /// Drop every segment and the end marker.
    pub fn clear(&mut self) {
        self.len = 0;
        self.limit = N;
    }
}

impl<const N: usize> Default for ScatterTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
