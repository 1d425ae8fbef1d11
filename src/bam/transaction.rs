//! Command script accumulator.

use super::element::CommandElement;
use crate::driver::error::{CapacityError, CapacityResult};
use crate::internal::constants::{DEFAULT_CMD_ELEMENTS, DEFAULT_CMD_SEGMENTS};
use crate::sg::ScatterSegment;

/// Span of contiguous command elements forming one scatter segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct CommandSpan {
    /// Index of the first element
    start: usize,
    /// Number of elements
    count: usize,
}

/// Fixed-capacity command script for one crypto operation.
///
/// Allocated once per device and reused: [`reset`](Self::reset) rewinds the
/// cursors but keeps the storage. Element contents past the cursor are stale
/// and are overwritten by the next operation.
///
/// Bus segments are resolved from element spans at submission time, so the
/// transaction may be moved between operations.
///
/// # Type Parameters
/// * `C` - Command element capacity
/// * `S` - Command segment capacity
pub struct Transaction<const C: usize, const S: usize> {
    /// Command elements
    elements: [CommandElement; C],
    /// Element span of each segment
    spans: [CommandSpan; S],
    /// Bus-facing scatter list, refreshed by [`scatter_list`](Self::scatter_list)
    sgl: [ScatterSegment; S],
    /// Next free element
    ce_idx: usize,
    /// First element not yet covered by a segment
    prev_ce_idx: usize,
    /// Number of segments
    segment_count: usize,
}

/// Transaction with the default 128-element, 128-segment sizing
pub type TransactionDefault = Transaction<DEFAULT_CMD_ELEMENTS, DEFAULT_CMD_SEGMENTS>;

impl<const C: usize, const S: usize> Transaction<C, S> {
    /// Create an empty transaction. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: [const { CommandElement::new() }; C],
            spans: [CommandSpan { start: 0, count: 0 }; S],
            sgl: [ScatterSegment::new(0, 0); S],
            ce_idx: 0,
            prev_ce_idx: 0,
            segment_count: 0,
        }
    }

    /// Total memory used by the backing storage in bytes.
    #[must_use]
    pub const fn memory_usage() -> usize {
        C * CommandElement::SIZE
            + S * (core::mem::size_of::<CommandSpan>() + core::mem::size_of::<ScatterSegment>())
    }

    /// Stage one register write.
    ///
    /// Appends a write element and one segment covering every element staged
    /// since the previous call. Fails without touching any state when either
    /// the element buffer or the segment table is full.
    pub fn append_write(&mut self, address: u32, value: u32) -> CapacityResult<()> {
        if self.ce_idx >= C {
            return Err(CapacityError::CommandBufferFull);
        }
        if self.segment_count >= S {
            return Err(CapacityError::SegmentTableFull);
        }

        self.elements[self.ce_idx] = CommandElement::write(address, value);
        self.ce_idx += 1;

        self.spans[self.segment_count] = CommandSpan {
            start: self.prev_ce_idx,
            count: self.ce_idx - self.prev_ce_idx,
        };
        self.segment_count += 1;
        self.prev_ce_idx = self.ce_idx;

        Ok(())
    }

    /// Rewind all cursors. Storage is kept for the next operation.
    pub fn reset(&mut self) {
        self.ce_idx = 0;
        self.prev_ce_idx = 0;
        self.segment_count = 0;
    }

    /// Number of staged elements
    #[inline(always)]
    #[must_use]
    pub const fn element_count(&self) -> usize {
        self.ce_idx
    }

    /// Number of staged segments
    #[inline(always)]
    #[must_use]
    pub const fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Check if nothing is staged
    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segment_count == 0
    }

    /// Elements still available before the buffer is full
    #[must_use]
    pub const fn remaining(&self) -> usize {
        C - self.ce_idx
    }

    /// Staged elements in call order
    #[must_use]
    pub fn elements(&self) -> &[CommandElement] {
        &self.elements[..self.ce_idx]
    }

    /// Elements covered by segment `index`
    #[must_use]
    pub fn segment_elements(&self, index: usize) -> Option<&[CommandElement]> {
        if index >= self.segment_count {
            return None;
        }
        let span = self.spans[index];
        Some(&self.elements[span.start..span.start + span.count])
    }

    /// Resolve the staged segments into a scatter list over the element
    /// buffer.
    ///
    /// The returned addresses stay valid while the transaction is neither
    /// moved nor modified.
    pub fn scatter_list(&mut self) -> &[ScatterSegment] {
        for i in 0..self.segment_count {
            let span = self.spans[i];
            let elements = &self.elements[span.start..span.start + span.count];
            self.sgl[i] = ScatterSegment::from_slice(elements);
        }
        &self.sgl[..self.segment_count]
    }
}

impl<const C: usize, const S: usize> Default for Transaction<C, S> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
