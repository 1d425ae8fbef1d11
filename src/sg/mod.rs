//! Scatter-gather segments and fixed-capacity scatter tables.
//!
//! A [`ScatterSegment`] describes one contiguous memory region the transfer
//! engine should move. Segments carry CPU addresses; turning them into bus
//! addresses is the engine's job at map time.

mod table;

pub use table::ScatterTable;

/// One contiguous region of a scatter-gather list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScatterSegment {
    /// Start address of the region
    pub address: usize,
    /// Length of the region in bytes
    pub length: usize,
}

impl ScatterSegment {
    /// Create a segment from a raw address and length.
    #[must_use]
    pub const fn new(address: usize, length: usize) -> Self {
        Self { address, length }
    }

    /// Describe the bytes of a slice.
    ///
    /// The segment does not borrow the slice; the caller keeps the region
    /// alive and unmoved until the transfer using it has completed.
    #[must_use]
    pub fn from_slice<T>(data: &[T]) -> Self {
        Self {
            address: data.as_ptr() as usize,
            length: core::mem::size_of_val(data),
        }
    }

    /// Same region, clipped to at most `max_len` bytes.
    #[must_use]
    pub const fn clipped(self, max_len: usize) -> Self {
        let length = if self.length > max_len {
            max_len
        } else {
            self.length
        };
        Self {
            address: self.address,
            length,
        }
    }

    /// Check if the segment covers no bytes
    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Total byte length of a scatter list.
#[must_use]
pub fn total_length(segments: &[ScatterSegment]) -> usize {
    segments.iter().map(|s| s.length).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_covers_all_bytes() {
        let words = [0u32; 4];
        let seg = ScatterSegment::from_slice(&words);
        assert_eq!(seg.address, words.as_ptr() as usize);
        assert_eq!(seg.length, 16);
    }

    #[test]
    fn clipped_never_grows() {
        let seg = ScatterSegment::new(0x1000, 64);
        assert_eq!(seg.clipped(16).length, 16);
        assert_eq!(seg.clipped(128).length, 64);
        assert_eq!(seg.clipped(0).length, 0);
        assert_eq!(seg.clipped(16).address, 0x1000);
    }

    #[test]
    fn total_length_sums_segments() {
        let list = [
            ScatterSegment::new(0x1000, 16),
            ScatterSegment::new(0x2000, 48),
        ];
        assert_eq!(total_length(&list), 64);
        assert_eq!(total_length(&[]), 0);
    }
}
