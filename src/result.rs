//! Hardware-written result dump.
//!
//! At the end of every operation the crypto engine writes its intermediate
//! state and status words into a fixed region appended to the output chain.
//! The region is allocated once and overwritten in place, so every field is
//! read with volatile loads.

use crate::internal::constants::{
    AUTH_BYTECOUNT_REGS_CNT, AUTHIV_REGS_CNT, BAM_BURST_SIZE, CNTRIV_REGS_CNT, IGNORE_BUF_SIZE,
    align_up,
};
use crate::internal::volatile::VolatileCell;
use crate::sg::ScatterSegment;

/// Size of the dump fields without padding
const RESULT_DUMP_RAW_SIZE: usize =
    (AUTHIV_REGS_CNT + AUTH_BYTECOUNT_REGS_CNT + CNTRIV_REGS_CNT + 2) * core::mem::size_of::<u32>();

/// Result dump size rounded up to the BAM burst size
pub const RESULT_BUF_SIZE: usize = align_up(RESULT_DUMP_RAW_SIZE, BAM_BURST_SIZE);

/// Result dump layout as written by the engine.
#[repr(C, align(64))]
pub struct ResultDump {
    auth_iv: [VolatileCell<u32>; AUTHIV_REGS_CNT],
    auth_byte_count: [VolatileCell<u32>; AUTH_BYTECOUNT_REGS_CNT],
    encr_cntr_iv: [VolatileCell<u32>; CNTRIV_REGS_CNT],
    status: VolatileCell<u32>,
    status2: VolatileCell<u32>,
}

const _: () = assert!(core::mem::size_of::<ResultDump>() == RESULT_BUF_SIZE);
const _: () = assert!(core::mem::align_of::<ResultDump>() == BAM_BURST_SIZE);

fn read_words<const N: usize>(cells: &[VolatileCell<u32>; N]) -> [u32; N] {
    let mut out = [0u32; N];
    for (dst, cell) in out.iter_mut().zip(cells.iter()) {
        *dst = cell.get();
    }
    out
}

impl ResultDump {
    /// Create a zeroed dump. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            auth_iv: [const { VolatileCell::new(0) }; AUTHIV_REGS_CNT],
            auth_byte_count: [const { VolatileCell::new(0) }; AUTH_BYTECOUNT_REGS_CNT],
            encr_cntr_iv: [const { VolatileCell::new(0) }; CNTRIV_REGS_CNT],
            status: VolatileCell::new(0),
            status2: VolatileCell::new(0),
        }
    }

    /// Authentication IV words (intermediate or final digest)
    pub fn auth_iv(&self) -> [u32; AUTHIV_REGS_CNT] {
        read_words(&self.auth_iv)
    }

    /// Authenticated byte counters
    pub fn auth_byte_count(&self) -> [u32; AUTH_BYTECOUNT_REGS_CNT] {
        read_words(&self.auth_byte_count)
    }

    /// Encryption counter/IV words
    pub fn encr_cntr_iv(&self) -> [u32; CNTRIV_REGS_CNT] {
        read_words(&self.encr_cntr_iv)
    }

    /// First status word
    #[inline(always)]
    pub fn status(&self) -> u32 {
        self.status.get()
    }

    /// Second status word
    #[inline(always)]
    pub fn status2(&self) -> u32 {
        self.status2.get()
    }
}

impl Default for ResultDump {
    fn default() -> Self {
        Self::new()
    }
}

/// Result dump followed by the spill area the engine may also write.
#[repr(C, align(64))]
pub struct ResultBuffer {
    dump: ResultDump,
    _ignore: [VolatileCell<u8>; IGNORE_BUF_SIZE],
}

impl ResultBuffer {
    /// Total size including the spill area
    pub const SIZE: usize = RESULT_BUF_SIZE + IGNORE_BUF_SIZE;

    /// Create a zeroed buffer. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dump: ResultDump::new(),
            _ignore: [const { VolatileCell::new(0) }; IGNORE_BUF_SIZE],
        }
    }

    /// The dump written by the last completed operation
    #[inline(always)]
    pub fn dump(&self) -> &ResultDump {
        &self.dump
    }

    /// Scatter segment covering the dump, for grafting onto an output chain.
    ///
    /// The spill area is deliberately not covered.
    pub fn segment(&self) -> ScatterSegment {
        ScatterSegment::new(&self.dump as *const ResultDump as usize, RESULT_BUF_SIZE)
    }
}

impl Default for ResultBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_dump_rounds_up_to_burst() {
        assert_eq!(RESULT_DUMP_RAW_SIZE, 104);
        assert_eq!(RESULT_BUF_SIZE, 128);
        assert_eq!(core::mem::size_of::<ResultDump>(), 128);
    }

    #[test]
    fn result_buffer_includes_spill_area() {
        assert_eq!(ResultBuffer::SIZE, 256);
        assert_eq!(core::mem::size_of::<ResultBuffer>(), ResultBuffer::SIZE);
    }

    #[test]
    fn segment_covers_dump_only() {
        let buf = ResultBuffer::new();
        let seg = buf.segment();
        assert_eq!(seg.address, &buf as *const ResultBuffer as usize);
        assert_eq!(seg.length, RESULT_BUF_SIZE);
        assert_eq!(seg.address % BAM_BURST_SIZE, 0);
    }

    #[test]
    fn fields_read_hardware_writes() {
        let buf = ResultBuffer::new();
        buf.dump.status.set(0x0000_0004);
        buf.dump.status2.set(0x8000_0000);
        buf.dump.auth_iv[0].set(0x6A09_E667);
        buf.dump.encr_cntr_iv[3].set(2);
        buf.dump.auth_byte_count[0].set(64);

        let dump = buf.dump();
        assert_eq!(dump.status(), 4);
        assert_eq!(dump.status2(), 0x8000_0000);
        assert_eq!(dump.auth_iv()[0], 0x6A09_E667);
        assert_eq!(dump.encr_cntr_iv(), [0, 0, 0, 2]);
        assert_eq!(dump.auth_byte_count()[0], 64);
    }
}
