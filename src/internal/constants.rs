//! Centralized Constants
//!
//! Single source of truth for the sizing and magic numbers used by the
//! command batching and transfer core.
//!
//! # Organization
//!
//! - **Bus geometry**: BAM burst granularity and derived buffer sizes
//! - **Command script sizing**: default element and segment capacities
//! - **Result dump layout**: register counts of the hardware result block
//! - **Channel defaults**: channel names and lock register offset

// =============================================================================
// Bus Geometry
// =============================================================================

/// Maximum data transfer block size between BAM and the crypto engine
pub const BAM_BURST_SIZE: usize = 64;

/// Extra bytes after the result dump that the engine may write into
pub const IGNORE_BUF_SIZE: usize = 2 * BAM_BURST_SIZE;

// =============================================================================
// Command Script Sizing
// =============================================================================

/// Default number of command elements per transaction
pub const DEFAULT_CMD_ELEMENTS: usize = 128;

/// Default number of command scatter segments per transaction
pub const DEFAULT_CMD_SEGMENTS: usize = 128;

/// Size of one BAM command element on the bus
pub const CMD_ELEMENT_SIZE: usize = 16;

// =============================================================================
// Result Dump Layout
// =============================================================================

/// Authentication IV registers captured in the result dump
pub const AUTHIV_REGS_CNT: usize = 16;

/// Authentication byte count registers captured in the result dump
pub const AUTH_BYTECOUNT_REGS_CNT: usize = 4;

/// Encryption counter/IV registers captured in the result dump
pub const CNTRIV_REGS_CNT: usize = 4;

// =============================================================================
// Channel Defaults
// =============================================================================

/// Name of the channel feeding the engine (command script and input data)
pub const DEFAULT_RX_CHANNEL: &str = "rx";

/// Name of the channel draining the engine (output data and result dump)
pub const DEFAULT_TX_CHANNEL: &str = "tx";

/// Register written by the pipe lock/unlock dummy commands (`AUTH_SEG_CFG`)
pub const DEFAULT_LOCK_REGISTER: u32 = 0x200;

/// Poll interval of bounded completion waits in microseconds
pub const COMPLETION_POLL_INTERVAL_US: u32 = 10;

/// Round `value` up to a multiple of `align` (`align` must be a power of two)
pub const fn align_up(value: usize, align: usize) -> usize {
    (value + align - 1) & !(align - 1)
}
