//! BAM command element and descriptor preparation bit fields.

/// Command element word 0 (`cmd_and_addr`) layout
pub mod ce_word0 {
    /// Register address mask (24 bits)
    pub const ADDR_MASK: u32 = 0x00FF_FFFF;
    /// Command field shift
    pub const CMD_SHIFT: u32 = 24;
    /// Command field mask (after shifting down)
    pub const CMD_MASK: u32 = 0xFF;
}

/// Command opcodes carried in word 0
pub mod ce_cmd {
    /// Register write
    pub const WRITE: u32 = 0;
    /// Register read
    pub const READ: u32 = 1;
}

/// Write mask applied to every staged write (all bits significant)
pub const CE_MASK_ALL: u32 = 0xFFFF_FFFF;

/// Descriptor preparation flags understood by the transfer engine
pub mod prep {
    /// Raise a completion interrupt when the chain finishes
    pub const INTERRUPT: u32 = 1 << 0;
    /// Descriptor may be reused/acked by the engine without client ack
    pub const CTRL_ACK: u32 = 1 << 1;
    /// Chain carries BAM command elements rather than data
    pub const CMD: u32 = 1 << 2;
    /// Acquire the shared pipe lock before executing the chain
    pub const LOCK: u32 = 1 << 3;
    /// Release the shared pipe lock after executing the chain
    pub const UNLOCK: u32 = 1 << 4;
}
