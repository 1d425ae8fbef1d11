//! BAM command element.

use crate::internal::bits::{CE_MASK_ALL, ce_cmd, ce_word0};

/// Command carried by a [`CommandElement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    /// Register write
    Write,
    /// Register read
    Read,
}

impl CommandKind {
    /// Encoded opcode
    #[must_use]
    pub const fn to_raw(self) -> u32 {
        match self {
            CommandKind::Write => ce_cmd::WRITE,
            CommandKind::Read => ce_cmd::READ,
        }
    }

    /// Decode an opcode, `None` for values the bus does not define
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            ce_cmd::WRITE => Some(CommandKind::Write),
            ce_cmd::READ => Some(CommandKind::Read),
            _ => None,
        }
    }
}

/// One register command as the BAM reads it from memory (16 bytes).
///
/// All words are stored little-endian.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandElement {
    /// Register address (low 24 bits) and command (high 8 bits)
    cmd_and_addr: u32,
    /// Value to write
    data: u32,
    /// Write mask
    mask: u32,
    /// Reserved, must be zero
    reserved: u32,
}

impl CommandElement {
    /// Size of the element in bytes
    pub const SIZE: usize = 16;

    /// Create a zeroed element. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cmd_and_addr: 0,
            data: 0,
            mask: 0,
            reserved: 0,
        }
    }

    /// Build a register write. Addresses wider than 24 bits are truncated,
    /// matching what the bus decodes.
    #[must_use]
    pub const fn write(address: u32, value: u32) -> Self {
        let word0 = (address & ce_word0::ADDR_MASK)
            | ((CommandKind::Write.to_raw() & ce_word0::CMD_MASK) << ce_word0::CMD_SHIFT);
        Self {
            cmd_and_addr: word0.to_le(),
            data: value.to_le(),
            mask: CE_MASK_ALL.to_le(),
            reserved: 0,
        }
    }

    /// Register address (24 bits)
    #[inline(always)]
    #[must_use]
    pub const fn address(&self) -> u32 {
        u32::from_le(self.cmd_and_addr) & ce_word0::ADDR_MASK
    }

    /// Value carried by the command
    #[inline(always)]
    #[must_use]
    pub const fn value(&self) -> u32 {
        u32::from_le(self.data)
    }

    /// Write mask
    #[inline(always)]
    #[must_use]
    pub const fn mask(&self) -> u32 {
        u32::from_le(self.mask)
    }

    /// Decoded command
    #[must_use]
    pub const fn command(&self) -> Option<CommandKind> {
        let raw = (u32::from_le(self.cmd_and_addr) >> ce_word0::CMD_SHIFT) & ce_word0::CMD_MASK;
        CommandKind::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::constants::CMD_ELEMENT_SIZE;

    #[test]
    fn element_matches_bus_layout() {
        assert_eq!(core::mem::size_of::<CommandElement>(), CommandElement::SIZE);
        assert_eq!(CommandElement::SIZE, CMD_ELEMENT_SIZE);
    }

    #[test]
    fn write_encodes_address_value_and_mask() {
        let ce = CommandElement::write(0x0001_A010, 0xCAFE_F00D);
        assert_eq!(ce.address(), 0x0001_A010);
        assert_eq!(ce.value(), 0xCAFE_F00D);
        assert_eq!(ce.mask(), 0xFFFF_FFFF);
        assert_eq!(ce.command(), Some(CommandKind::Write));
    }

    #[test]
    fn write_truncates_address_to_24_bits() {
        let ce = CommandElement::write(0x0740_0010, 1);
        assert_eq!(ce.address(), 0x0040_0010);
        assert_eq!(ce.command(), Some(CommandKind::Write));
    }

    #[test]
    fn command_kind_round_trips() {
        for kind in [CommandKind::Write, CommandKind::Read] {
            assert_eq!(CommandKind::from_raw(kind.to_raw()), Some(kind));
        }
        assert_eq!(CommandKind::from_raw(0x7F), None);
    }

    #[test]
    fn zeroed_element_decodes_as_write_to_zero() {
        let ce = CommandElement::new();
        assert_eq!(ce.address(), 0);
        assert_eq!(ce.value(), 0);
        assert_eq!(ce.mask(), 0);
    }
}
