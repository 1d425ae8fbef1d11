//! Descriptor preparation flags and pipe lock modes.

use crate::internal::bits::prep;

/// Flags passed to the engine when mapping and building a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PrepFlags(u32);

impl PrepFlags {
    /// No flags
    pub const NONE: Self = Self(0);
    /// Raise an interrupt on completion
    pub const INTERRUPT: Self = Self(prep::INTERRUPT);
    /// Engine may recycle the descriptor without a client ack
    pub const CTRL_ACK: Self = Self(prep::CTRL_ACK);
    /// Chain carries command elements
    pub const CMD: Self = Self(prep::CMD);
    /// Acquire the shared pipe lock
    pub const LOCK: Self = Self(prep::LOCK);
    /// Release the shared pipe lock
    pub const UNLOCK: Self = Self(prep::UNLOCK);

    /// Create from raw bits
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bits
    #[inline(always)]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check if every flag in `other` is set
    #[inline(always)]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Union of two flag sets
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl core::ops::BitOr for PrepFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Lock semantics of a command submission on a shared pipe.
///
/// The lock is enforced by the bus hardware: a locked pipe keeps other
/// clients' traffic out until a chain with [`LockMode::Unlock`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockMode {
    /// Plain submission
    #[default]
    None,
    /// Acquire the pipe lock before this chain
    Lock,
    /// Release the pipe lock after this chain
    Unlock,
}

impl LockMode {
    /// Preparation flags encoding this mode
    #[must_use]
    pub const fn prep_flags(self) -> PrepFlags {
        match self {
            LockMode::None => PrepFlags::NONE,
            LockMode::Lock => PrepFlags::LOCK,
            LockMode::Unlock => PrepFlags::UNLOCK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_and_contains() {
        let flags = PrepFlags::CMD | PrepFlags::LOCK;
        assert!(flags.contains(PrepFlags::CMD));
        assert!(flags.contains(PrepFlags::LOCK));
        assert!(!flags.contains(PrepFlags::UNLOCK));
        assert!(flags.contains(PrepFlags::NONE));
    }

    #[test]
    fn flags_are_distinct_bits() {
        let all = [
            PrepFlags::INTERRUPT,
            PrepFlags::CTRL_ACK,
            PrepFlags::CMD,
            PrepFlags::LOCK,
            PrepFlags::UNLOCK,
        ];
        let mut seen = 0u32;
        for flag in all {
            assert_eq!(flag.bits().count_ones(), 1);
            assert_eq!(seen & flag.bits(), 0);
            seen |= flag.bits();
        }
    }

    #[test]
    fn lock_mode_flags() {
        assert_eq!(LockMode::None.prep_flags(), PrepFlags::NONE);
        assert_eq!(LockMode::Lock.prep_flags(), PrepFlags::LOCK);
        assert_eq!(LockMode::Unlock.prep_flags(), PrepFlags::UNLOCK);
        assert_eq!(LockMode::default(), LockMode::None);
    }
}
