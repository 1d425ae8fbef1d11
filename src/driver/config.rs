//! Configuration types for the QCE BAM transfer core

use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::{DEFAULT_LOCK_REGISTER, DEFAULT_RX_CHANNEL, DEFAULT_TX_CHANNEL};

/// Device configuration for [`QceDma`](crate::QceDma).
///
/// # Example
///
/// ```ignore
/// let config = DmaConfig::new()
///     .with_base_phys(0x0073_A000)
///     .with_channel_names("rx", "tx");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmaConfig {
    /// Bus address of the crypto engine register block
    pub base_phys: u32,
    /// Name of the inbound (to-device) channel
    pub rx_channel: &'static str,
    /// Name of the outbound (from-device) channel
    pub tx_channel: &'static str,
    /// Register offset targeted by the pipe lock/unlock dummy writes
    pub lock_register: u32,
}

impl Default for DmaConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DmaConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base_phys: 0,
            rx_channel: DEFAULT_RX_CHANNEL,
            tx_channel: DEFAULT_TX_CHANNEL,
            lock_register: DEFAULT_LOCK_REGISTER,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the register block base address
    #[must_use]
    pub const fn with_base_phys(mut self, base_phys: u32) -> Self {
        self.base_phys = base_phys;
        self
    }

    /// Set the inbound and outbound channel names
    #[must_use]
    pub const fn with_channel_names(mut self, rx: &'static str, tx: &'static str) -> Self {
        self.rx_channel = rx;
        self.tx_channel = tx;
        self
    }

    /// Set the register used for the pipe lock/unlock dummy writes
    #[must_use]
    pub const fn with_lock_register(mut self, offset: u32) -> Self {
        self.lock_register = offset;
        self
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check the configuration before any channel is requested.
    ///
    /// Both channel names must be non-empty and distinct.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.rx_channel.is_empty() || self.tx_channel.is_empty() {
            return Err(ConfigError::InvalidConfig);
        }
        if self.rx_channel == self.tx_channel {
            return Err(ConfigError::InvalidConfig);
        }
        Ok(())
    }

    /// Absolute bus address of the register at `offset`
    #[inline(always)]
    #[must_use]
    pub const fn register_address(&self, offset: u32) -> u32 {
        self.base_phys.wrapping_add(offset)
    }
}

// =============================================================================
// Tests
// =============================================================================
