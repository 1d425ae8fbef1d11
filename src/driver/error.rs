//! Error types for the QCE BAM transfer core
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Bring-up and channel acquisition failures
//! - [`CapacityError`]: Fixed-capacity buffer exhaustion
//! - [`DmaError`]: Mapping, descriptor build, submission and termination failures
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by the device-level operations.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and bring-up errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid configuration parameter
    InvalidConfig,
    /// The transfer engine could not provide a requested channel
    ChannelUnavailable,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidConfig => "invalid configuration",
            ConfigError::ChannelUnavailable => "channel unavailable",
        }
    }
}

// =============================================================================
// Capacity Errors
// =============================================================================

/// Fixed-capacity buffer exhaustion
///
/// Capacity is never extended at runtime; hitting one of these means the
/// caller staged more than the transaction was sized for, or forgot to reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CapacityError {
    /// Command element buffer is full
    CommandBufferFull,
    /// Command segment table is full
    SegmentTableFull,
    /// Destination scatter table has no free slot
    NoFreeSlot,
}

impl core::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CapacityError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CapacityError::CommandBufferFull => "command element buffer full",
            CapacityError::SegmentTableFull => "command segment table full",
            CapacityError::NoFreeSlot => "no free scatter slot",
        }
    }
}

// =============================================================================
// DMA Errors
// =============================================================================

/// Transfer engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaError {
    /// Empty or missing scatter list
    InvalidArgument,
    /// Buffer could not be made bus-accessible
    MappingFailed,
    /// Descriptor construction rejected by the engine
    ChainBuildFailed,
    /// Engine refused the built chain
    SubmissionRejected,
    /// At least one channel failed to terminate
    TerminationFailed,
    /// Completion was not signalled in time
    Timeout,
}

impl core::fmt::Display for DmaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DmaError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DmaError::InvalidArgument => "empty scatter list",
            DmaError::MappingFailed => "buffer mapping failed",
            DmaError::ChainBuildFailed => "descriptor chain build failed",
            DmaError::SubmissionRejected => "submission rejected",
            DmaError::TerminationFailed => "channel termination failed",
            DmaError::Timeout => "completion timed out",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Capacity(CapacityError::CommandBufferFull)) => { /* reset and retry */ }
///     Err(Error::Dma(DmaError::SubmissionRejected)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// Capacity error
    Capacity(CapacityError),
    /// DMA error
    Dma(DmaError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Capacity(e) => write!(f, "capacity: {}", e.as_str()),
            Error::Dma(e) => write!(f, "dma: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<CapacityError> for Error {
    fn from(e: CapacityError) -> Self {
        Error::Capacity(e)
    }
}

impl From<DmaError> for Error {
    fn from(e: DmaError) -> Self {
        Error::Dma(e)
    }
}

/// Result type alias for device operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for fixed-capacity buffer operations
pub type CapacityResult<T> = core::result::Result<T, CapacityError>;

/// Result type alias for transfer engine operations
pub type DmaResult<T> = core::result::Result<T, DmaError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn capacity_error_as_str_non_empty() {
        let variants = [
            CapacityError::CommandBufferFull,
            CapacityError::SegmentTableFull,
            CapacityError::NoFreeSlot,
        ];

        for variant in variants {
            assert!(!variant.as_str().is_empty(), "{variant:?} has empty string");
        }
    }

    #[test]
    fn dma_error_as_str_non_empty() {
        let variants = [
            DmaError::InvalidArgument,
            DmaError::MappingFailed,
            DmaError::ChainBuildFailed,
            DmaError::SubmissionRejected,
            DmaError::TerminationFailed,
            DmaError::Timeout,
        ];

        for variant in variants {
            assert!(!variant.as_str().is_empty(), "{variant:?} has empty string");
        }
    }

    #[test]
    fn dma_error_display() {
        let display = format!("{}", DmaError::MappingFailed);
        assert_eq!(display, "buffer mapping failed");
    }

    #[test]
    fn error_from_capacity_error() {
        let err: Error = CapacityError::CommandBufferFull.into();
        assert_eq!(err, Error::Capacity(CapacityError::CommandBufferFull));
    }

    #[test]
    fn error_from_dma_error() {
        let err: Error = DmaError::SubmissionRejected.into();
        assert_eq!(err, Error::Dma(DmaError::SubmissionRejected));
    }

    #[test]
    fn error_from_config_error() {
        let err: Error = ConfigError::ChannelUnavailable.into();
        assert_eq!(err, Error::Config(ConfigError::ChannelUnavailable));
    }

    #[test]
    fn error_display_includes_domain() {
        let display = format!("{}", Error::Capacity(CapacityError::SegmentTableFull));
        assert!(display.starts_with("capacity:"));
        assert!(display.contains("segment table"));

        let display = format!("{}", Error::Dma(DmaError::ChainBuildFailed));
        assert!(display.starts_with("dma:"));
        assert!(display.contains("chain"));

        let display = format!("{}", Error::Config(ConfigError::InvalidConfig));
        assert!(display.starts_with("config:"));
    }

    #[test]
    fn question_mark_converts_domain_errors() {
        fn stage() -> CapacityResult<()> {
            Err(CapacityError::NoFreeSlot)
        }

        fn operation() -> Result<()> {
            stage()?;
            Ok(())
        }

        assert_eq!(operation(), Err(Error::Capacity(CapacityError::NoFreeSlot)));
    }
}
