//! Core driver components for the QCE BAM transfer path.
//!
//! This module contains the device-level pieces built on top of the command
//! script and scatter table primitives:
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`dma`] - The per-device submission engine
//!
//! # Example
//!
//! ```ignore
//! use qce_bam::driver::{DmaConfig, QceDma, Error};
//!
//! let config = DmaConfig::new().with_base_phys(0x0073_A000);
//! let mut dma: QceDma<_> = QceDma::request(engine, config)?;
//! ```

// Submodules
pub mod config;
pub mod dma;
pub mod error;

// Re-exports for convenience
pub use config::DmaConfig;
pub use dma::{QceDma, QceDmaDefault, QceDmaSmall};
pub use error::{
    CapacityError, CapacityResult, ConfigError, ConfigResult, DmaError, DmaResult, Error, Result,
};
