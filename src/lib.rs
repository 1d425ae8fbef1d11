//! QCE BAM Command Batching and Transfer Core
//!
//! A `no_std`, `no_alloc` Rust implementation of the command batching and DMA
//! transfer layer that drives a Qualcomm Crypto Engine (QCE) over its BAM
//! (Bus Access Manager) pipes.
//!
//! The crypto engine is programmed entirely through register writes, and those
//! writes travel over the same descriptor bus as the bulk data. This crate
//! stages register writes as BAM command elements, submits them as command
//! chains, builds the data-in/data-out chains of an operation and exposes the
//! result dump the engine writes back at the end.
//!
//! # Architecture
//!
//! 1. **Command Layer** ([`bam`]): Command elements and the fixed-capacity
//!    transaction accumulating them
//! 2. **Scatter Layer** ([`sg`]): Scatter segments and fixed-capacity tables
//! 3. **Device Layer** ([`driver`]): [`QceDma`] submitting command and data
//!    chains through an injected [`TransferEngine`]
//! 4. **Completion** ([`sync`]): ISR-safe completion signalling
//!
//! The BAM transfer engine itself is an external collaborator, modelled by the
//! [`TransferEngine`] trait. The crate never waits on the bus.
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and formatting for public types
//! - `log`: Route internal logging to the `log` facade
//! - `async`: Enable an awaitable [`Completion`]
//!
//! # Example
//!
//! ```ignore
//! use qce_bam::{Completion, DmaConfig, QceDma, ScatterSegment, ScatterTable};
//!
//! static DONE: Completion = Completion::new();
//!
//! let mut dma: QceDma<_> = QceDma::request(engine, DmaConfig::new().with_base_phys(base))?;
//!
//! // Program the engine
//! dma.clear_transaction();
//! dma.write(REG_SEG_SIZE, len)?;
//! dma.write(REG_GOPROC, GO)?;
//! dma.submit_cmd_lock()?;
//!
//! // Data chains, with the result dump grafted after the output
//! let mut out: ScatterTable<4> = ScatterTable::new();
//! out.push(ScatterSegment::from_slice(&dst))?;
//! dma.append_result(&mut out)?;
//! dma.prep_transfer(&[ScatterSegment::from_slice(&src)], out.as_slice(), Some(&DONE))?;
//! dma.issue_pending();
//!
//! DONE.wait_blocking(&mut delay, 10_000)?;
//! let status = dma.result().status();
//! ```
//!
//! # Memory Requirements
//!
//! With default sizing (128 command elements, 128 segments) a device embeds
//! about 6.5 KB: 2 KB of command elements, 4 KB of segment bookkeeping and a
//! 256 byte result buffer. See [`QceDma::memory_usage`].

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels mirror the [lints] tables in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

// Logging macros, must come first
mod fmt;

pub mod bam;
pub mod driver;
pub mod engine;
pub mod result;
pub mod sg;
pub mod sync;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use bam::{CommandElement, CommandKind, Transaction, TransactionDefault};
pub use driver::config::DmaConfig;
pub use driver::dma::{QceDma, QceDmaDefault, QceDmaSmall};
pub use driver::error::{
    CapacityError, CapacityResult, ConfigError, ConfigResult, DmaError, DmaResult, Error, Result,
};
pub use engine::{
    Cookie, DataDirection, DescriptorHandle, LockMode, PrepFlags, TransferCallback,
    TransferDirection, TransferEngine,
};
pub use result::{RESULT_BUF_SIZE, ResultBuffer, ResultDump};
pub use sg::{ScatterSegment, ScatterTable};
pub use sync::Completion;

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub use sync::CompletionFuture;

/// Shared sizing constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on device types.
pub mod constants {
    pub use crate::internal::constants::{
        // Result dump layout
        AUTH_BYTECOUNT_REGS_CNT,
        AUTHIV_REGS_CNT,
        // Bus geometry
        BAM_BURST_SIZE,
        CMD_ELEMENT_SIZE,
        CNTRIV_REGS_CNT,
        // Timing
        COMPLETION_POLL_INTERVAL_US,
        // Command script sizing
        DEFAULT_CMD_ELEMENTS,
        DEFAULT_CMD_SEGMENTS,
        // Channel defaults
        DEFAULT_LOCK_REGISTER,
        DEFAULT_RX_CHANNEL,
        DEFAULT_TX_CHANNEL,
        IGNORE_BUF_SIZE,
    };
}
