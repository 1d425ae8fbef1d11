//! Transfer engine capability.
//!
//! The BAM transfer engine is an external collaborator: it owns the channels,
//! maps memory for the bus, builds hardware descriptors and runs them on its
//! own worker context. This module defines the narrow interface the core
//! consumes, so the core never constructs or looks up channels itself.
//!
//! # Example
//!
//! ```ignore
//! use qce_bam::engine::{TransferEngine, TransferDirection, PrepFlags};
//!
//! struct BamEngine { /* platform DMA state */ }
//!
//! impl TransferEngine for BamEngine {
//!     type Channel = u8;
//!     type Descriptor = BamDesc;
//!     // ...
//! }
//! ```

mod flags;

pub use flags::{LockMode, PrepFlags};

use crate::driver::error::DmaResult;
use crate::sg::ScatterSegment;

/// Mapping direction for bus access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataDirection {
    /// Memory is read by the device
    ToDevice,
    /// Memory is written by the device
    FromDevice,
}

/// Direction of a descriptor chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferDirection {
    /// Memory to device
    MemToDev,
    /// Device to memory
    DevToMem,
}

impl TransferDirection {
    /// Mapping direction matching this transfer
    #[must_use]
    pub const fn data_direction(self) -> DataDirection {
        match self {
            TransferDirection::MemToDev => DataDirection::ToDevice,
            TransferDirection::DevToMem => DataDirection::FromDevice,
        }
    }
}

/// Identifier the engine assigns to a submitted chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cookie(pub u32);

/// Completion notification attached to a descriptor chain.
///
/// Invoked from the transfer engine's completion context, possibly an
/// interrupt handler, at most once per submitted chain. Chains that fail or
/// are terminated may never invoke it.
pub trait TransferCallback: Sync {
    /// The chain has been fully drained.
    fn complete(&self);
}

/// A built, not yet submitted descriptor chain plus its direction.
#[derive(Debug)]
pub struct DescriptorHandle<D> {
    descriptor: D,
    direction: DataDirection,
}

impl<D> DescriptorHandle<D> {
    /// Wrap a descriptor built for `direction`
    pub fn new(descriptor: D, direction: DataDirection) -> Self {
        Self {
            descriptor,
            direction,
        }
    }

    /// Direction the descriptor moves data in
    #[inline(always)]
    pub fn direction(&self) -> DataDirection {
        self.direction
    }

    /// Give up the descriptor, typically to the engine on submission
    pub fn into_descriptor(self) -> D {
        self.descriptor
    }
}

/// Asynchronous transfer engine driving the BAM pipes.
///
/// Every method only hands work over; none of them waits for the bus.
pub trait TransferEngine {
    /// Channel handle
    type Channel: Copy;
    /// Built descriptor chain
    type Descriptor;

    /// Acquire the channel registered under `name`.
    fn request_channel(&mut self, name: &'static str) -> DmaResult<Self::Channel>;

    /// Make `segments` accessible to the bus. Returns the number of mapped
    /// entries; zero means nothing could be mapped.
    fn map(
        &mut self,
        segments: &[ScatterSegment],
        direction: DataDirection,
        flags: PrepFlags,
    ) -> DmaResult<usize>;

    /// Undo a previous [`map`](Self::map) of the same list.
    fn unmap(&mut self, segments: &[ScatterSegment], direction: DataDirection);

    /// Build one descriptor chain from `segments` on `channel`.
    ///
    /// `callback`, when present, runs once the chain completes.
    fn prep_slave_sg(
        &mut self,
        channel: Self::Channel,
        segments: &[ScatterSegment],
        direction: TransferDirection,
        flags: PrepFlags,
        callback: Option<&'static dyn TransferCallback>,
    ) -> DmaResult<Self::Descriptor>;

    /// Queue a built chain. Ownership passes to the engine.
    fn submit(&mut self, descriptor: Self::Descriptor) -> DmaResult<Cookie>;

    /// Start processing queued chains on `channel`.
    fn issue_pending(&mut self, channel: Self::Channel);

    /// Abort all queued and in-flight work on `channel`.
    fn terminate_all(&mut self, channel: Self::Channel) -> DmaResult<()>;
}
