//! Synchronization and Completion Support
//!
//! The core never blocks: completion of an operation is observed only
//! through the callback attached to its data-out chain. This module provides
//! the pieces a caller needs to wait for that callback:
//!
//! - **Primitives** (`primitives`): [`CriticalSectionCell`] for ISR-safe
//!   interior mutability, plus `AtomicWaker` with the `async` feature
//! - **Completion** (`completion`): [`Completion`], a single-shot flag usable
//!   directly as a [`TransferCallback`](crate::engine::TransferCallback)
//!
//! # Feature Flags
//!
//! - `async`: Enables `Completion::wait` and `CompletionFuture`

mod completion;
mod primitives;

pub use completion::Completion;
#[cfg(feature = "async")]
pub use completion::CompletionFuture;
#[cfg(feature = "async")]
pub use primitives::AtomicWaker;
pub use primitives::CriticalSectionCell;
