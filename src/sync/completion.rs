//! Single-shot completion signal for data-out chains.

#[cfg(feature = "async")]
use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use embedded_hal::delay::DelayNs;

use super::primitives::CriticalSectionCell;
#[cfg(feature = "async")]
use super::primitives::AtomicWaker;
use crate::driver::error::{DmaError, DmaResult};
use crate::engine::TransferCallback;
use crate::internal::constants::COMPLETION_POLL_INTERVAL_US;

/// Completion flag set from the transfer engine's callback context.
///
/// Pass a `&'static Completion` as the data-out callback of
/// [`QceDma::prep_transfer`](crate::QceDma::prep_transfer). A failed or
/// terminated operation may never signal, so waits should be bounded.
///
/// # Example
///
/// ```ignore
/// static DONE: Completion = Completion::new();
///
/// DONE.reset();
/// dma.prep_transfer(src.as_slice(), dst.as_slice(), Some(&DONE))?;
/// dma.issue_pending();
/// DONE.wait_blocking(&mut delay, 10_000)?;
/// ```
pub struct Completion {
    done: CriticalSectionCell<bool>,
    #[cfg(feature = "async")]
    waker: AtomicWaker,
}

impl Completion {
    /// Create an unsignalled completion (const, suitable for statics).
    pub const fn new() -> Self {
        Self {
            done: CriticalSectionCell::new(false),
            #[cfg(feature = "async")]
            waker: AtomicWaker::new(),
        }
    }

    /// Mark the operation as complete and wake any waiter.
    ///
    /// Idempotent: further signals before [`reset`](Self::reset) change
    /// nothing.
    pub fn signal(&self) {
        self.done.with(|done| *done = true);

        #[cfg(feature = "async")]
        self.waker.wake();
    }

    /// Check if the operation has completed.
    pub fn is_complete(&self) -> bool {
        self.done.with_ref(|done| *done)
    }

    /// Re-arm for the next operation.
    pub fn reset(&self) {
        self.done.with(|done| *done = false);
    }

    /// Spin until signalled, giving up after `timeout_us` microseconds.
    pub fn wait_blocking<D: DelayNs>(&self, delay: &mut D, timeout_us: u32) -> DmaResult<()> {
        let mut waited = 0u32;
        loop {
            if self.is_complete() {
                return Ok(());
            }
            if waited >= timeout_us {
                warn!("completion wait timed out after {} us", waited);
                return Err(DmaError::Timeout);
            }
            delay.delay_us(COMPLETION_POLL_INTERVAL_US);
            waited = waited.saturating_add(COMPLETION_POLL_INTERVAL_US);
        }
    }

    /// Wait asynchronously until signalled.
    #[cfg(feature = "async")]
    pub fn wait(&self) -> CompletionFuture<'_> {
        CompletionFuture { completion: self }
    }
}

impl Default for Completion {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferCallback for Completion {
    fn complete(&self) {
        self.signal();
    }
}

/// Future resolving once a [`Completion`] is signalled.
#[cfg(feature = "async")]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct CompletionFuture<'a> {
    completion: &'a Completion,
}

#[cfg(feature = "async")]
impl Future for CompletionFuture<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.completion.is_complete() {
            return Poll::Ready(());
        }

        self.completion.waker.register(cx.waker());
        if self.completion.is_complete() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
