//! Testing utilities and mock implementations
//!
//! This module provides a recording transfer engine and a fake delay for
//! exercising the submission paths on the host without a BAM.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::vec::Vec;

use crate::driver::error::{DmaError, DmaResult};
use crate::engine::{
    Cookie, DataDirection, PrepFlags, TransferCallback, TransferDirection, TransferEngine,
};
use crate::sg::ScatterSegment;

// =============================================================================
// Mock Transfer Engine
// =============================================================================

/// Channel handle issued by [`MockTransferEngine`]: index in request order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockChannel(pub u8);

/// Descriptor built by [`MockTransferEngine`]
pub struct MockDescriptor {
    pub channel: MockChannel,
    pub direction: TransferDirection,
    pub callback: Option<&'static dyn TransferCallback>,
}

/// One call made into the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RequestChannel(&'static str),
    Map {
        segments: Vec<ScatterSegment>,
        direction: DataDirection,
        flags: PrepFlags,
    },
    Unmap {
        segments: usize,
        direction: DataDirection,
    },
    Prep {
        channel: MockChannel,
        segments: Vec<ScatterSegment>,
        direction: TransferDirection,
        flags: PrepFlags,
        has_callback: bool,
    },
    Submit(Cookie),
    IssuePending(MockChannel),
    Terminate(MockChannel),
}

/// Recording transfer engine with failure injection
///
/// # Example
///
/// ```ignore
/// let mut engine = MockTransferEngine::new();
/// engine.fail_prep_on(TransferDirection::DevToMem);
///
/// let mut dma = QceDma::request(engine, DmaConfig::new()).unwrap();
/// assert!(dma.prep_transfer(&input, &output, None).is_err());
/// ```
#[derive(Default)]
pub struct MockTransferEngine {
    channels: Vec<&'static str>,
    events: Vec<EngineEvent>,
    queued: RefCell<Vec<MockDescriptor>>,
    next_cookie: u32,
    missing_channel: Option<&'static str>,
    fail_map: bool,
    map_returns_zero: bool,
    fail_prep: Option<TransferDirection>,
    fail_submit: bool,
    fail_terminate: Vec<&'static str>,
}

impl MockTransferEngine {
    /// Create a mock engine that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Failure injection
    // -------------------------------------------------------------------------

    /// Refuse to provide the channel called `name`
    pub fn without_channel(mut self, name: &'static str) -> Self {
        self.missing_channel = Some(name);
        self
    }

    /// Make every map call return an error
    pub fn fail_map(&mut self) {
        self.fail_map = true;
    }

    /// Make every map call succeed with zero mapped entries
    pub fn map_nothing(&mut self) {
        self.map_returns_zero = true;
    }

    /// Reject descriptor builds in `direction`
    pub fn fail_prep_on(&mut self, direction: TransferDirection) {
        self.fail_prep = Some(direction);
    }

    /// Reject every submission
    pub fn fail_submit(&mut self) {
        self.fail_submit = true;
    }

    /// Fail termination of the channel called `name`
    pub fn fail_terminate_on(&mut self, name: &'static str) {
        self.fail_terminate.push(name);
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    /// Every call made so far, in order
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Forget recorded calls
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Handle of the channel requested under `name`
    pub fn channel(&self, name: &str) -> Option<MockChannel> {
        self.channels
            .iter()
            .position(|n| *n == name)
            .map(|i| MockChannel(i as u8))
    }

    /// Number of submitted, not yet completed descriptors
    pub fn queued(&self) -> usize {
        self.queued.borrow().len()
    }

    /// Only the prep events, in order
    pub fn preps(&self) -> Vec<&EngineEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, EngineEvent::Prep { .. }))
            .collect()
    }

    /// Drain all queued descriptors, invoking their callbacks.
    ///
    /// Returns the number of callbacks fired.
    pub fn complete_all(&self) -> usize {
        let drained: Vec<MockDescriptor> = self.queued.borrow_mut().drain(..).collect();
        let mut fired = 0;
        for desc in drained {
            if let Some(cb) = desc.callback {
                cb.complete();
                fired += 1;
            }
        }
        fired
    }

    fn channel_name(&self, channel: MockChannel) -> &'static str {
        self.channels[channel.0 as usize]
    }
}

impl TransferEngine for MockTransferEngine {
    type Channel = MockChannel;
    type Descriptor = MockDescriptor;

    fn request_channel(&mut self, name: &'static str) -> DmaResult<MockChannel> {
        self.events.push(EngineEvent::RequestChannel(name));
        if self.missing_channel == Some(name) {
            return Err(DmaError::InvalidArgument);
        }
        self.channels.push(name);
        Ok(MockChannel((self.channels.len() - 1) as u8))
    }

    fn map(
        &mut self,
        segments: &[ScatterSegment],
        direction: DataDirection,
        flags: PrepFlags,
    ) -> DmaResult<usize> {
        self.events.push(EngineEvent::Map {
            segments: segments.to_vec(),
            direction,
            flags,
        });
        if self.fail_map {
            return Err(DmaError::MappingFailed);
        }
        if self.map_returns_zero {
            return Ok(0);
        }
        Ok(segments.len())
    }

    fn unmap(&mut self, segments: &[ScatterSegment], direction: DataDirection) {
        self.events.push(EngineEvent::Unmap {
            segments: segments.len(),
            direction,
        });
    }

    fn prep_slave_sg(
        &mut self,
        channel: MockChannel,
        segments: &[ScatterSegment],
        direction: TransferDirection,
        flags: PrepFlags,
        callback: Option<&'static dyn TransferCallback>,
    ) -> DmaResult<MockDescriptor> {
        self.events.push(EngineEvent::Prep {
            channel,
            segments: segments.to_vec(),
            direction,
            flags,
            has_callback: callback.is_some(),
        });
        if self.fail_prep == Some(direction) {
            return Err(DmaError::ChainBuildFailed);
        }
        Ok(MockDescriptor {
            channel,
            direction,
            callback,
        })
    }

    fn submit(&mut self, descriptor: MockDescriptor) -> DmaResult<Cookie> {
        if self.fail_submit {
            return Err(DmaError::SubmissionRejected);
        }
        self.next_cookie += 1;
        let cookie = Cookie(self.next_cookie);
        self.events.push(EngineEvent::Submit(cookie));
        self.queued.borrow_mut().push(descriptor);
        Ok(cookie)
    }

    fn issue_pending(&mut self, channel: MockChannel) {
        self.events.push(EngineEvent::IssuePending(channel));
    }

    fn terminate_all(&mut self, channel: MockChannel) -> DmaResult<()> {
        self.events.push(EngineEvent::Terminate(channel));
        let name = self.channel_name(channel);
        if self.fail_terminate.contains(&name) {
            return Err(DmaError::TerminationFailed);
        }
        self.queued.borrow_mut().retain(|d| d.channel != channel);
        Ok(())
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay implementation for testing
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::delay::DelayNs;

    #[test]
    fn mock_engine_assigns_channels_in_order() {
        let mut engine = MockTransferEngine::new();
        assert_eq!(engine.request_channel("rx"), Ok(MockChannel(0)));
        assert_eq!(engine.request_channel("tx"), Ok(MockChannel(1)));
        assert_eq!(engine.channel("tx"), Some(MockChannel(1)));
        assert_eq!(engine.channel("other"), None);
    }

    #[test]
    fn mock_engine_missing_channel() {
        let mut engine = MockTransferEngine::new().without_channel("tx");
        assert!(engine.request_channel("rx").is_ok());
        assert!(engine.request_channel("tx").is_err());
    }

    #[test]
    fn mock_engine_terminate_drops_queued() {
        let mut engine = MockTransferEngine::new();
        let ch = engine.request_channel("rx").unwrap();
        let desc = engine
            .prep_slave_sg(ch, &[], TransferDirection::MemToDev, PrepFlags::NONE, None)
            .unwrap();
        engine.submit(desc).unwrap();
        assert_eq!(engine.queued(), 1);

        engine.terminate_all(ch).unwrap();
        assert_eq!(engine.queued(), 0);
    }

    #[test]
    fn mock_delay_accumulates() {
        let mut delay = MockDelay::new();
        delay.delay_us(10);
        delay.delay_ns(500);
        assert_eq!(delay.total_ns(), 10_500);
    }
}
