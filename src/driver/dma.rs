//! Command batching and data transfer submission.
//!
//! [`QceDma`] owns everything one crypto engine instance needs on the BAM:
//! the inbound and outbound channel handles, the command script being staged
//! and the result dump buffer. Nothing here waits on the bus; completion is
//! only observable through the callback attached to the data-out chain.
//!
//! # Operation flow
//!
//! ```text
//! clear_transaction()
//! write(reg, val) ...              stage register programming
//! submit_cmd() / submit_cmd_lock() map + build + submit on the inbound channel
//! prep_transfer(in, out, cb)       data-in on inbound, data-out on outbound
//! issue_pending()                  start both channels
//! ... cb fires from the engine's completion context
//! ```

use crate::bam::Transaction;
use crate::driver::config::DmaConfig;
use crate::driver::error::{
    CapacityError, CapacityResult, ConfigError, DmaError, DmaResult, Result,
};
use crate::engine::{
    Cookie, DataDirection, DescriptorHandle, LockMode, PrepFlags, TransferCallback,
    TransferDirection, TransferEngine,
};
use crate::internal::constants::{DEFAULT_CMD_ELEMENTS, DEFAULT_CMD_SEGMENTS};
use crate::result::{RESULT_BUF_SIZE, ResultBuffer, ResultDump};
use crate::sg::{ScatterSegment, ScatterTable};

/// Per-device BAM transfer state.
///
/// The command script and result buffer are embedded, so their bus
/// addresses are taken from wherever the device lives. Do not move the
/// device while a submitted chain may still be running.
///
/// # Type Parameters
/// * `E` - Transfer engine
/// * `C` - Command element capacity
/// * `S` - Command segment capacity
pub struct QceDma<
    E: TransferEngine,
    const C: usize = DEFAULT_CMD_ELEMENTS,
    const S: usize = DEFAULT_CMD_SEGMENTS,
> {
    engine: E,
    /// Inbound channel: command script and input data
    rx_chan: E::Channel,
    /// Outbound channel: output data and result dump
    tx_chan: E::Channel,
    config: DmaConfig,
    transaction: Transaction<C, S>,
    result: ResultBuffer,
}

/// Device with the default 128-element, 128-segment command script
pub type QceDmaDefault<E> = QceDma<E, DEFAULT_CMD_ELEMENTS, DEFAULT_CMD_SEGMENTS>;

/// Device with a 16-element, 16-segment command script
pub type QceDmaSmall<E> = QceDma<E, 16, 16>;

impl<E: TransferEngine, const C: usize, const S: usize> QceDma<E, C, S> {
    /// Validate `config` and acquire both channels from `engine`.
    ///
    /// The transaction and result buffer start out zeroed.
    pub fn request(mut engine: E, config: DmaConfig) -> Result<Self> {
        config.validate()?;

        let rx_chan = engine.request_channel(config.rx_channel).map_err(|e| {
            warn!("inbound channel {} unavailable: {}", config.rx_channel, e.as_str());
            ConfigError::ChannelUnavailable
        })?;
        let tx_chan = engine.request_channel(config.tx_channel).map_err(|e| {
            warn!("outbound channel {} unavailable: {}", config.tx_channel, e.as_str());
            ConfigError::ChannelUnavailable
        })?;

        debug!("qce dma ready: {} command elements, {} segments", C, S);

        Ok(Self {
            engine,
            rx_chan,
            tx_chan,
            config,
            transaction: Transaction::new(),
            result: ResultBuffer::new(),
        })
    }

    /// Memory footprint of the embedded buffers in bytes
    #[must_use]
    pub const fn memory_usage() -> usize {
        Transaction::<C, S>::memory_usage() + ResultBuffer::SIZE
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Active configuration
    #[inline(always)]
    pub fn config(&self) -> &DmaConfig {
        &self.config
    }

    /// Staged command script
    #[inline(always)]
    pub fn transaction(&self) -> &Transaction<C, S> {
        &self.transaction
    }

    /// The underlying transfer engine
    #[inline(always)]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The underlying transfer engine, mutably
    #[inline(always)]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Release the engine
    pub fn into_engine(self) -> E {
        self.engine
    }

    // =========================================================================
    // Command Staging
    // =========================================================================

    /// Stage a write of `value` to the register at `offset` from the
    /// configured base.
    pub fn write(&mut self, offset: u32, value: u32) -> CapacityResult<()> {
        let address = self.config.register_address(offset);
        self.transaction.append_write(address, value).inspect_err(|e| {
            warn!("write {:x} dropped: {}", offset, e.as_str());
        })
    }

    /// Rewind the command script for the next operation.
    pub fn clear_transaction(&mut self) {
        self.transaction.reset();
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Map, build and submit the staged command script on the inbound
    /// channel, then kick both channels.
    ///
    /// # Errors
    ///
    /// - `DmaError::InvalidArgument` if nothing is staged
    /// - `DmaError::MappingFailed` if the script could not be mapped
    /// - `DmaError::ChainBuildFailed` if the engine refused to build the
    ///   chain (the script is unmapped again)
    /// - `DmaError::SubmissionRejected` if the engine refused the chain
    pub fn submit_commands(&mut self, mode: LockMode) -> Result<()> {
        if self.transaction.is_empty() {
            warn!("command submission with empty script");
            return Err(DmaError::InvalidArgument.into());
        }

        let flags = PrepFlags::CMD | mode.prep_flags();
        let list = self.transaction.scatter_list();

        let mapped = match self.engine.map(list, DataDirection::ToDevice, flags) {
            Ok(n) => n,
            Err(e) => {
                warn!("command script mapping failed: {}", e.as_str());
                0
            }
        };
        if mapped == 0 {
            return Err(DmaError::MappingFailed.into());
        }

        let descriptor = match self.engine.prep_slave_sg(
            self.rx_chan,
            list,
            TransferDirection::MemToDev,
            flags,
            None,
        ) {
            Ok(d) => d,
            Err(e) => {
                warn!("command chain build failed: {}", e.as_str());
                self.engine.unmap(list, DataDirection::ToDevice);
                return Err(DmaError::ChainBuildFailed.into());
            }
        };
        let segments = list.len();

        let handle = DescriptorHandle::new(descriptor, DataDirection::ToDevice);
        let cookie = self.submit_chain(handle)?;
        trace!(
            "command chain {} submitted: {} segments, flags {:x}",
            cookie.0,
            segments,
            flags.bits()
        );

        self.issue_pending();
        Ok(())
    }

    /// Submit the staged script without touching the pipe lock
    pub fn submit_cmd(&mut self) -> Result<()> {
        self.submit_commands(LockMode::None)
    }

    /// Submit the staged script and acquire the pipe lock
    pub fn submit_cmd_lock(&mut self) -> Result<()> {
        self.submit_commands(LockMode::Lock)
    }

    /// Submit the staged script and release the pipe lock
    pub fn submit_cmd_unlock(&mut self) -> Result<()> {
        self.submit_commands(LockMode::Unlock)
    }

    /// Build and submit the data chains of one operation.
    ///
    /// `input` goes out on the inbound channel without a callback; `output`
    /// comes back on the outbound channel and carries `callback`. Neither
    /// list is mapped here. Nothing runs until [`issue_pending`](Self::issue_pending).
    ///
    /// `callback` fires at most once, and never if a chain fails or is
    /// terminated, so callers should bound their wait.
    pub fn prep_transfer(
        &mut self,
        input: &[ScatterSegment],
        output: &[ScatterSegment],
        callback: Option<&'static dyn TransferCallback>,
    ) -> Result<()> {
        if input.is_empty() || output.is_empty() {
            warn!(
                "data transfer with empty list: {} in, {} out",
                input.len(),
                output.len()
            );
            return Err(DmaError::InvalidArgument.into());
        }

        let flags = PrepFlags::INTERRUPT | PrepFlags::CTRL_ACK;
        self.prep_chain(self.rx_chan, input, TransferDirection::MemToDev, flags, None)?;
        self.prep_chain(
            self.tx_chan,
            output,
            TransferDirection::DevToMem,
            flags,
            callback,
        )?;
        Ok(())
    }

    /// Start processing queued chains, inbound first.
    pub fn issue_pending(&mut self) {
        self.engine.issue_pending(self.rx_chan);
        self.engine.issue_pending(self.tx_chan);
    }

    /// Abort everything queued or in flight on both channels.
    ///
    /// Both channels are always attempted. The first failure is reported.
    pub fn terminate_all(&mut self) -> Result<()> {
        let rx = self.engine.terminate_all(self.rx_chan);
        let tx = self.engine.terminate_all(self.tx_chan);

        if let Err(e) = rx {
            warn!("inbound terminate failed: {}", e.as_str());
        }
        if let Err(e) = tx {
            warn!("outbound terminate failed: {}", e.as_str());
        }

        rx.and(tx).map_err(|_| DmaError::TerminationFailed.into())
    }

    // =========================================================================
    // Pipe Lock
    // =========================================================================

    /// Acquire the pipe lock with a single dummy register write.
    ///
    /// Discards anything staged.
    pub fn lock_pipe(&mut self) -> Result<()> {
        self.submit_lock_marker(LockMode::Lock)
    }

    /// Release the pipe lock with a single dummy register write.
    ///
    /// Discards anything staged.
    pub fn unlock_pipe(&mut self) -> Result<()> {
        self.submit_lock_marker(LockMode::Unlock)
    }

    // =========================================================================
    // Result Dump
    // =========================================================================

    /// Result dump written by the last completed operation
    #[inline(always)]
    pub fn result(&self) -> &ResultDump {
        self.result.dump()
    }

    /// Scatter segment covering the result dump
    pub fn result_segment(&self) -> ScatterSegment {
        self.result.segment()
    }

    /// Graft the result dump after the output data in `table` and end the
    /// table there. Returns the slot holding the dump.
    pub fn append_result<const N: usize>(
        &self,
        table: &mut ScatterTable<N>,
    ) -> CapacityResult<usize> {
        let idx = table
            .append(&[self.result_segment()], RESULT_BUF_SIZE)?
            .ok_or(CapacityError::NoFreeSlot)?;
        table.mark_end(idx);
        Ok(idx)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn prep_chain(
        &mut self,
        channel: E::Channel,
        segments: &[ScatterSegment],
        direction: TransferDirection,
        flags: PrepFlags,
        callback: Option<&'static dyn TransferCallback>,
    ) -> DmaResult<Cookie> {
        let descriptor = self
            .engine
            .prep_slave_sg(channel, segments, direction, flags, callback)
            .map_err(|e| {
                warn!("data chain build failed: {}", e.as_str());
                DmaError::ChainBuildFailed
            })?;

        let cookie = self.submit_chain(DescriptorHandle::new(
            descriptor,
            direction.data_direction(),
        ))?;
        trace!("data chain {} submitted: {} segments", cookie.0, segments.len());
        Ok(cookie)
    }

    fn submit_chain(&mut self, handle: DescriptorHandle<E::Descriptor>) -> DmaResult<Cookie> {
        let direction = handle.direction();
        self.engine.submit(handle.into_descriptor()).map_err(|e| {
            warn!("{:?} submission rejected: {}", direction, e.as_str());
            DmaError::SubmissionRejected
        })
    }

    fn submit_lock_marker(&mut self, mode: LockMode) -> Result<()> {
        self.clear_transaction();
        self.write(self.config.lock_register, 0)?;
        self.submit_commands(mode)
    }
}

// =============================================================================
// Tests
// =============================================================================
