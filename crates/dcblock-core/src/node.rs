//! The capability trait every effect node implements.
//!
//! The host drives a node through a small lifecycle:
//!
//! ```text
//! Uninitialized --init--> Ready --process*--> Ready --deinit--> Uninitialized
//! ```
//!
//! ## Threading
//!
//! - `init` / `deinit` run on a control thread and are the only operations
//!   allowed to allocate.
//! - `process` runs on the render thread under a hard deadline: it must not
//!   allocate, lock, block or log.
//!
//! The host guarantees that reconfiguration never overlaps an in-flight
//! `process` call on the same node, so implementations need no internal
//! locking.

use crate::buffer::AudioBuffer;
use crate::error::NodeError;

/// Object-safe lifecycle and processing interface for an effect node.
///
/// # Example
///
/// ```rust
/// use dcblock_core::{AudioBuffer, AudioNode, NodeError};
///
/// struct Silence {
///     channels: Option<usize>,
/// }
///
/// impl AudioNode for Silence {
///     fn init(&mut self, channel_count: usize, sample_rate: f32) -> Result<(), NodeError> {
///         if channel_count == 0 || !(sample_rate > 0.0) {
///             return Err(NodeError::InvalidConfiguration("bad geometry"));
///         }
///         self.channels = Some(channel_count);
///         Ok(())
///     }
///
///     fn deinit(&mut self) {
///         self.channels = None;
///     }
///
///     fn process(
///         &mut self,
///         buffer: &mut dyn AudioBuffer,
///         frame_count: usize,
///         buffer_offset: usize,
///     ) -> Result<(), NodeError> {
///         self.channels.ok_or(NodeError::UninitializedState)?;
///         for ch in 0..buffer.channel_count() {
///             for i in buffer_offset..buffer_offset + frame_count {
///                 buffer.set_sample(ch, i, 0.0);
///             }
///         }
///         Ok(())
///     }
///
///     fn reset(&mut self) -> Result<(), NodeError> {
///         self.channels.map(|_| ()).ok_or(NodeError::UninitializedState)
///     }
///
///     fn is_initialized(&self) -> bool {
///         self.channels.is_some()
///     }
/// }
/// ```
pub trait AudioNode {
    /// Allocate per-channel state for `channel_count` channels at `sample_rate`.
    ///
    /// Calling `init` on a Ready node is a destructive reconfiguration: all
    /// previous state is discarded and the new state starts at zero.
    fn init(&mut self, channel_count: usize, sample_rate: f32) -> Result<(), NodeError>;

    /// Release all per-channel state. Idempotent.
    fn deinit(&mut self);

    /// Process `frame_count` frames in place, starting at frame `buffer_offset`.
    ///
    /// Real-time safe: no allocation, locking or I/O. A `frame_count` of zero
    /// is a no-op.
    fn process(
        &mut self,
        buffer: &mut dyn AudioBuffer,
        frame_count: usize,
        buffer_offset: usize,
    ) -> Result<(), NodeError>;

    /// Clear processing history without reallocating.
    fn reset(&mut self) -> Result<(), NodeError>;

    /// True between a successful `init` and the next `deinit`.
    fn is_initialized(&self) -> bool;

    /// Processing latency in samples. Most nodes have none.
    fn latency_samples(&self) -> usize {
        0
    }
}
