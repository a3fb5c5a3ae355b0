//! Errors reported at the node/host boundary.
//!
//! All of these are programming or configuration errors. None is retried
//! internally; the filter math itself never fails for finite input.

/// Errors returned by [`AudioNode`](crate::AudioNode) operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeError {
    /// `init` was called with a zero channel count or a non-positive/non-finite sample rate.
    InvalidConfiguration(&'static str),
    /// An operation that needs a Ready node was called before `init` or after `deinit`.
    UninitializedState,
    /// The buffer's channel count differs from the count fixed at `init`.
    ChannelCountMismatch {
        /// Channel count fixed at `init`.
        expected: usize,
        /// Channel count presented by the buffer.
        actual: usize,
    },
    /// `buffer_offset + frame_count` runs past the end of the buffer.
    BufferTooShort {
        /// Frames the call needs to address.
        required: usize,
        /// Frames the buffer actually holds.
        available: usize,
    },
}

impl core::fmt::Display for NodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidConfiguration(reason) => write!(f, "invalid configuration: {reason}"),
            Self::UninitializedState => write!(f, "node is not initialized"),
            Self::ChannelCountMismatch { expected, actual } => {
                write!(f, "expected {expected} channels, buffer has {actual}")
            }
            Self::BufferTooShort {
                required,
                available,
            } => write!(f, "buffer holds {available} frames, {required} required"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NodeError {}
