//! dcblock Core - real-time multi-channel DC-offset removal
//!
//! This crate provides a DC blocking filter for use inside an audio processing
//! graph, designed for real-time processing with zero allocation in the audio
//! path.
//!
//! # Core Abstractions
//!
//! - [`AudioNode`] - Object-safe lifecycle trait (`init` / `process` / `deinit`)
//! - [`DcBlockFilter`] - One single-pole highpass per channel, filtered in place
//! - [`ParameterRamp`] - Linear ramps for click-free parameter changes
//! - [`AudioBuffer`] - Host buffer view ([`PlanarBuffer`], [`InterleavedBuffer`],
//!   [`MultiChannelBuffer`])
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dcblock-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use dcblock_core::{AudioNode, DcBlockFilter, InterleavedBuffer};
//!
//! let mut filter = DcBlockFilter::new();
//! filter.init(2, 44100.0)?;
//!
//! // Host-owned interleaved stereo block with a DC offset
//! let mut block = vec![0.2f32; 2 * 512];
//! let mut view = InterleavedBuffer::new(&mut block, 2);
//!
//! // Render callback: filter the first 256 frames, then the rest
//! filter.process(&mut view, 256, 0)?;
//! filter.process(&mut view, 256, 256)?;
//!
//! filter.deinit();
//! # Ok::<(), dcblock_core::NodeError>(())
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations, locks or logging in `process`
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Object-safe traits**: Hosts hold nodes as `Box<dyn AudioNode>`

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod buffer;
pub mod dc_block;
pub mod error;
pub mod node;
pub mod ramp;

// Re-export main types at crate root
pub use buffer::{AudioBuffer, InterleavedBuffer, MultiChannelBuffer, PlanarBuffer};
pub use dc_block::{
    ChannelState, CoefficientMode, DEFAULT_COEFFICIENT, DcBlockFilter, FilterConfig,
    MAX_COEFFICIENT, MIN_COEFFICIENT, coefficient_for_cutoff,
};
pub use error::NodeError;
pub use node::AudioNode;
pub use ramp::{DEFAULT_RAMP_DURATION_SAMPLES, ParameterRamp};
