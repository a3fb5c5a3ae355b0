//! Host audio buffer views.
//!
//! Nodes process audio in place on storage the host owns. The [`AudioBuffer`]
//! trait is the only thing a node sees of that storage: a channel count, a
//! frame count and per-sample access. It is object-safe so a node can accept
//! any layout through `&mut dyn AudioBuffer`.
//!
//! - [`PlanarBuffer`] borrows one slice per channel.
//! - [`InterleavedBuffer`] borrows a single interleaved slice.
//! - [`MultiChannelBuffer`] owns planar storage, for hosts and tests.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Multi-channel sample storage addressed by `(channel, frame)`.
///
/// Implementations may panic on out-of-range indices; callers are expected to
/// check against [`channel_count`](Self::channel_count) and
/// [`frames`](Self::frames) first, as [`DcBlockFilter`](crate::DcBlockFilter) does.
pub trait AudioBuffer {
    /// Number of channels.
    fn channel_count(&self) -> usize;

    /// Number of addressable frames (samples per channel).
    fn frames(&self) -> usize;

    /// Read one sample.
    fn sample(&self, channel: usize, frame: usize) -> f32;

    /// Write one sample.
    fn set_sample(&mut self, channel: usize, frame: usize, value: f32);
}

/// Borrowed planar buffer: one slice per channel.
///
/// `frames()` is the length of the shortest channel.
pub struct PlanarBuffer<'a, 'b> {
    channels: &'a mut [&'b mut [f32]],
}

impl<'a, 'b> PlanarBuffer<'a, 'b> {
    /// Wrap per-channel slices.
    pub fn new(channels: &'a mut [&'b mut [f32]]) -> Self {
        Self { channels }
    }
}

impl AudioBuffer for PlanarBuffer<'_, '_> {
    fn channel_count(&self) -> usize {
        self.channels.len()
    }

    fn frames(&self) -> usize {
        self.channels.iter().map(|ch| ch.len()).min().unwrap_or(0)
    }

    #[inline]
    fn sample(&self, channel: usize, frame: usize) -> f32 {
        self.channels[channel][frame]
    }

    #[inline]
    fn set_sample(&mut self, channel: usize, frame: usize, value: f32) {
        self.channels[channel][frame] = value;
    }
}

/// Borrowed interleaved buffer (`L R L R ...` for stereo).
///
/// A trailing partial frame is not addressable.
pub struct InterleavedBuffer<'a> {
    data: &'a mut [f32],
    channels: usize,
}

impl<'a> InterleavedBuffer<'a> {
    /// Wrap an interleaved slice with the given channel stride.
    ///
    /// A stride of zero yields a buffer with no channels and no frames.
    pub fn new(data: &'a mut [f32], channels: usize) -> Self {
        Self { data, channels }
    }
}

impl AudioBuffer for InterleavedBuffer<'_> {
    fn channel_count(&self) -> usize {
        self.channels
    }

    fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.data.len() / self.channels
        }
    }

    #[inline]
    fn sample(&self, channel: usize, frame: usize) -> f32 {
        debug_assert!(channel < self.channels);
        self.data[frame * self.channels + channel]
    }

    #[inline]
    fn set_sample(&mut self, channel: usize, frame: usize, value: f32) {
        debug_assert!(channel < self.channels);
        self.data[frame * self.channels + channel] = value;
    }
}

/// Owned planar buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiChannelBuffer {
    channels: Vec<Vec<f32>>,
}

impl MultiChannelBuffer {
    /// Creates a zeroed buffer with `channel_count` channels of `frames` samples.
    pub fn new(channel_count: usize, frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; frames]; channel_count],
        }
    }

    /// Builds a buffer from per-channel sample vectors.
    ///
    /// Channels may differ in length; `frames()` reports the shortest.
    pub fn from_channels(channels: Vec<Vec<f32>>) -> Self {
        Self { channels }
    }

    /// Deinterleaves `data` into `channel_count` channels, dropping any trailing partial frame.
    pub fn from_interleaved(data: &[f32], channel_count: usize) -> Self {
        if channel_count == 0 {
            return Self::new(0, 0);
        }
        let frames = data.len() / channel_count;
        let mut buffer = Self::new(channel_count, frames);
        for (frame, chunk) in data.chunks_exact(channel_count).enumerate() {
            for (channel, &sample) in chunk.iter().enumerate() {
                buffer.channels[channel][frame] = sample;
            }
        }
        buffer
    }

    /// Interleaves the buffer into a new vector.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let frames = self.frames();
        let mut out = Vec::with_capacity(frames * self.channels.len());
        for frame in 0..frames {
            for channel in &self.channels {
                out.push(channel[frame]);
            }
        }
        out
    }

    /// Samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= channel_count()`.
    pub fn channel(&self, channel: usize) -> &[f32] {
        &self.channels[channel]
    }

    /// Mutable samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= channel_count()`.
    pub fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        &mut self.channels[channel]
    }

    /// Fills every channel with zeros.
    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.fill(0.0);
        }
    }

    /// Resizes every channel to `frames`, zeroing new samples.
    pub fn resize(&mut self, frames: usize) {
        for channel in &mut self.channels {
            channel.resize(frames, 0.0);
        }
    }
}

impl AudioBuffer for MultiChannelBuffer {
    fn channel_count(&self) -> usize {
        self.channels.len()
    }

    fn frames(&self) -> usize {
        self.channels.iter().map(Vec::len).min().unwrap_or(0)
    }

    #[inline]
    fn sample(&self, channel: usize, frame: usize) -> f32 {
        self.channels[channel][frame]
    }

    #[inline]
    fn set_sample(&mut self, channel: usize, frame: usize, value: f32) {
        self.channels[channel][frame] = value;
    }
}
