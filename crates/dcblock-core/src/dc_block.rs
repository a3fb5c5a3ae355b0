//! Multi-channel DC blocking filter.
//!
//! Each channel runs an independent first-order highpass (Julius O. Smith's
//! DC blocker):
//!
//! ```text
//! y[n] = x[n] - x[n-1] + R * y[n-1]
//! H(z) = (1 - z^-1) / (1 - R * z^-1)
//! ```
//!
//! `R` is the pole position. Closer to 1.0 gives a lower cutoff and slower
//! settling; with `0 < R < 1` the filter is unconditionally stable, so finite
//! input always yields finite output.
//!
//! By default `R` is the fixed constant [`DEFAULT_COEFFICIENT`] (0.995),
//! independent of sample rate. [`CoefficientMode::Cutoff`] derives `R` from a
//! cutoff frequency instead, so the cutoff stays put across sample rates.
//!
//! Reference: Julius O. Smith, "Introduction to Digital Filters with Audio
//! Applications", Chapter on DC Blocker.

use core::f32::consts::PI;

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::buffer::AudioBuffer;
use crate::error::NodeError;
use crate::node::AudioNode;
use crate::ramp::{DEFAULT_RAMP_DURATION_SAMPLES, ParameterRamp};

/// Reference pole position.
pub const DEFAULT_COEFFICIENT: f32 = 0.995;

/// Smallest coefficient the filter accepts.
pub const MIN_COEFFICIENT: f32 = 0.9;

/// Largest coefficient the filter accepts.
pub const MAX_COEFFICIENT: f32 = 0.9999;

/// Sample rate assumed for diagnostics and cutoff resolution before `init`.
const FALLBACK_SAMPLE_RATE: f32 = 48000.0;

/// How the pole position `R` is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoefficientMode {
    /// A constant `R`, independent of sample rate.
    Fixed(f32),
    /// `R = 1 - 2*pi*fc/fs`, recomputed whenever the sample rate is (re)set.
    Cutoff(f32),
}

impl CoefficientMode {
    /// Resolve to a clamped coefficient for the given sample rate.
    pub fn resolve(self, sample_rate: f32) -> f32 {
        match self {
            Self::Fixed(r) => clamp_coefficient(r),
            Self::Cutoff(cutoff_hz) => coefficient_for_cutoff(cutoff_hz, sample_rate),
        }
    }
}

impl Default for CoefficientMode {
    fn default() -> Self {
        Self::Fixed(DEFAULT_COEFFICIENT)
    }
}

/// Clamp `r` to `[MIN_COEFFICIENT, MAX_COEFFICIENT]`. NaN maps to the default.
fn clamp_coefficient(r: f32) -> f32 {
    if r.is_nan() {
        DEFAULT_COEFFICIENT
    } else {
        r.clamp(MIN_COEFFICIENT, MAX_COEFFICIENT)
    }
}

/// Calculate the R coefficient for a desired cutoff frequency.
///
/// Formula: R = 1 - 2*pi*fc/fs
pub fn coefficient_for_cutoff(cutoff_hz: f32, sample_rate: f32) -> f32 {
    clamp_coefficient(1.0 - (2.0 * PI * cutoff_hz / sample_rate))
}

/// Immutable-until-`init` filter geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    channel_count: usize,
    sample_rate: f32,
}

impl FilterConfig {
    /// Validate and build a configuration.
    ///
    /// Requires `channel_count >= 1` and a finite `sample_rate > 0`.
    pub fn new(channel_count: usize, sample_rate: f32) -> Result<Self, NodeError> {
        if channel_count == 0 {
            return Err(NodeError::InvalidConfiguration(
                "channel count must be at least 1",
            ));
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(NodeError::InvalidConfiguration(
                "sample rate must be positive and finite",
            ));
        }
        Ok(Self {
            channel_count,
            sample_rate,
        })
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

/// Per-channel filter memory.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelState {
    /// Previous input sample x[n-1]
    pub previous_input: f32,
    /// Previous output sample y[n-1]
    pub previous_output: f32,
}

impl ChannelState {
    /// Run one sample through the recurrence and update the memory.
    #[inline]
    pub fn process(&mut self, input: f32, coefficient: f32) -> f32 {
        let output = input - self.previous_input + coefficient * self.previous_output;
        self.previous_input = input;
        self.previous_output = output;
        output
    }
}

/// Multi-channel DC blocker with a ramped coefficient.
///
/// ## Lifecycle
///
/// Created Uninitialized. [`init`](AudioNode::init) allocates one zeroed
/// [`ChannelState`] per channel; [`process`](AudioNode::process) filters a
/// slice of a host buffer in place; [`deinit`](AudioNode::deinit) frees the
/// state.
///
/// ## Parameters
/// - coefficient: pole position `R`, ramped over
///   [`ramp_duration_samples`](Self::ramp_duration_samples) when changed on a
///   Ready filter. Clamped to `[0.9, 0.9999]`.
///
/// ## Example
///
/// ```rust
/// use dcblock_core::{AudioNode, DcBlockFilter, MultiChannelBuffer};
///
/// let mut filter = DcBlockFilter::new();
/// filter.init(2, 48000.0).unwrap();
///
/// let mut buffer = MultiChannelBuffer::from_channels(vec![vec![0.5; 256], vec![-0.25; 256]]);
/// filter.process(&mut buffer, 256, 0).unwrap();
///
/// // The first sample passes; the offset then decays geometrically.
/// assert_eq!(buffer.channel(0)[0], 0.5);
/// assert!(buffer.channel(0)[255].abs() < 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct DcBlockFilter {
    /// One entry per channel while Ready, empty otherwise
    channels: Vec<ChannelState>,
    /// `Some` exactly while Ready
    config: Option<FilterConfig>,
    mode: CoefficientMode,
    coefficient: ParameterRamp,
    ramp_duration_samples: u32,
    started: bool,
}

impl DcBlockFilter {
    /// Create an uninitialized filter with the reference coefficient.
    pub fn new() -> Self {
        Self::with_mode(CoefficientMode::default())
    }

    /// Create an uninitialized filter with the given coefficient mode.
    pub fn with_mode(mode: CoefficientMode) -> Self {
        let initial = mode.resolve(FALLBACK_SAMPLE_RATE);
        Self {
            channels: Vec::new(),
            config: None,
            mode,
            coefficient: ParameterRamp::new(initial, DEFAULT_RAMP_DURATION_SAMPLES),
            ramp_duration_samples: DEFAULT_RAMP_DURATION_SAMPLES,
            started: true,
        }
    }

    /// Create and initialize a filter in one step.
    pub fn with_config(channel_count: usize, sample_rate: f32) -> Result<Self, NodeError> {
        let mut filter = Self::new();
        filter.init(channel_count, sample_rate)?;
        Ok(filter)
    }

    /// Ramp length used for coefficient changes.
    pub fn ramp_duration_samples(&self) -> u32 {
        self.ramp_duration_samples
    }

    /// Override the ramp length (zero is treated as one sample).
    pub fn set_ramp_duration_samples(&mut self, samples: u32) {
        self.ramp_duration_samples = samples.max(1);
        self.coefficient.set_total_steps(self.ramp_duration_samples);
    }

    /// Set a fixed coefficient.
    ///
    /// On a Ready filter the coefficient ramps to the new value; otherwise it
    /// takes effect at the next `init`.
    pub fn set_coefficient(&mut self, coefficient: f32) {
        self.set_mode(CoefficientMode::Fixed(coefficient));
    }

    /// Derive the coefficient from a cutoff frequency (sample-rate dependent).
    pub fn set_cutoff_hz(&mut self, cutoff_hz: f32) {
        self.set_mode(CoefficientMode::Cutoff(cutoff_hz));
    }

    /// Change the coefficient mode, ramping when Ready.
    ///
    /// Before `init` the value is applied immediately, with cutoffs resolved
    /// at 48 kHz until the real sample rate is known.
    pub fn set_mode(&mut self, mode: CoefficientMode) {
        self.mode = mode;
        if let Some(config) = self.config {
            let target = mode.resolve(config.sample_rate);
            self.coefficient.set_target(target);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "dc_block: coefficient ramp {} -> {target} over {} samples",
                self.coefficient.value(),
                self.ramp_duration_samples
            );
        } else {
            self.coefficient.set_immediate(mode.resolve(FALLBACK_SAMPLE_RATE));
        }
    }

    /// Active coefficient mode.
    pub fn mode(&self) -> CoefficientMode {
        self.mode
    }

    /// Coefficient in use for the most recent sample.
    pub fn coefficient(&self) -> f32 {
        self.coefficient.value()
    }

    /// Coefficient the ramp is heading to.
    pub fn target_coefficient(&self) -> f32 {
        self.coefficient.target()
    }

    /// True while a coefficient change is still ramping.
    pub fn is_ramping(&self) -> bool {
        !self.coefficient.is_settled()
    }

    /// Geometry fixed at the last `init`, if Ready.
    pub fn config(&self) -> Option<FilterConfig> {
        self.config
    }

    /// Number of channels while Ready, zero otherwise.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Filter memory of one channel.
    pub fn channel_state(&self, channel: usize) -> Option<&ChannelState> {
        self.channels.get(channel)
    }

    /// Resume filtering.
    pub fn start(&mut self) {
        self.started = true;
    }

    /// Bypass: the buffer is left untouched and channel memory frozen, while
    /// the coefficient ramp keeps advancing with the frames.
    pub fn stop(&mut self) {
        self.started = false;
    }

    /// False while bypassed.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// -3 dB cutoff of the target coefficient: `(1 - R) * fs / (2*pi)`.
    ///
    /// Uses 48 kHz when the filter is not initialized.
    pub fn cutoff_hz(&self) -> f32 {
        let r = self.coefficient.target();
        (1.0 - r) * self.sample_rate_or_default() / (2.0 * PI)
    }

    /// Magnitude of `H(e^jw)` at `freq_hz` for the target coefficient.
    ///
    /// `|H|^2 = (2 - 2cos w) / (1 - 2R cos w + R^2)`
    pub fn magnitude_response(&self, freq_hz: f32) -> f32 {
        let r = self.coefficient.target();
        let w = 2.0 * PI * freq_hz / self.sample_rate_or_default();
        let cos_w = libm::cosf(w);
        let numerator = 2.0 - 2.0 * cos_w;
        let denominator = 1.0 - 2.0 * r * cos_w + r * r;
        libm::sqrtf(numerator / denominator)
    }

    fn sample_rate_or_default(&self) -> f32 {
        self.config.map_or(FALLBACK_SAMPLE_RATE, |c| c.sample_rate)
    }

    fn check_geometry(
        &self,
        buffer: &dyn AudioBuffer,
        frame_count: usize,
        buffer_offset: usize,
    ) -> Result<(), NodeError> {
        if buffer.channel_count() != self.channels.len() {
            return Err(NodeError::ChannelCountMismatch {
                expected: self.channels.len(),
                actual: buffer.channel_count(),
            });
        }
        let available = buffer.frames();
        match buffer_offset.checked_add(frame_count) {
            Some(required) if required <= available => Ok(()),
            required => Err(NodeError::BufferTooShort {
                required: required.unwrap_or(usize::MAX),
                available,
            }),
        }
    }
}

impl Default for DcBlockFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioNode for DcBlockFilter {
    fn init(&mut self, channel_count: usize, sample_rate: f32) -> Result<(), NodeError> {
        let config = FilterConfig::new(channel_count, sample_rate)?;

        self.channels = vec![ChannelState::default(); channel_count];
        self.config = Some(config);
        self.coefficient.set_total_steps(self.ramp_duration_samples);
        self.coefficient.set_immediate(self.mode.resolve(sample_rate));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "dc_block init: {channel_count} channels @ {sample_rate} Hz, R = {}",
            self.coefficient.value()
        );
        Ok(())
    }

    fn deinit(&mut self) {
        if self.config.take().is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!("dc_block deinit: {} channels released", self.channels.len());
        }
        self.channels = Vec::new();
    }

    fn process(
        &mut self,
        buffer: &mut dyn AudioBuffer,
        frame_count: usize,
        buffer_offset: usize,
    ) -> Result<(), NodeError> {
        if self.config.is_none() {
            return Err(NodeError::UninitializedState);
        }
        if frame_count == 0 {
            return Ok(());
        }
        self.check_geometry(buffer, frame_count, buffer_offset)?;

        // Frame-major so the ramp ticks exactly once per sample period.
        for frame in buffer_offset..buffer_offset + frame_count {
            let coefficient = self.coefficient.tick();
            if !self.started {
                continue;
            }
            for (channel, state) in self.channels.iter_mut().enumerate() {
                let input = buffer.sample(channel, frame);
                buffer.set_sample(channel, frame, state.process(input, coefficient));
            }
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<(), NodeError> {
        if self.config.is_none() {
            return Err(NodeError::UninitializedState);
        }
        self.channels.fill(ChannelState::default());
        self.coefficient.snap_to_target();
        #[cfg(feature = "tracing")]
        tracing::debug!("dc_block reset: {} channels", self.channels.len());
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.config.is_some()
    }
}
