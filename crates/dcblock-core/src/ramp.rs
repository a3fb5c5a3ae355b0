//! Linear parameter ramping for click-free control changes.
//!
//! Every adjustable value a node exposes to its host goes through a
//! [`ParameterRamp`]. Setting a new target never steps the value; instead the
//! ramp walks linearly from wherever it currently is to the target over a
//! fixed number of samples.
//!
//! Ramps are advanced by the caller, once per sample, inline with audio
//! processing. There is no timer: a ramp only moves when [`ParameterRamp::tick`]
//! is called from the render loop.
//!
//! ## Usage
//!
//! ```rust
//! use dcblock_core::ParameterRamp;
//!
//! let mut ramp = ParameterRamp::new(0.0, 4);
//! ramp.set_target(1.0);
//!
//! let values: Vec<f32> = (0..4).map(|_| ramp.tick()).collect();
//! assert_eq!(values, [0.25, 0.5, 0.75, 1.0]);
//! assert!(ramp.is_settled());
//! ```

/// Default ramp duration in samples (~0.2 s at 48 kHz).
///
/// Hosts may override it per node before first use.
pub const DEFAULT_RAMP_DURATION_SAMPLES: u32 = 10_000;

/// A control value that moves linearly toward its target over `total_steps` samples.
///
/// Invariants:
/// - `0 <= remaining_steps <= total_steps`
/// - `remaining_steps == 0` implies `value() == target()`
///
/// The ramp performs no range checking. Clamping belongs to whichever control
/// is being ramped.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRamp {
    /// Current (possibly mid-ramp) value
    current: f32,
    /// Value being ramped towards
    target: f32,
    /// Samples left until `current == target`
    remaining_steps: u32,
    /// Length of a full ramp in samples (always >= 1)
    total_steps: u32,
}

impl ParameterRamp {
    /// Create a settled ramp at `initial` with the given ramp length.
    ///
    /// A `total_steps` of zero is treated as one sample.
    pub fn new(initial: f32, total_steps: u32) -> Self {
        Self {
            current: initial,
            target: initial,
            remaining_steps: 0,
            total_steps: total_steps.max(1),
        }
    }

    /// Create a settled ramp using [`DEFAULT_RAMP_DURATION_SAMPLES`].
    pub fn with_default_duration(initial: f32) -> Self {
        Self::new(initial, DEFAULT_RAMP_DURATION_SAMPLES)
    }

    /// Start ramping toward `value`.
    ///
    /// The ramp restarts from the current value and arrives after exactly
    /// `total_steps` further calls to [`tick`](Self::tick), even if a previous
    /// ramp was still in flight.
    #[inline]
    pub fn set_target(&mut self, value: f32) {
        self.target = value;
        self.remaining_steps = self.total_steps;
    }

    /// Jump to `value` without ramping.
    ///
    /// Intended for the first assignment, before any audio has played.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.remaining_steps = 0;
    }

    /// Advance the ramp by one sample and return the value to use for it.
    ///
    /// No-op when already at target.
    #[inline]
    pub fn tick(&mut self) -> f32 {
        if self.remaining_steps > 0 {
            // (target - current) / remaining is constant across a ramp, so
            // this is a linear walk; the last step snaps to avoid rounding drift.
            self.current += (self.target - self.current) / self.remaining_steps as f32;
            self.remaining_steps -= 1;
            if self.remaining_steps == 0 {
                self.current = self.target;
            }
        }
        self.current
    }

    /// Current value without advancing.
    #[inline]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Samples left until the target is reached.
    #[inline]
    pub fn remaining_steps(&self) -> u32 {
        self.remaining_steps
    }

    /// Length of a full ramp in samples.
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Change the ramp length.
    ///
    /// Takes effect for the next [`set_target`](Self::set_target). An in-flight
    /// ramp keeps going but is shortened if it now exceeds the new length.
    pub fn set_total_steps(&mut self, total_steps: u32) {
        self.total_steps = total_steps.max(1);
        self.remaining_steps = self.remaining_steps.min(self.total_steps);
    }

    /// True once the ramp has arrived at its target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.remaining_steps == 0
    }

    /// Finish the ramp immediately.
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
        self.remaining_steps = 0;
    }
}

impl Default for ParameterRamp {
    fn default() -> Self {
        Self::with_default_duration(0.0)
    }
}
