//! Filter settings file format and operations.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;

use dcblock_core::{
    AudioNode, CoefficientMode, DEFAULT_COEFFICIENT, DEFAULT_RAMP_DURATION_SAMPLES,
    DcBlockFilter, MAX_COEFFICIENT, MIN_COEFFICIENT,
};

use crate::error::ConfigError;

/// How the filter's pole position is chosen.
///
/// Serialized with a `mode` tag:
///
/// ```toml
/// [coefficient]
/// mode = "fixed"
/// value = 0.995
/// ```
///
/// or
///
/// ```toml
/// [coefficient]
/// mode = "cutoff"
/// hz = 7.0
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CoefficientSetting {
    /// Constant pole position, independent of sample rate.
    Fixed {
        /// Pole position R, in [0.9, 0.9999].
        value: f32,
    },
    /// Pole position derived from a cutoff frequency at the running sample rate.
    Cutoff {
        /// -3 dB cutoff in Hz.
        hz: f32,
    },
}

impl Default for CoefficientSetting {
    fn default() -> Self {
        Self::Fixed {
            value: DEFAULT_COEFFICIENT,
        }
    }
}

impl From<CoefficientSetting> for CoefficientMode {
    fn from(setting: CoefficientSetting) -> Self {
        match setting {
            CoefficientSetting::Fixed { value } => CoefficientMode::Fixed(value),
            CoefficientSetting::Cutoff { hz } => CoefficientMode::Cutoff(hz),
        }
    }
}

/// Settings for one DC blocking filter node.
///
/// Every field has a default, so an empty file is valid.
///
/// # TOML Format
///
/// ```toml
/// channels = 2
/// sample_rate = 48000.0
/// ramp_duration_samples = 10000
///
/// [coefficient]
/// mode = "fixed"
/// value = 0.995
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterSettings {
    /// Channel count used by [`build`](Self::build).
    pub channels: usize,

    /// Sample rate in Hz used by [`build`](Self::build).
    pub sample_rate: f32,

    /// Ramp length in samples for coefficient changes.
    pub ramp_duration_samples: u32,

    /// Pole position selection.
    pub coefficient: CoefficientSetting,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000.0,
            ramp_duration_samples: DEFAULT_RAMP_DURATION_SAMPLES,
            coefficient: CoefficientSetting::default(),
        }
    }
}

impl FilterSettings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save settings to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the settings to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field against the ranges the filter accepts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_geometry(self.channels, self.sample_rate)?;
        self.validate_coefficient(self.sample_rate)
    }

    fn validate_coefficient(&self, sample_rate: f32) -> Result<(), ConfigError> {
        match self.coefficient {
            CoefficientSetting::Fixed { value } => {
                if !(MIN_COEFFICIENT..=MAX_COEFFICIENT).contains(&value) {
                    return Err(ConfigError::invalid(
                        "coefficient.value",
                        format!("{value} is outside [{MIN_COEFFICIENT}, {MAX_COEFFICIENT}]"),
                    ));
                }
            }
            CoefficientSetting::Cutoff { hz } => {
                // The filter clamps R, so only cutoffs mapping into its range are honored
                let r = 1.0 - 2.0 * PI * hz / sample_rate;
                if !hz.is_finite() || !(MIN_COEFFICIENT..=MAX_COEFFICIENT).contains(&r) {
                    let (low, high) = cutoff_range(sample_rate);
                    return Err(ConfigError::invalid(
                        "coefficient.hz",
                        format!("{hz} Hz is outside [{low:.2}, {high:.2}] Hz at {sample_rate} Hz"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Build an initialized filter using the configured geometry.
    pub fn build(&self) -> Result<DcBlockFilter, ConfigError> {
        self.build_for(self.channels, self.sample_rate)
    }

    /// Build an initialized filter for a geometry decided elsewhere (e.g. by an input file).
    pub fn build_for(
        &self,
        channels: usize,
        sample_rate: f32,
    ) -> Result<DcBlockFilter, ConfigError> {
        validate_geometry(channels, sample_rate)?;
        self.validate_coefficient(sample_rate)?;

        let mut filter = DcBlockFilter::with_mode(self.coefficient.into());
        filter.set_ramp_duration_samples(self.ramp_duration_samples);
        filter.init(channels, sample_rate)?;
        Ok(filter)
    }
}

/// Cutoff frequencies (Hz) whose coefficient falls inside the accepted range.
fn cutoff_range(sample_rate: f32) -> (f32, f32) {
    let hz_for = |r: f32| (1.0 - r) * sample_rate / (2.0 * PI);
    (hz_for(MAX_COEFFICIENT), hz_for(MIN_COEFFICIENT))
}

fn validate_geometry(channels: usize, sample_rate: f32) -> Result<(), ConfigError> {
    if channels == 0 {
        return Err(ConfigError::invalid("channels", "must be at least 1"));
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(ConfigError::invalid(
            "sample_rate",
            format!("{sample_rate} must be positive and finite"),
        ));
    }
    Ok(())
}
