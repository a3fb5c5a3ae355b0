//! Shared CLI helpers used across multiple commands.

use clap::Args;
use dcblock_config::{CoefficientSetting, FilterSettings};
use std::path::PathBuf;

/// Filter options shared by commands that build a filter.
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Settings file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fixed pole position R (0.9 - 0.9999)
    #[arg(long, conflicts_with = "cutoff")]
    pub coefficient: Option<f32>,

    /// Derive R from a cutoff frequency in Hz (tracks the sample rate)
    #[arg(long)]
    pub cutoff: Option<f32>,

    /// Ramp length in samples for coefficient changes
    #[arg(long, value_name = "SAMPLES")]
    pub ramp_samples: Option<u32>,
}

impl FilterArgs {
    /// Load the settings file (or defaults) and apply command-line overrides.
    pub fn settings(&self) -> anyhow::Result<FilterSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("loading settings from {}", path.display());
                FilterSettings::load(path)?
            }
            None => FilterSettings::default(),
        };

        if let Some(value) = self.coefficient {
            settings.coefficient = CoefficientSetting::Fixed { value };
        }
        if let Some(hz) = self.cutoff {
            settings.coefficient = CoefficientSetting::Cutoff { hz };
        }
        if let Some(samples) = self.ramp_samples {
            settings.ramp_duration_samples = samples;
        }
        Ok(settings)
    }
}

/// Convert linear amplitude to dB.
pub fn linear_to_db(linear: f32) -> f32 {
    20.0 * linear.max(1e-10).log10()
}

/// Per-channel mean (DC component) of an interleaved buffer.
pub fn channel_means(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 0 {
        return Vec::new();
    }
    let mut sums = vec![0.0f64; channels];
    let mut frames = 0usize;
    for frame in interleaved.chunks_exact(channels) {
        for (sum, &sample) in sums.iter_mut().zip(frame) {
            *sum += f64::from(sample);
        }
        frames += 1;
    }
    sums.into_iter()
        .map(|sum| if frames == 0 { 0.0 } else { (sum / frames as f64) as f32 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn means_per_channel() {
        let data = [1.0, -1.0, 3.0, -3.0];
        assert_eq!(channel_means(&data, 2), vec![2.0, -2.0]);
        assert_eq!(channel_means(&[], 2), vec![0.0, 0.0]);
    }

    #[test]
    fn overrides_apply() {
        let args = FilterArgs {
            config: None,
            coefficient: None,
            cutoff: Some(5.0),
            ramp_samples: Some(32),
        };
        let settings = args.settings().unwrap();
        assert_eq!(settings.coefficient, CoefficientSetting::Cutoff { hz: 5.0 });
        assert_eq!(settings.ramp_duration_samples, 32);
    }

    #[test]
    fn db_conversion() {
        assert!((linear_to_db(1.0)).abs() < 1e-6);
        assert!((linear_to_db(0.5) + 6.0206).abs() < 1e-3);
    }
}
