//! Configuration for dcblock filter nodes.
//!
//! Filter settings live in small TOML files. This crate loads, validates and
//! saves them, and turns them into an initialized
//! [`DcBlockFilter`](dcblock_core::DcBlockFilter).
//!
//! # Example
//!
//! ```rust,no_run
//! use dcblock_config::{CoefficientSetting, FilterSettings};
//!
//! // Load settings from file
//! let settings = FilterSettings::load("dcblock.toml").unwrap();
//!
//! // Or build them programmatically
//! let settings = FilterSettings {
//!     channels: 2,
//!     sample_rate: 44100.0,
//!     coefficient: CoefficientSetting::Cutoff { hz: 5.0 },
//!     ..FilterSettings::default()
//! };
//!
//! let filter = settings.build().unwrap();
//! settings.save("dcblock.toml").unwrap();
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{CoefficientSetting, FilterSettings};
