//! Display the filter's coefficient and frequency response.

use super::common::{FilterArgs, linear_to_db};
use clap::Args;
use dcblock_core::CoefficientMode;

/// Frequencies at which the response is reported.
const PROBE_FREQUENCIES_HZ: &[f32] = &[1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 1000.0];

/// Display filter information.
#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Sample rate to evaluate at (overrides the settings file)
    #[arg(long)]
    sample_rate: Option<f32>,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let settings = args.filter.settings()?;
    let sample_rate = args.sample_rate.unwrap_or(settings.sample_rate);
    let filter = settings.build_for(1, sample_rate)?;

    let mode = match filter.mode() {
        CoefficientMode::Fixed(_) => "fixed".to_string(),
        CoefficientMode::Cutoff(hz) => format!("cutoff ({hz} Hz)"),
    };

    println!("Mode:        {mode}");
    println!("Sample Rate: {sample_rate} Hz");
    println!("Coefficient: {:.6}", filter.coefficient());
    println!("Cutoff:      {:.2} Hz (-3 dB)", filter.cutoff_hz());
    println!("Ramp:        {} samples", filter.ramp_duration_samples());
    println!("\nResponse:");
    for &freq in PROBE_FREQUENCIES_HZ {
        if freq >= sample_rate / 2.0 {
            continue;
        }
        let gain = filter.magnitude_response(freq);
        println!("  {freq:>7.1} Hz  {:>7.2} dB", linear_to_db(gain));
    }

    Ok(())
}
