//! File-based DC removal command.

use super::common::{FilterArgs, channel_means, linear_to_db};
use crate::wav::{WavSpec, read_wav_interleaved, write_wav};
use clap::Args;
use dcblock_core::{AudioNode, InterleavedBuffer};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    filter: FilterArgs,

    /// Frames per process call
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("--block-size must be at least 1");
    }

    let settings = args.filter.settings()?;

    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = read_wav_interleaved(&args.input)?;
    let channels = spec.channels as usize;
    let frames = samples.len() / channels.max(1);
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames x {} channels, {} Hz, {:.2}s",
        frames,
        channels,
        spec.sample_rate,
        frames as f32 / sample_rate
    );

    let mut filter = settings.build_for(channels, sample_rate)?;
    tracing::info!(
        channels,
        sample_rate,
        coefficient = filter.coefficient(),
        cutoff_hz = filter.cutoff_hz(),
        "filter ready"
    );

    let dc_before = channel_means(&samples, channels);

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    {
        // One host buffer for the whole file; each block is a process call at an offset.
        let mut buffer = InterleavedBuffer::new(&mut samples, channels);
        let mut offset = 0;
        while offset < frames {
            let frame_count = args.block_size.min(frames - offset);
            filter.process(&mut buffer, frame_count, offset)?;
            offset += frame_count;
            pb.set_position(offset as u64);
        }
    }
    pb.finish_with_message("done");
    filter.deinit();

    let dc_after = channel_means(&samples, channels);

    println!("\nDC offset per channel:");
    for (channel, (before, after)) in dc_before.iter().zip(&dc_after).enumerate() {
        println!(
            "  ch{channel}: {before:+.6} ({:.1} dB) -> {after:+.6} ({:.1} dB)",
            linear_to_db(before.abs()),
            linear_to_db(after.abs())
        );
    }

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };
    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &samples, out_spec)?;
    tracing::info!(output = %args.output.display(), "done");

    Ok(())
}
