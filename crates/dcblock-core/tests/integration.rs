//! Integration tests for dcblock-core.
//!
//! Exercises the host-facing lifecycle end to end: init/process/deinit state
//! transitions, reconfiguration, block-wise processing with buffer offsets,
//! buffer layouts, channel independence, and DC rejection measured on real
//! signals.

use dcblock_core::{
    AudioBuffer, AudioNode, ChannelState, DcBlockFilter, InterleavedBuffer, MultiChannelBuffer,
    NodeError, PlanarBuffer,
};

const SAMPLE_RATE: f32 = 48000.0;
const TAU: f32 = core::f32::consts::TAU;

/// Generate a sine wave buffer at the given frequency and sample rate.
fn generate_sine(freq_hz: f32, sample_rate: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| libm::sinf(TAU * freq_hz * n as f32 / sample_rate))
        .collect()
}

/// Mean of a signal (its DC component).
fn mean(signal: &[f32]) -> f32 {
    signal.iter().sum::<f32>() / signal.len() as f32
}

// ============================================================================
// 1. Lifecycle
// ============================================================================

#[test]
fn process_before_init_is_uninitialized() {
    let mut filter = DcBlockFilter::new();
    let mut buffer = MultiChannelBuffer::new(2, 16);
    assert_eq!(
        filter.process(&mut buffer, 16, 0),
        Err(NodeError::UninitializedState)
    );
}

#[test]
fn process_after_deinit_is_uninitialized() {
    let mut filter = DcBlockFilter::with_config(2, SAMPLE_RATE).unwrap();
    let mut buffer = MultiChannelBuffer::new(2, 16);
    filter.process(&mut buffer, 16, 0).unwrap();

    filter.deinit();
    assert_eq!(
        filter.process(&mut buffer, 16, 0),
        Err(NodeError::UninitializedState)
    );
    // Zero frames still needs a Ready node
    assert_eq!(
        filter.process(&mut buffer, 0, 0),
        Err(NodeError::UninitializedState)
    );
}

#[test]
fn init_rejects_zero_channels() {
    let mut filter = DcBlockFilter::new();
    assert!(matches!(
        filter.init(0, 44100.0),
        Err(NodeError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        filter.init(1, -44100.0),
        Err(NodeError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        filter.init(1, f32::INFINITY),
        Err(NodeError::InvalidConfiguration(_))
    ));
}

#[test]
fn boxed_node_dispatch() {
    let mut node: Box<dyn AudioNode + Send> = Box::new(DcBlockFilter::new());
    assert!(!node.is_initialized());
    node.init(1, SAMPLE_RATE).unwrap();
    assert!(node.is_initialized());
    assert_eq!(node.latency_samples(), 0);

    let mut buffer = MultiChannelBuffer::from_channels(vec![vec![1.0; 3]]);
    node.process(&mut buffer, 3, 0).unwrap();
    assert_eq!(buffer.channel(0)[0], 1.0);
    assert!((buffer.channel(0)[1] - 0.995).abs() < 1e-6);

    node.deinit();
    assert!(!node.is_initialized());
}

// ============================================================================
// 2. Reference scenarios
// ============================================================================

#[test]
fn stereo_constant_input_follows_recurrence() {
    let mut filter = DcBlockFilter::new();
    filter.init(2, 44100.0).unwrap();

    let mut buffer = MultiChannelBuffer::from_channels(vec![vec![1.0; 5], vec![1.0; 5]]);
    filter.process(&mut buffer, 5, 0).unwrap();

    // y[n] = x[n] - x[n-1] + 0.995 * y[n-1] with x = 1 gives y[n] = 0.995^n
    let expected: [f32; 5] = [1.0, 0.995, 0.990025, 0.985074875, 0.980149500625];
    for channel in 0..2 {
        for (n, (&got, &want)) in buffer.channel(channel).iter().zip(&expected).enumerate() {
            assert!(
                (got - want).abs() < 1e-5,
                "channel {channel} sample {n}: expected {want}, got {got}"
            );
        }
    }
}

#[test]
fn reinit_discards_previous_state() {
    let mut filter = DcBlockFilter::with_config(2, 44100.0).unwrap();
    let mut buffer = MultiChannelBuffer::from_channels(vec![vec![0.8; 64], vec![-0.3; 64]]);
    filter.process(&mut buffer, 64, 0).unwrap();
    assert_ne!(filter.channel_state(0), Some(&ChannelState::default()));

    filter.init(3, 48000.0).unwrap();
    assert_eq!(filter.channel_count(), 3);
    for channel in 0..3 {
        assert_eq!(filter.channel_state(channel), Some(&ChannelState::default()));
    }

    // First output after reinit equals the input: no leaked history
    let mut buffer = MultiChannelBuffer::from_channels(vec![vec![0.5; 1]; 3]);
    filter.process(&mut buffer, 1, 0).unwrap();
    for channel in 0..3 {
        assert_eq!(buffer.channel(channel)[0], 0.5);
    }

    // Old geometry is rejected
    let mut stereo = MultiChannelBuffer::new(2, 1);
    assert_eq!(
        filter.process(&mut stereo, 1, 0),
        Err(NodeError::ChannelCountMismatch {
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn zero_input_after_init_is_zero_output() {
    let mut filter = DcBlockFilter::with_config(2, SAMPLE_RATE).unwrap();
    let mut loud = MultiChannelBuffer::from_channels(vec![vec![0.9; 256]; 2]);
    filter.process(&mut loud, 256, 0).unwrap();

    filter.init(2, SAMPLE_RATE).unwrap();
    let mut silence = MultiChannelBuffer::new(2, 1024);
    filter.process(&mut silence, 1024, 0).unwrap();
    for channel in 0..2 {
        assert!(silence.channel(channel).iter().all(|&s| s == 0.0));
    }
}

// ============================================================================
// 3. Block processing and buffer layouts
// ============================================================================

#[test]
fn block_splits_match_single_call() {
    let input = generate_sine(220.0, SAMPLE_RATE, 1000)
        .into_iter()
        .map(|s| s + 0.25)
        .collect::<Vec<_>>();

    let mut whole = MultiChannelBuffer::from_channels(vec![input.clone()]);
    let mut filter = DcBlockFilter::with_config(1, SAMPLE_RATE).unwrap();
    filter.process(&mut whole, 1000, 0).unwrap();

    let mut split = MultiChannelBuffer::from_channels(vec![input]);
    let mut filter = DcBlockFilter::with_config(1, SAMPLE_RATE).unwrap();
    let mut offset = 0;
    for frames in [1, 63, 256, 0, 500, 180] {
        filter.process(&mut split, frames, offset).unwrap();
        offset += frames;
    }
    assert_eq!(offset, 1000);
    assert_eq!(whole, split);
}

#[test]
fn interleaved_and_planar_layouts_agree() {
    let left = generate_sine(100.0, SAMPLE_RATE, 512)
        .into_iter()
        .map(|s| s + 0.1)
        .collect::<Vec<_>>();
    let right = generate_sine(3000.0, SAMPLE_RATE, 512)
        .into_iter()
        .map(|s| s - 0.4)
        .collect::<Vec<_>>();
    let planar_source = MultiChannelBuffer::from_channels(vec![left.clone(), right.clone()]);

    let mut interleaved = planar_source.to_interleaved();
    let mut filter = DcBlockFilter::with_config(2, SAMPLE_RATE).unwrap();
    filter
        .process(&mut InterleavedBuffer::new(&mut interleaved, 2), 512, 0)
        .unwrap();

    let mut l = left;
    let mut r = right;
    let mut channels: [&mut [f32]; 2] = [&mut l, &mut r];
    let mut filter = DcBlockFilter::with_config(2, SAMPLE_RATE).unwrap();
    filter
        .process(&mut PlanarBuffer::new(&mut channels), 512, 0)
        .unwrap();

    let from_interleaved = MultiChannelBuffer::from_interleaved(&interleaved, 2);
    assert_eq!(from_interleaved.channel(0), l.as_slice());
    assert_eq!(from_interleaved.channel(1), r.as_slice());
}

#[test]
fn short_buffer_fails_fast_without_writing() {
    let mut filter = DcBlockFilter::with_config(2, SAMPLE_RATE).unwrap();
    let mut data = vec![1.0f32; 2 * 10];
    let mut view = InterleavedBuffer::new(&mut data, 2);
    assert_eq!(view.frames(), 10);
    assert_eq!(
        filter.process(&mut view, 8, 4),
        Err(NodeError::BufferTooShort {
            required: 12,
            available: 10
        })
    );
    assert!(data.iter().all(|&s| s == 1.0));
}

// ============================================================================
// 4. Signal-level behaviour
// ============================================================================

#[test]
fn channels_are_independent() {
    let frames = 2048;
    let a = generate_sine(440.0, SAMPLE_RATE, frames)
        .into_iter()
        .map(|s| s + 0.5)
        .collect::<Vec<_>>();
    let b = vec![-0.75; frames];

    // Each channel alone
    let mut alone_a = MultiChannelBuffer::from_channels(vec![a.clone()]);
    DcBlockFilter::with_config(1, SAMPLE_RATE)
        .unwrap()
        .process(&mut alone_a, frames, 0)
        .unwrap();
    let mut alone_b = MultiChannelBuffer::from_channels(vec![b.clone()]);
    DcBlockFilter::with_config(1, SAMPLE_RATE)
        .unwrap()
        .process(&mut alone_b, frames, 0)
        .unwrap();

    // Together, plus a silent third channel
    let mut together = MultiChannelBuffer::from_channels(vec![a, b, vec![0.0; frames]]);
    DcBlockFilter::with_config(3, SAMPLE_RATE)
        .unwrap()
        .process(&mut together, frames, 0)
        .unwrap();

    assert_eq!(together.channel(0), alone_a.channel(0));
    assert_eq!(together.channel(1), alone_b.channel(0));
    assert!(together.channel(2).iter().all(|&s| s == 0.0));
}

#[test]
fn dc_offset_removed_from_tone() {
    let frames = 96000;
    let offset = 0.3;
    let mut buffer = MultiChannelBuffer::from_channels(vec![
        generate_sine(440.0, SAMPLE_RATE, frames)
            .into_iter()
            .map(|s| s + offset)
            .collect(),
    ]);
    let mut filter = DcBlockFilter::with_config(1, SAMPLE_RATE).unwrap();
    filter.process(&mut buffer, frames, 0).unwrap();

    // Skip the settling transient, then measure the remaining DC over whole cycles
    let settled = &buffer.channel(0)[48000..48000 + 48000];
    let dc = mean(settled);
    assert!(dc.abs() < 0.01, "DC should be removed, mean was {dc}");

    let peak = settled.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(peak > 0.95, "tone should pass, peak was {peak}");
}

#[test]
fn dc_decays_geometrically() {
    let mut filter = DcBlockFilter::with_config(1, SAMPLE_RATE).unwrap();
    let mut buffer = MultiChannelBuffer::from_channels(vec![vec![2.0; 200]]);
    filter.process(&mut buffer, 200, 0).unwrap();

    let out = buffer.channel(0);
    for n in 1..200 {
        let ratio = out[n] / out[n - 1];
        assert!(
            (ratio - 0.995).abs() < 1e-4,
            "ratio at {n} should equal the coefficient, got {ratio}"
        );
    }
}

#[test]
fn coefficient_ramps_in_lockstep_with_frames() {
    let mut filter = DcBlockFilter::with_config(2, SAMPLE_RATE).unwrap();
    assert_eq!(filter.ramp_duration_samples(), 10_000);
    filter.set_coefficient(0.9);

    let max_step = (0.995 - 0.9) / 10_000.0 + 1e-6;
    let mut buffer = MultiChannelBuffer::from_channels(vec![vec![0.1; 10_000]; 2]);
    let mut previous = filter.coefficient();
    for frame in 0..10_000 {
        filter.process(&mut buffer, 1, frame).unwrap();
        let current = filter.coefficient();
        assert!(current <= previous, "coefficient must fall monotonically");
        assert!(current >= 0.9, "coefficient must not overshoot");
        assert!(previous - current <= max_step, "step too large at {frame}");
        previous = current;
        if frame < 9_999 {
            assert!(filter.is_ramping());
        }
    }
    assert_eq!(filter.coefficient(), 0.9);
    assert!(!filter.is_ramping());
}
