use std::sync::atomic::Ordering;
use std::sync::Arc;
use voice_backend::{
    FrameProcessor, ParameterSet, PitchShifter, PresetMode, PresetRegistry, WaveformSnapshot,
};

const SAMPLE_RATE: u32 = 48_000;

fn disable_all(params: &ParameterSet) {
    params.eq_enabled.store(false, Ordering::Relaxed);
    params.reverb_enabled.store(false, Ordering::Relaxed);
    params.delay_enabled.store(false, Ordering::Relaxed);
    params.chorus_enabled.store(false, Ordering::Relaxed);
    params.formant_enabled.store(false, Ordering::Relaxed);
    params.noise_gate_enabled.store(false, Ordering::Relaxed);
    params.compressor_enabled.store(false, Ordering::Relaxed);
    params.distortion_enabled.store(false, Ordering::Relaxed);
}

#[test]
fn pitch_shift_with_unity_factor_is_identity() {
    let shifter = PitchShifter::new();
    let source: Vec<f32> = (0..480).map(|i| (i as f32 * 0.1).sin()).collect();
    let mut destination = vec![0.0f32; source.len()];

    shifter.shift(&source, &mut destination, 1.0);
    assert_eq!(destination, source);
}

#[test]
fn pitch_shift_with_non_positive_factor_is_identity() {
    let shifter = PitchShifter::new();
    let source: Vec<f32> = (0..64).map(|i| i as f32 * 0.01).collect();

    for factor in [0.0, -1.0, f32::NAN, f32::NEG_INFINITY] {
        let mut destination = vec![0.0f32; source.len()];
        shifter.shift(&source, &mut destination, factor);
        assert_eq!(destination, source, "factor {} must act as 1.0", factor);
    }
}

#[test]
fn pitch_shift_output_length_matches_input() {
    let shifter = PitchShifter::new();

    for len in [1usize, 7, 480, 1024] {
        for factor in [0.5f32, 0.8, 1.25, 2.0] {
            let source = vec![0.25f32; len];
            let mut destination = vec![0.0f32; len];
            shifter.shift(&source, &mut destination, factor);
            assert_eq!(destination.len(), len);
        }
    }
}

#[test]
fn pitch_shift_resamples_a_ramp() {
    // Doubling the pitch reads the source at half speed
    let shifter = PitchShifter::new();
    let source: Vec<f32> = (0..100).map(|i| i as f32).collect();
    let mut destination = vec![0.0f32; source.len()];

    shifter.shift(&source, &mut destination, 2.0);
    for (i, &value) in destination.iter().enumerate() {
        let expected = i as f32 / 2.0;
        assert!(
            (value - expected).abs() < 1e-4,
            "index {}: {} vs {}",
            i,
            value,
            expected
        );
    }
}

#[test]
fn preset_application_is_idempotent() {
    let registry = PresetRegistry::new();

    for mode in PresetMode::ALL {
        let params = ParameterSet::new();
        registry.apply(mode, &params);
        let first = params.snapshot();
        registry.apply(mode, &params);
        let second = params.snapshot();
        assert_eq!(first, second, "reapplying {:?} must be a no-op", mode);
    }
}

#[test]
fn preset_switch_leaves_no_residue() {
    let registry = PresetRegistry::new();

    let via_demon = ParameterSet::new();
    registry.apply(PresetMode::Demon, &via_demon);
    registry.apply(PresetMode::Clean, &via_demon);

    let direct = ParameterSet::new();
    registry.apply(PresetMode::Clean, &direct);

    assert_eq!(via_demon.snapshot(), direct.snapshot());
}

#[test]
fn preset_base_pitch_values() {
    let registry = PresetRegistry::new();
    assert_eq!(registry.get(PresetMode::Clean).base_pitch, 1.0);
    assert_eq!(registry.get(PresetMode::Demon).base_pitch, 0.8);
    assert_eq!(registry.get(PresetMode::Child).base_pitch, 1.25);
    assert_eq!(registry.get(PresetMode::Narrator).base_pitch, 0.95);
}

#[test]
fn processor_is_identity_when_everything_is_bypassed() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);

    let mut processor = FrameProcessor::new(Arc::clone(&params), SAMPLE_RATE, 1);
    let input: Vec<f32> = (0..480).map(|i| (i as f32 * 0.05).sin() * 0.4).collect();

    let (output, telemetry) = processor.process(&input, 1.0, false);
    assert_eq!(output, &input[..]);
    assert!((telemetry.input.rms - telemetry.output.rms).abs() < 1e-6);
}

#[test]
fn processor_clean_preset_keeps_levels_in_range() {
    let params = Arc::new(ParameterSet::new());
    let registry = PresetRegistry::new();
    let clean = registry.apply(PresetMode::Clean, &params);

    let mut processor = FrameProcessor::new(Arc::clone(&params), SAMPLE_RATE, 1);
    let input = vec![0.01f32; 480];

    let (output, telemetry) = processor.process(&input, clean.base_pitch, false);
    assert_eq!(output.len(), input.len());
    // All effects bypassed or near-identity: no amplification beyond the
    // configured (unity) gain.
    assert!(telemetry.output.rms <= 0.1, "rms = {}", telemetry.output.rms);
    assert!(telemetry.output.peak <= 1.0);
    assert!(output.iter().all(|sample| sample.is_finite()));
}

#[test]
fn processor_clamps_output_to_legal_range() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.input_gain_db.set(24.0);

    let mut processor = FrameProcessor::new(Arc::clone(&params), SAMPLE_RATE, 1);
    let input = vec![0.9f32; 480];

    let (output, _) = processor.process(&input, 1.0, false);
    assert!(output.iter().all(|&sample| (-1.0..=1.0).contains(&sample)));
    assert!((output[0] - 1.0).abs() < 1e-6);
}

#[test]
fn processor_applies_output_gain() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.output_gain_db.set(-6.0);

    let mut processor = FrameProcessor::new(Arc::clone(&params), SAMPLE_RATE, 1);
    let input = vec![0.5f32; 480];

    let (output, _) = processor.process(&input, 1.0, false);
    let expected = 0.5 * 10f32.powf(-6.0 / 20.0);
    assert!((output[0] - expected).abs() < 1e-6);
}

#[test]
fn processor_direct_monitor_blends_the_dry_signal() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.output_gain_db.set(-120.0); // Processed path effectively muted

    let mut processor = FrameProcessor::new(Arc::clone(&params), SAMPLE_RATE, 1);
    let input = vec![0.6f32; 480];

    let (output, _) = processor.process(&input, 1.0, true);
    // 50/50 blend of near-silence and the pre-chain input
    assert!((output[0] - 0.3).abs() < 1e-3, "output = {}", output[0]);
}

#[test]
fn processor_stereo_width_zero_collapses_to_mid() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.stereo_width.set(0.0);

    let mut processor = FrameProcessor::new(Arc::clone(&params), SAMPLE_RATE, 2);

    // L and R exactly opposite: the mid signal is zero
    let mut input = Vec::with_capacity(960);
    for _ in 0..480 {
        input.push(0.5);
        input.push(-0.5);
    }

    let (output, _) = processor.process(&input, 1.0, false);
    assert!(output.iter().all(|&sample| sample.abs() < 1e-6));
}

#[test]
fn processor_keeps_channels_independent() {
    // Left silent, right loud: a per-channel chain must leave left silent
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.reverb_enabled.store(true, Ordering::Relaxed);
    params.reverb_mix.set(0.5);

    let mut processor = FrameProcessor::new(Arc::clone(&params), SAMPLE_RATE, 2);

    let mut input = Vec::with_capacity(960);
    for i in 0..480 {
        input.push(0.0);
        input.push((i as f32 * 0.1).sin() * 0.8);
    }

    let (output, _) = processor.process(&input, 1.0, false);
    for frame in 0..480 {
        assert_eq!(output[frame * 2], 0.0, "state bled into the silent channel");
    }
}

#[test]
fn waveform_snapshot_is_decimated() {
    let short = WaveformSnapshot::capture(&vec![0.5f32; 100]);
    assert_eq!(short.len(), 100);

    let exact = WaveformSnapshot::capture(&vec![0.5f32; 256]);
    assert_eq!(exact.len(), 256);

    let long = WaveformSnapshot::capture(&vec![0.5f32; 4096]);
    assert_eq!(long.len(), 256);
    assert!(long.points().iter().all(|&point| point == 0.5));
}
