use std::sync::atomic::Ordering;
use std::sync::Arc;
use voice_backend::effects::{
    ChorusEffect, CompressorEffect, DelayEffect, DistortionEffect, Effect, EffectChain,
    EqualizerEffect, FormantShiftEffect, NoiseGateEffect, ReverbEffect,
};
use voice_backend::{measure, ParameterSet};

const SAMPLE_RATE: u32 = 48_000;

/// A deterministic non-trivial test signal
fn test_signal(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (i as f32 * 0.07).sin() * 0.5 + (i as f32 * 0.013).cos() * 0.2)
        .collect()
}

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
fn disabled_effects_are_bit_for_bit_identity() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);

    let original = test_signal(512);

    let mut effects: Vec<Box<dyn Effect>> = vec![
        Box::new(NoiseGateEffect::new(Arc::clone(&params))),
        Box::new(CompressorEffect::new(Arc::clone(&params))),
        Box::new(EqualizerEffect::new(Arc::clone(&params))),
        Box::new(FormantShiftEffect::new(Arc::clone(&params))),
        Box::new(ChorusEffect::new(Arc::clone(&params))),
        Box::new(DelayEffect::new(Arc::clone(&params))),
        Box::new(ReverbEffect::new(Arc::clone(&params))),
        Box::new(DistortionEffect::new(Arc::clone(&params))),
    ];

    for effect in &mut effects {
        let mut buffer = original.clone();
        effect.process(&mut buffer, SAMPLE_RATE);
        assert_eq!(
            buffer,
            original,
            "disabled {} must not touch the buffer",
            effect.name()
        );
    }

    let mut chain = EffectChain::new(params);
    let mut buffer = original.clone();
    chain.process(&mut buffer, SAMPLE_RATE);
    assert_eq!(buffer, original, "fully disabled chain must be identity");
}

#[test]
fn noise_gate_closes_on_sub_threshold_signal() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.noise_gate_enabled.store(true, Ordering::Relaxed);
    params.noise_gate_threshold.set(0.02);

    let mut gate = NoiseGateEffect::new(params);

    // One second well below the threshold: the release smoothing has over
    // twelve time constants to pull the applied gain to zero.
    let mut buffer = vec![0.005f32; SAMPLE_RATE as usize];
    gate.process(&mut buffer, SAMPLE_RATE);

    let tail = buffer[buffer.len() - 1].abs();
    assert!(tail < 1e-4, "gate should have closed, tail = {}", tail);
}

#[test]
fn noise_gate_opens_on_full_scale_signal() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.noise_gate_enabled.store(true, Ordering::Relaxed);
    params.noise_gate_threshold.set(0.02);

    let mut gate = NoiseGateEffect::new(params);

    // Close the gate first, then hit it with full scale
    let mut quiet = vec![0.001f32; SAMPLE_RATE as usize];
    gate.process(&mut quiet, SAMPLE_RATE);

    let mut loud = vec![1.0f32; SAMPLE_RATE as usize];
    gate.process(&mut loud, SAMPLE_RATE);

    let tail = loud[loud.len() - 1];
    assert!(tail > 0.99, "gate should have opened, tail = {}", tail);
}

#[test]
fn compressor_with_unity_ratio_is_transparent() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.compressor_enabled.store(true, Ordering::Relaxed);
    params.compressor_ratio.set(1.0);
    params.compressor_makeup_db.set(0.0);

    let mut compressor = CompressorEffect::new(params);

    let original = test_signal(4096);
    let mut buffer = original.clone();
    compressor.process(&mut buffer, SAMPLE_RATE);

    for (processed, dry) in buffer.iter().zip(original.iter()) {
        assert!(
            (processed - dry).abs() < 1e-6,
            "ratio 1 compressor must not change the signal: {} vs {}",
            processed,
            dry
        );
    }
}

#[test]
fn reverb_with_zero_mix_is_dry() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.reverb_enabled.store(true, Ordering::Relaxed);
    params.reverb_mix.set(0.0);

    let mut reverb = ReverbEffect::new(params);

    let original = test_signal(8192);
    let mut buffer = original.clone();
    reverb.process(&mut buffer, SAMPLE_RATE);

    assert_eq!(buffer, original, "mix 0 reverb must pass the dry signal");
}

#[test]
fn delay_with_zero_mix_is_dry() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.delay_enabled.store(true, Ordering::Relaxed);
    params.delay_mix.set(0.0);
    params.delay_feedback.set(0.5);

    let mut delay = DelayEffect::new(params);

    let original = test_signal(4096);
    let mut buffer = original.clone();
    delay.process(&mut buffer, SAMPLE_RATE);

    assert_eq!(buffer, original, "mix 0 delay must pass the dry signal");
}

#[test]
fn distortion_with_zero_mix_is_dry() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.distortion_enabled.store(true, Ordering::Relaxed);
    params.distortion_mix.set(0.0);
    params.distortion_drive.set(10.0);

    let mut distortion = DistortionEffect::new(params);

    let original = test_signal(1024);
    let mut buffer = original.clone();
    distortion.process(&mut buffer, SAMPLE_RATE);

    assert_eq!(buffer, original, "mix 0 distortion must pass the dry signal");
}

#[test]
fn formant_shift_below_epsilon_is_identity() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.formant_enabled.store(true, Ordering::Relaxed);
    params.formant_shift.set(0.0005);

    let mut formant = FormantShiftEffect::new(params);

    let original = test_signal(1024);
    let mut buffer = original.clone();
    formant.process(&mut buffer, SAMPLE_RATE);

    assert_eq!(buffer, original);
}

#[test]
fn chorus_on_silence_stays_silent() {
    let params = Arc::new(ParameterSet::new());
    disable_all(&params);
    params.chorus_enabled.store(true, Ordering::Relaxed);

    let mut chorus = ChorusEffect::new(params);

    let mut buffer = vec![0.0f32; 4096];
    chorus.process(&mut buffer, SAMPLE_RATE);

    assert!(buffer.iter().all(|&sample| sample == 0.0));
}

#[test]
fn effects_keep_hot_signal_bounded() {
    // A fully enabled chain driven hard must not blow up numerically
    let params = Arc::new(ParameterSet::new());
    params.eq_enabled.store(true, Ordering::Relaxed);
    params.eq_low_gain_db.set(4.0);
    params.delay_enabled.store(true, Ordering::Relaxed);
    params.chorus_enabled.store(true, Ordering::Relaxed);
    params.formant_enabled.store(true, Ordering::Relaxed);
    params.formant_shift.set(-6.0);
    params.distortion_enabled.store(true, Ordering::Relaxed);
    params.distortion_drive.set(5.0);
    params.distortion_mix.set(1.0);

    let mut chain = EffectChain::new(params);

    let mut buffer = vec![0.95f32; 48_000];
    for _ in 0..10 {
        chain.process(&mut buffer, SAMPLE_RATE);
        buffer.iter_mut().for_each(|s| *s = s.clamp(-1.0, 1.0));
    }

    assert!(buffer.iter().all(|sample| sample.is_finite()));
}

#[test]
fn metering_of_alternating_full_scale_buffer() {
    let buffer: Vec<f32> = (0..480)
        .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect();

    let levels = measure(&buffer);
    assert!((levels.rms - 1.0).abs() < 1e-6);
    assert!((levels.peak - 1.0).abs() < 1e-6);
    assert!(levels.peak >= levels.rms);
}

#[test]
fn metering_of_empty_buffer_is_silence() {
    let levels = measure(&[]);
    assert_eq!(levels.rms, 0.0);
    assert_eq!(levels.peak, 0.0);
}
