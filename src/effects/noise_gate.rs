use super::Effect;
use crate::audio::params::ParameterSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Noise gate driven by a peak-hold envelope follower.
///
/// The follower holds the instantaneous peak and decays with the release
/// coefficient; comparing it against the threshold yields a binary
/// open/closed target gain, and the applied gain approaches that target
/// through asymmetric attack/release one-pole smoothing so the gate never
/// clicks.
pub struct NoiseGateEffect {
    params: Arc<ParameterSet>,
    envelope: f32,
    gate_gain: f32,
}

impl NoiseGateEffect {
    pub fn new(params: Arc<ParameterSet>) -> Self {
        Self {
            params,
            envelope: 0.0,
            gate_gain: 1.0,
        }
    }
}

/// Exponential smoothing coefficient for a time constant in milliseconds
fn ms_to_coeff(time_ms: f32, sample_rate: u32) -> f32 {
    let seconds = (time_ms as f64 / 1000.0).max(0.001);
    (-1.0 / (sample_rate as f64 * seconds)).exp() as f32
}

impl Effect for NoiseGateEffect {
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        if !self.params.noise_gate_enabled.load(Ordering::Relaxed) || sample_rate == 0 {
            return;
        }

        let threshold = self.params.noise_gate_threshold.get().clamp(0.001, 0.2);
        let attack_coeff = ms_to_coeff(self.params.noise_gate_attack_ms.get(), sample_rate);
        let release_coeff = ms_to_coeff(self.params.noise_gate_release_ms.get(), sample_rate);

        for sample in buffer.iter_mut() {
            let level = sample.abs();
            self.envelope = level.max(self.envelope * release_coeff);

            let target = if self.envelope < threshold { 0.0 } else { 1.0 };
            let coeff = if target > self.gate_gain {
                attack_coeff
            } else {
                release_coeff
            };
            self.gate_gain = target + (self.gate_gain - target) * coeff;
            *sample *= self.gate_gain;
        }
    }

    fn reset(&mut self) {
        self.envelope = 0.0;
        self.gate_gain = 1.0;
    }

    fn name(&self) -> &str {
        "NoiseGate"
    }
}
