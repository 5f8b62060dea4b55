use super::Effect;
use crate::audio::params::{DistortionMode, ParameterSet};
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Waveshaping distortion with three fixed curves, dry/wet mixed.
///
/// Stateless apart from the shared parameters; drive below unity is floored
/// so the shaper always sees at least the raw signal.
pub struct DistortionEffect {
    params: Arc<ParameterSet>,
}

impl DistortionEffect {
    pub fn new(params: Arc<ParameterSet>) -> Self {
        Self { params }
    }
}

impl Effect for DistortionEffect {
    fn process(&mut self, buffer: &mut [f32], _sample_rate: u32) {
        if !self.params.distortion_enabled.load(Ordering::Relaxed) {
            return;
        }

        let drive = self.params.distortion_drive.get().max(1.0);
        let mix = self.params.distortion_mix.get().clamp(0.0, 1.0);
        let mode = self.params.distortion_mode();

        for sample in buffer.iter_mut() {
            let driven = *sample * drive;
            let shaped = match mode {
                DistortionMode::Fuzz => (driven * 1.8).tanh(),
                DistortionMode::HardClip => driven.clamp(-0.6, 0.6),
                DistortionMode::SoftClip => driven / (1.0 + driven.abs()),
            };

            *sample = *sample * (1.0 - mix) + shaped * mix;
        }
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "Distortion"
    }
}
