use super::Effect;
use crate::audio::params::ParameterSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Soft-knee compressor.
///
/// Per sample: level in dB, gain reduction from the knee curve (quadratic
/// interpolation inside the knee window, linear reduction above, unity
/// below), smoothed with attack/release coefficients, then a fixed makeup
/// gain.
pub struct CompressorEffect {
    params: Arc<ParameterSet>,
    gain: f32,
}

impl CompressorEffect {
    pub fn new(params: Arc<ParameterSet>) -> Self {
        Self { params, gain: 1.0 }
    }
}

fn ms_to_coeff(time_ms: f32, sample_rate: u32) -> f32 {
    let seconds = (time_ms as f64 / 1000.0).max(0.001);
    (-1.0 / (sample_rate as f64 * seconds)).exp() as f32
}

fn db_to_linear(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

impl Effect for CompressorEffect {
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        if !self.params.compressor_enabled.load(Ordering::Relaxed) || sample_rate == 0 {
            return;
        }

        let ratio = self.params.compressor_ratio.get().max(1.0);
        let attack_coeff = ms_to_coeff(self.params.compressor_attack_ms.get(), sample_rate);
        let release_coeff = ms_to_coeff(self.params.compressor_release_ms.get(), sample_rate);
        let knee_db = self.params.compressor_knee_db.get().max(0.0);
        let half_knee = knee_db / 2.0;
        let threshold_db = self.params.compressor_threshold_db.get();
        let makeup = db_to_linear(self.params.compressor_makeup_db.get());

        for sample in buffer.iter_mut() {
            let level = sample.abs().max(1e-6);
            let input_db = 20.0 * level.log10();

            let gain_db = if knee_db > 0.0
                && input_db > threshold_db - half_knee
                && input_db < threshold_db + half_knee
            {
                // Quadratic transition through the knee window
                let delta = input_db - (threshold_db - half_knee);
                let proportion = delta / knee_db;
                let compressed_db = input_db + (1.0 / ratio - 1.0) * proportion * proportion * delta;
                compressed_db - input_db
            } else if input_db > threshold_db {
                threshold_db + (input_db - threshold_db) / ratio - input_db
            } else {
                0.0
            };

            let target_gain = db_to_linear(gain_db) * makeup;
            let coeff = if target_gain < self.gain {
                attack_coeff
            } else {
                release_coeff
            };
            self.gain = target_gain + (self.gain - target_gain) * coeff;
            *sample *= self.gain;
        }
    }

    fn reset(&mut self) {
        self.gain = 1.0;
    }

    fn name(&self) -> &str {
        "Compressor"
    }
}
