use super::Effect;
use crate::audio::params::ParameterSet;
use std::f64::consts::TAU;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Three-band shelf EQ built from two cascaded one-pole trackers.
///
/// The trackers sit at fixed corners of roughly 120 Hz and 4 kHz and split
/// the signal into low/band/high components, which are recombined with the
/// parameter set's per-band gains (dB). Band edges are not runtime
/// configurable.
pub struct EqualizerEffect {
    params: Arc<ParameterSet>,
    low_state: f64,
    high_state: f64,
}

impl EqualizerEffect {
    pub fn new(params: Arc<ParameterSet>) -> Self {
        Self {
            params,
            low_state: 0.0,
            high_state: 0.0,
        }
    }
}

fn db_to_linear(db: f32) -> f64 {
    10f64.powf(db as f64 / 20.0)
}

impl Effect for EqualizerEffect {
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        if !self.params.eq_enabled.load(Ordering::Relaxed) || sample_rate == 0 {
            return;
        }

        let low_gain = db_to_linear(self.params.eq_low_gain_db.get());
        let mid_gain = db_to_linear(self.params.eq_mid_gain_db.get());
        let high_gain = db_to_linear(self.params.eq_high_gain_db.get());

        let low_coeff = TAU * 120.0 / sample_rate as f64;
        let high_coeff = TAU * 4000.0 / sample_rate as f64;

        for sample in buffer.iter_mut() {
            let input = *sample as f64;

            self.low_state += low_coeff * (input - self.low_state);
            let high_passed = input - self.low_state;

            self.high_state += high_coeff * (high_passed - self.high_state);
            let band_passed = high_passed - self.high_state;
            let high_shelf = self.high_state;

            *sample =
                (self.low_state * low_gain + band_passed * mid_gain + high_shelf * high_gain) as f32;
        }
    }

    fn reset(&mut self) {
        self.low_state = 0.0;
        self.high_state = 0.0;
    }

    fn name(&self) -> &str {
        "Equalizer"
    }
}
