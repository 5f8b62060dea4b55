use super::Effect;
use crate::audio::params::ParameterSet;
use std::f64::consts::TAU;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Formant shift approximated by a one-pole spectral tilt around 900 Hz.
///
/// The shift amount (semitone-like, clamped to ±12) maps to a tilt in
/// [-0.5, 0.5] that rebalances the signal against its high-passed copy.
/// Shifts below 0.001 in magnitude are a no-op.
pub struct FormantShiftEffect {
    params: Arc<ParameterSet>,
    tilt_state: f64,
}

impl FormantShiftEffect {
    pub fn new(params: Arc<ParameterSet>) -> Self {
        Self {
            params,
            tilt_state: 0.0,
        }
    }
}

impl Effect for FormantShiftEffect {
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        if !self.params.formant_enabled.load(Ordering::Relaxed) || sample_rate == 0 {
            return;
        }

        let shift = self.params.formant_shift.get();
        if shift.abs() < 0.001 {
            return;
        }

        let tilt = shift.clamp(-12.0, 12.0) as f64 / 24.0;
        let coeff = TAU * 900.0 / sample_rate as f64;

        for sample in buffer.iter_mut() {
            let input = *sample as f64;
            self.tilt_state += coeff * (input - self.tilt_state);
            let high_passed = input - self.tilt_state;
            *sample = (input * (1.0 - tilt) + high_passed * tilt) as f32;
        }
    }

    fn reset(&mut self) {
        self.tilt_state = 0.0;
    }

    fn name(&self) -> &str {
        "FormantShift"
    }
}
