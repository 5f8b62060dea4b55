use super::Effect;
use crate::audio::params::ParameterSet;
use std::f64::consts::TAU;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Chorus: one sine-LFO-modulated delay line, equal dry/delayed mix.
///
/// The LFO sweeps the delay between 0.5x and 1.5x the configured depth, so
/// the line is sized for twice the depth plus one buffer. No feedback.
pub struct ChorusEffect {
    params: Arc<ParameterSet>,
    delay_buffer: Vec<f32>,
    write_index: usize,
    phase: f64,
}

impl ChorusEffect {
    pub fn new(params: Arc<ParameterSet>) -> Self {
        Self {
            params,
            delay_buffer: vec![0.0; 1],
            write_index: 0,
            phase: 0.0,
        }
    }

    fn ensure_buffer(&mut self, size: usize) {
        if self.delay_buffer.len() < size {
            self.delay_buffer.resize(size, 0.0);
        }
    }
}

impl Effect for ChorusEffect {
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        if !self.params.chorus_enabled.load(Ordering::Relaxed) || sample_rate == 0 {
            return;
        }

        let depth_ms = self.params.chorus_depth_ms.get().clamp(1.0, 20.0) as f64;
        let rate_hz = self.params.chorus_rate_hz.get().clamp(0.1, 5.0) as f64;

        let max_delay_samples = (sample_rate as f64 * (depth_ms / 1000.0) * 2.0) as usize;
        self.ensure_buffer(max_delay_samples + buffer.len() + 1);
        let len = self.delay_buffer.len();
        let phase_step = TAU * rate_hz / sample_rate as f64;

        for sample in buffer.iter_mut() {
            let lfo = self.phase.sin() * 0.5 + 0.5;
            let mod_delay = (depth_ms / 1000.0) * (0.5 + lfo);
            let delay_samples = ((sample_rate as f64 * mod_delay) as usize).max(1);

            let read_index = (self.write_index + len - delay_samples) % len;
            let delayed = self.delay_buffer[read_index];

            self.delay_buffer[self.write_index] = *sample;
            self.write_index = (self.write_index + 1) % len;

            *sample = (*sample + delayed) * 0.5;
            self.phase += phase_step;
            if self.phase > TAU {
                self.phase -= TAU;
            }
        }
    }

    fn reset(&mut self) {
        self.delay_buffer.fill(0.0);
        self.write_index = 0;
        self.phase = 0.0;
    }

    fn name(&self) -> &str {
        "Chorus"
    }
}
