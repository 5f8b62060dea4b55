use super::Effect;
use crate::audio::params::ParameterSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Single feedback delay line.
///
/// The line grows on demand to hold the requested delay plus one buffer's
/// worth of frames, so the read index never catches the write cursor.
pub struct DelayEffect {
    params: Arc<ParameterSet>,
    buffer: Vec<f32>,
    write_index: usize,
}

impl DelayEffect {
    pub fn new(params: Arc<ParameterSet>) -> Self {
        Self {
            params,
            buffer: vec![0.0; 1],
            write_index: 0,
        }
    }

    fn ensure_buffer(&mut self, size: usize) {
        if self.buffer.len() < size {
            self.buffer.resize(size, 0.0);
        }
    }
}

impl Effect for DelayEffect {
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        if !self.params.delay_enabled.load(Ordering::Relaxed) || sample_rate == 0 {
            return;
        }

        let delay_time_ms = self.params.delay_time_ms.get().clamp(10.0, 1500.0) as f64;
        let delay_samples = (sample_rate as f64 * delay_time_ms / 1000.0) as usize;
        self.ensure_buffer(delay_samples + buffer.len());
        let len = self.buffer.len();

        let feedback = self.params.delay_feedback.get().clamp(0.0, 0.95);
        let mix = self.params.delay_mix.get().clamp(0.0, 1.0);

        for sample in buffer.iter_mut() {
            let read_index = (self.write_index + len - delay_samples) % len;
            let delayed = self.buffer[read_index];

            self.buffer[self.write_index] = *sample + delayed * feedback;
            self.write_index = (self.write_index + 1) % len;

            *sample = *sample * (1.0 - mix) + delayed * mix;
        }
    }

    fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_index = 0;
    }

    fn name(&self) -> &str {
        "Delay"
    }
}
