use super::Effect;
use crate::audio::params::ParameterSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;

// Mutually prime-ish lengths keep the recirculations from stacking up on a
// common period. Fixed sample counts: at rates other than 48 kHz the tail
// timing shifts with the rate.
const LINE_LENGTHS: [usize; 3] = [2048, 2753, 3173];

/// Reverb from three parallel recirculating delay lines.
///
/// Each line feeds back on itself with a shared decay factor; the delayed
/// outputs are averaged and wet/dry mixed.
pub struct ReverbEffect {
    params: Arc<ParameterSet>,
    delay_lines: Vec<Vec<f32>>,
    indices: [usize; 3],
}

impl ReverbEffect {
    pub fn new(params: Arc<ParameterSet>) -> Self {
        Self {
            params,
            delay_lines: LINE_LENGTHS.iter().map(|&len| vec![0.0; len]).collect(),
            indices: [0; 3],
        }
    }
}

impl Effect for ReverbEffect {
    fn process(&mut self, buffer: &mut [f32], _sample_rate: u32) {
        if !self.params.reverb_enabled.load(Ordering::Relaxed) {
            return;
        }

        let mix = self.params.reverb_mix.get().clamp(0.0, 1.0);
        let decay = self.params.reverb_decay.get().clamp(0.0, 0.95);

        for sample in buffer.iter_mut() {
            let input = *sample;
            let mut accum = 0.0f32;

            for (line, index) in self.delay_lines.iter_mut().zip(self.indices.iter_mut()) {
                let delayed = line[*index];
                line[*index] = input + delayed * decay;
                *index = (*index + 1) % line.len();
                accum += delayed;
            }

            let wet = accum / LINE_LENGTHS.len() as f32;
            *sample = input * (1.0 - mix) + wet * mix;
        }
    }

    fn reset(&mut self) {
        for line in &mut self.delay_lines {
            line.fill(0.0);
        }
        self.indices = [0; 3];
    }

    fn name(&self) -> &str {
        "Reverb"
    }
}
