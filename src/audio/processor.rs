use crate::audio::metering::{MeterReading, WaveformSnapshot};
use crate::audio::params::ParameterSet;
use crate::audio::pitch::PitchShifter;
use crate::effects::EffectChain;
use std::sync::Arc;

/// Per-buffer telemetry produced alongside the processed audio
#[derive(Debug, Clone, Copy)]
pub struct BufferTelemetry {
    /// Level of the signal entering the chain (after input gain)
    pub input: MeterReading,
    /// Level of the signal queued for render
    pub output: MeterReading,
    /// Decimated first-channel output waveform
    pub waveform: WaveformSnapshot,
}

/// The capture-side processing pipeline for one engine.
///
/// Per buffer: deinterleave, input gain, pitch shift, effect chain, stereo
/// width, output gain, optional direct-monitor blend, clamp, reinterleave.
/// One effect chain is built per channel so filter state never bleeds
/// across channels.
///
/// Scratch buffers grow on demand and are reused between callbacks; after
/// the first buffer at a stable size no allocation happens on the audio
/// thread.
pub struct FrameProcessor {
    params: Arc<ParameterSet>,
    sample_rate: u32,
    channels: usize,
    pitch: PitchShifter,
    chains: Vec<EffectChain>,
    pre_chain: Vec<Vec<f32>>,
    work: Vec<Vec<f32>>,
    output: Vec<f32>,
}

impl FrameProcessor {
    pub fn new(params: Arc<ParameterSet>, sample_rate: u32, channels: usize) -> Self {
        let channels = channels.max(1);
        let chains = (0..channels)
            .map(|_| EffectChain::new(Arc::clone(&params)))
            .collect();

        Self {
            params,
            sample_rate,
            channels,
            pitch: PitchShifter::new(),
            chains,
            pre_chain: vec![Vec::new(); channels],
            work: vec![Vec::new(); channels],
            output: Vec::new(),
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Process one interleaved capture buffer.
    ///
    /// Returns the interleaved output (same length as `input`, truncated to
    /// whole frames) and the buffer's telemetry.
    pub fn process(
        &mut self,
        input: &[f32],
        pitch_factor: f32,
        direct_monitor: bool,
    ) -> (&[f32], BufferTelemetry) {
        let frames = input.len() / self.channels;

        for channel in 0..self.channels {
            self.pre_chain[channel].resize(frames, 0.0);
            self.work[channel].resize(frames, 0.0);
        }
        self.output.resize(frames * self.channels, 0.0);

        // Deinterleave with input gain applied
        let input_gain = db_to_linear(self.params.input_gain_db.get());
        for (channel, pre) in self.pre_chain.iter_mut().enumerate() {
            for (frame, sample) in pre.iter_mut().enumerate() {
                *sample = input[frame * self.channels + channel] * input_gain;
            }
        }

        let input_levels = measure_channels(&self.pre_chain);

        // Pitch shift into the work buffers, then run each channel's chain
        for channel in 0..self.channels {
            self.pitch
                .shift(&self.pre_chain[channel], &mut self.work[channel], pitch_factor);
            self.chains[channel].process(&mut self.work[channel], self.sample_rate);
        }

        if self.channels == 2 {
            self.apply_stereo_width(frames);
        }

        // Output gain, monitor blend, clamp
        let output_gain = db_to_linear(self.params.output_gain_db.get());
        for (work, pre) in self.work.iter_mut().zip(self.pre_chain.iter()) {
            for (sample, &dry) in work.iter_mut().zip(pre.iter()) {
                let mut value = *sample * output_gain;
                if direct_monitor {
                    value = value * 0.5 + dry * 0.5;
                }
                *sample = value.clamp(-1.0, 1.0);
            }
        }

        let output_levels = measure_channels(&self.work);
        let waveform = WaveformSnapshot::capture(&self.work[0]);

        for (channel, work) in self.work.iter().enumerate() {
            for (frame, &sample) in work.iter().enumerate() {
                self.output[frame * self.channels + channel] = sample;
            }
        }

        (
            &self.output,
            BufferTelemetry {
                input: input_levels,
                output: output_levels,
                waveform,
            },
        )
    }

    /// Mid/side recombination for the stereo case. Width 1.0 is skipped so
    /// the default path stays bit-exact.
    fn apply_stereo_width(&mut self, frames: usize) {
        let width = self.params.stereo_width.get().clamp(0.0, 2.0);
        if width == 1.0 {
            return;
        }

        let (left_part, right_part) = self.work.split_at_mut(1);
        let left = &mut left_part[0];
        let right = &mut right_part[0];
        for frame in 0..frames {
            let mid = (left[frame] + right[frame]) * 0.5;
            let side = (left[frame] - right[frame]) * 0.5 * width;
            left[frame] = mid + side;
            right[frame] = mid - side;
        }
    }

    /// Clear all per-channel filter state
    pub fn reset(&mut self) {
        for chain in &mut self.chains {
            chain.reset();
        }
    }
}

fn db_to_linear(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

/// Combined RMS/peak across every channel's buffer
fn measure_channels(channels: &[Vec<f32>]) -> MeterReading {
    let mut sum_squares = 0.0f64;
    let mut peak = 0.0f32;
    let mut count = 0usize;

    for channel in channels {
        for &sample in channel {
            sum_squares += (sample as f64) * (sample as f64);
            peak = peak.max(sample.abs());
            count += 1;
        }
    }

    if count == 0 {
        return MeterReading::silence();
    }

    MeterReading {
        rms: (sum_squares / count as f64).sqrt() as f32,
        peak,
    }
}
