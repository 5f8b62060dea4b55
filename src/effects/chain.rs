use super::{
    ChorusEffect, CompressorEffect, DelayEffect, DistortionEffect, Effect, EqualizerEffect,
    FormantShiftEffect, NoiseGateEffect, ReverbEffect,
};
use crate::audio::params::ParameterSet;
use std::sync::Arc;

/// The eight filter units in their fixed processing order.
///
/// Order: noise gate, compressor, equalizer, formant shift, chorus, delay,
/// reverb, distortion. Dynamics run ahead of tonal shaping, modulation ahead
/// of the spatial effects, and distortion last so it saturates the fully wet
/// signal. Presets are tuned against this order; do not reorder.
///
/// One chain owns one set of filter state, so multi-channel processing needs
/// one chain per channel.
pub struct EffectChain {
    effects: Vec<Box<dyn Effect>>,
}

impl EffectChain {
    pub fn new(params: Arc<ParameterSet>) -> Self {
        let effects: Vec<Box<dyn Effect>> = vec![
            Box::new(NoiseGateEffect::new(Arc::clone(&params))),
            Box::new(CompressorEffect::new(Arc::clone(&params))),
            Box::new(EqualizerEffect::new(Arc::clone(&params))),
            Box::new(FormantShiftEffect::new(Arc::clone(&params))),
            Box::new(ChorusEffect::new(Arc::clone(&params))),
            Box::new(DelayEffect::new(Arc::clone(&params))),
            Box::new(ReverbEffect::new(Arc::clone(&params))),
            Box::new(DistortionEffect::new(params)),
        ];

        Self { effects }
    }

    /// Run every unit in sequence over the same channel buffer
    pub fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        for effect in &mut self.effects {
            effect.process(buffer, sample_rate);
        }
    }

    /// Clear the continuous state of every unit
    pub fn reset(&mut self) {
        for effect in &mut self.effects {
            effect.reset();
        }
    }
}
