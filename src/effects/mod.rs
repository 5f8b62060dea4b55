pub mod chain;
pub mod chorus;
pub mod compressor;
pub mod delay;
pub mod distortion;
pub mod effect_trait;
pub mod eq;
pub mod formant;
pub mod noise_gate;
pub mod reverb;

pub use chain::EffectChain;
pub use chorus::ChorusEffect;
pub use compressor::CompressorEffect;
pub use delay::DelayEffect;
pub use distortion::DistortionEffect;
pub use effect_trait::Effect;
pub use eq::EqualizerEffect;
pub use formant::FormantShiftEffect;
pub use noise_gate::NoiseGateEffect;
pub use reverb::ReverbEffect;
