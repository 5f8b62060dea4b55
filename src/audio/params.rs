use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

/// f32 stored as its bit pattern in an AtomicU32.
///
/// All accesses are Relaxed: control values are low-rate, human-driven, and a
/// stale read for one buffer self-corrects on the next.
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Waveshaping curve used by the distortion unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistortionMode {
    SoftClip = 0,
    HardClip = 1,
    Fuzz = 2,
}

impl DistortionMode {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => DistortionMode::HardClip,
            2 => DistortionMode::Fuzz,
            _ => DistortionMode::SoftClip,
        }
    }
}

/// Every effect's enabled flag and numeric controls, shared between the
/// control thread and the audio thread as `Arc<ParameterSet>`.
///
/// Each field is an independent atomic. There is no cross-field atomicity:
/// the audio thread may observe a half-applied preset for one buffer, which
/// is accepted and self-corrects on the next. Effects clamp out-of-range
/// values at use, so no write here can produce invalid audio.
pub struct ParameterSet {
    pub eq_enabled: AtomicBool,
    pub eq_low_gain_db: AtomicF32,
    pub eq_mid_gain_db: AtomicF32,
    pub eq_high_gain_db: AtomicF32,

    pub input_gain_db: AtomicF32,
    pub output_gain_db: AtomicF32,
    /// 1.0 = unchanged, 0.0 = mono, 2.0 = exaggerated side signal
    pub stereo_width: AtomicF32,

    pub reverb_enabled: AtomicBool,
    pub reverb_mix: AtomicF32,
    pub reverb_decay: AtomicF32,

    pub delay_enabled: AtomicBool,
    pub delay_time_ms: AtomicF32,
    pub delay_feedback: AtomicF32,
    pub delay_mix: AtomicF32,

    pub chorus_enabled: AtomicBool,
    pub chorus_depth_ms: AtomicF32,
    pub chorus_rate_hz: AtomicF32,

    pub formant_enabled: AtomicBool,
    pub formant_shift: AtomicF32,

    pub noise_gate_enabled: AtomicBool,
    pub noise_gate_threshold: AtomicF32,
    pub noise_gate_attack_ms: AtomicF32,
    pub noise_gate_release_ms: AtomicF32,

    pub compressor_enabled: AtomicBool,
    pub compressor_threshold_db: AtomicF32,
    pub compressor_ratio: AtomicF32,
    pub compressor_attack_ms: AtomicF32,
    pub compressor_release_ms: AtomicF32,
    pub compressor_knee_db: AtomicF32,
    pub compressor_makeup_db: AtomicF32,

    pub distortion_enabled: AtomicBool,
    pub distortion_drive: AtomicF32,
    pub distortion_mix: AtomicF32,
    distortion_mode: AtomicU8,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self {
            eq_enabled: AtomicBool::new(true),
            eq_low_gain_db: AtomicF32::new(0.0),
            eq_mid_gain_db: AtomicF32::new(0.0),
            eq_high_gain_db: AtomicF32::new(0.0),

            input_gain_db: AtomicF32::new(0.0),
            output_gain_db: AtomicF32::new(0.0),
            stereo_width: AtomicF32::new(1.0),

            reverb_enabled: AtomicBool::new(true),
            reverb_mix: AtomicF32::new(0.12),
            reverb_decay: AtomicF32::new(0.45),

            delay_enabled: AtomicBool::new(false),
            delay_time_ms: AtomicF32::new(180.0),
            delay_feedback: AtomicF32::new(0.25),
            delay_mix: AtomicF32::new(0.18),

            chorus_enabled: AtomicBool::new(false),
            chorus_depth_ms: AtomicF32::new(8.0),
            chorus_rate_hz: AtomicF32::new(0.9),

            formant_enabled: AtomicBool::new(false),
            formant_shift: AtomicF32::new(0.0),

            noise_gate_enabled: AtomicBool::new(true),
            noise_gate_threshold: AtomicF32::new(0.02),
            noise_gate_attack_ms: AtomicF32::new(5.0),
            noise_gate_release_ms: AtomicF32::new(80.0),

            compressor_enabled: AtomicBool::new(true),
            compressor_threshold_db: AtomicF32::new(-12.0),
            compressor_ratio: AtomicF32::new(3.5),
            compressor_attack_ms: AtomicF32::new(10.0),
            compressor_release_ms: AtomicF32::new(60.0),
            compressor_knee_db: AtomicF32::new(6.0),
            compressor_makeup_db: AtomicF32::new(2.0),

            distortion_enabled: AtomicBool::new(false),
            distortion_drive: AtomicF32::new(1.2),
            distortion_mix: AtomicF32::new(0.35),
            distortion_mode: AtomicU8::new(DistortionMode::SoftClip as u8),
        }
    }

    pub fn distortion_mode(&self) -> DistortionMode {
        DistortionMode::from_u8(self.distortion_mode.load(Ordering::Relaxed))
    }

    pub fn set_distortion_mode(&self, mode: DistortionMode) {
        self.distortion_mode.store(mode as u8, Ordering::Relaxed);
    }

    /// Copy of the current values as a plain struct, for the UI bridge and
    /// for state comparison. Not atomic as a whole: concurrent writes may
    /// land between field reads.
    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot {
            eq_enabled: self.eq_enabled.load(Ordering::Relaxed),
            eq_low_gain_db: self.eq_low_gain_db.get(),
            eq_mid_gain_db: self.eq_mid_gain_db.get(),
            eq_high_gain_db: self.eq_high_gain_db.get(),
            input_gain_db: self.input_gain_db.get(),
            output_gain_db: self.output_gain_db.get(),
            stereo_width: self.stereo_width.get(),
            reverb_enabled: self.reverb_enabled.load(Ordering::Relaxed),
            reverb_mix: self.reverb_mix.get(),
            reverb_decay: self.reverb_decay.get(),
            delay_enabled: self.delay_enabled.load(Ordering::Relaxed),
            delay_time_ms: self.delay_time_ms.get(),
            delay_feedback: self.delay_feedback.get(),
            delay_mix: self.delay_mix.get(),
            chorus_enabled: self.chorus_enabled.load(Ordering::Relaxed),
            chorus_depth_ms: self.chorus_depth_ms.get(),
            chorus_rate_hz: self.chorus_rate_hz.get(),
            formant_enabled: self.formant_enabled.load(Ordering::Relaxed),
            formant_shift: self.formant_shift.get(),
            noise_gate_enabled: self.noise_gate_enabled.load(Ordering::Relaxed),
            noise_gate_threshold: self.noise_gate_threshold.get(),
            noise_gate_attack_ms: self.noise_gate_attack_ms.get(),
            noise_gate_release_ms: self.noise_gate_release_ms.get(),
            compressor_enabled: self.compressor_enabled.load(Ordering::Relaxed),
            compressor_threshold_db: self.compressor_threshold_db.get(),
            compressor_ratio: self.compressor_ratio.get(),
            compressor_attack_ms: self.compressor_attack_ms.get(),
            compressor_release_ms: self.compressor_release_ms.get(),
            compressor_knee_db: self.compressor_knee_db.get(),
            compressor_makeup_db: self.compressor_makeup_db.get(),
            distortion_enabled: self.distortion_enabled.load(Ordering::Relaxed),
            distortion_drive: self.distortion_drive.get(),
            distortion_mix: self.distortion_mix.get(),
            distortion_mode: self.distortion_mode(),
        }
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain-value copy of a ParameterSet at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    pub eq_enabled: bool,
    pub eq_low_gain_db: f32,
    pub eq_mid_gain_db: f32,
    pub eq_high_gain_db: f32,
    pub input_gain_db: f32,
    pub output_gain_db: f32,
    pub stereo_width: f32,
    pub reverb_enabled: bool,
    pub reverb_mix: f32,
    pub reverb_decay: f32,
    pub delay_enabled: bool,
    pub delay_time_ms: f32,
    pub delay_feedback: f32,
    pub delay_mix: f32,
    pub chorus_enabled: bool,
    pub chorus_depth_ms: f32,
    pub chorus_rate_hz: f32,
    pub formant_enabled: bool,
    pub formant_shift: f32,
    pub noise_gate_enabled: bool,
    pub noise_gate_threshold: f32,
    pub noise_gate_attack_ms: f32,
    pub noise_gate_release_ms: f32,
    pub compressor_enabled: bool,
    pub compressor_threshold_db: f32,
    pub compressor_ratio: f32,
    pub compressor_attack_ms: f32,
    pub compressor_release_ms: f32,
    pub compressor_knee_db: f32,
    pub compressor_makeup_db: f32,
    pub distortion_enabled: bool,
    pub distortion_drive: f32,
    pub distortion_mix: f32,
    pub distortion_mode: DistortionMode,
}
