use crate::audio::params::{DistortionMode, ParameterSet};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;

/// Voice modes selectable from the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresetMode {
    Clean,
    Demon,
    Robot,
    Radio,
    Child,
    Whisper,
    Alien,
    Studio,
    Narrator,
    Storyteller,
}

impl PresetMode {
    pub const ALL: [PresetMode; 10] = [
        PresetMode::Clean,
        PresetMode::Demon,
        PresetMode::Robot,
        PresetMode::Radio,
        PresetMode::Child,
        PresetMode::Whisper,
        PresetMode::Alien,
        PresetMode::Studio,
        PresetMode::Narrator,
        PresetMode::Storyteller,
    ];
}

/// Base pitch ratio plus the parameter delta for one voice mode.
///
/// `configure` always resets the preset-managed fields to the documented
/// baseline before applying its own overrides, so applying a mode never
/// leaks state from the previous one and reapplying it is idempotent.
#[derive(Clone, Copy)]
pub struct PresetConfiguration {
    pub base_pitch: f32,
    pub configure: fn(&ParameterSet),
}

/// Fixed table mapping every voice mode to its configuration.
///
/// Built once at startup and shared by reference; `get` never fails, an
/// unknown mode resolves to Clean.
pub struct PresetRegistry {
    entries: Vec<(PresetMode, PresetConfiguration)>,
    fallback: PresetConfiguration,
}

impl PresetRegistry {
    pub fn new() -> Self {
        let clean = PresetConfiguration {
            base_pitch: 1.0,
            configure: configure_clean,
        };

        let entries = vec![
            (PresetMode::Clean, clean),
            (
                PresetMode::Demon,
                PresetConfiguration {
                    base_pitch: 0.8,
                    configure: configure_demon,
                },
            ),
            (
                PresetMode::Robot,
                PresetConfiguration {
                    base_pitch: 1.0,
                    configure: configure_robot,
                },
            ),
            (
                PresetMode::Radio,
                PresetConfiguration {
                    base_pitch: 1.0,
                    configure: configure_radio,
                },
            ),
            (
                PresetMode::Child,
                PresetConfiguration {
                    base_pitch: 1.25,
                    configure: configure_child,
                },
            ),
            (
                PresetMode::Whisper,
                PresetConfiguration {
                    base_pitch: 1.0,
                    configure: configure_whisper,
                },
            ),
            (
                PresetMode::Alien,
                PresetConfiguration {
                    base_pitch: 0.9,
                    configure: configure_alien,
                },
            ),
            (
                PresetMode::Studio,
                PresetConfiguration {
                    base_pitch: 1.0,
                    configure: configure_studio,
                },
            ),
            (
                PresetMode::Narrator,
                PresetConfiguration {
                    base_pitch: 0.95,
                    configure: configure_narrator,
                },
            ),
            (
                PresetMode::Storyteller,
                PresetConfiguration {
                    base_pitch: 1.05,
                    configure: configure_storyteller,
                },
            ),
        ];

        Self {
            entries,
            fallback: clean,
        }
    }

    pub fn get(&self, mode: PresetMode) -> &PresetConfiguration {
        self.entries
            .iter()
            .find(|(entry_mode, _)| *entry_mode == mode)
            .map(|(_, config)| config)
            .unwrap_or(&self.fallback)
    }

    /// Apply a mode's configuration and return it (for its base pitch)
    pub fn apply(&self, mode: PresetMode, params: &ParameterSet) -> &PresetConfiguration {
        let config = self.get(mode);
        (config.configure)(params);
        config
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Baseline for every preset-managed field. Input/output gain and stereo
/// width are user-global and deliberately left alone.
fn reset(params: &ParameterSet) {
    params.noise_gate_enabled.store(true, Ordering::Relaxed);
    params.noise_gate_threshold.set(0.02);
    params.compressor_enabled.store(true, Ordering::Relaxed);
    params.compressor_threshold_db.set(-12.0);
    params.compressor_ratio.set(3.5);
    params.compressor_attack_ms.set(10.0);
    params.compressor_release_ms.set(60.0);
    params.eq_enabled.store(true, Ordering::Relaxed);
    params.eq_low_gain_db.set(0.0);
    params.eq_mid_gain_db.set(0.0);
    params.eq_high_gain_db.set(0.0);
    params.reverb_enabled.store(true, Ordering::Relaxed);
    params.reverb_mix.set(0.12);
    params.reverb_decay.set(0.45);
    params.delay_enabled.store(false, Ordering::Relaxed);
    params.delay_time_ms.set(180.0);
    params.delay_feedback.set(0.25);
    params.delay_mix.set(0.18);
    params.chorus_enabled.store(false, Ordering::Relaxed);
    params.chorus_depth_ms.set(8.0);
    params.chorus_rate_hz.set(0.9);
    params.formant_enabled.store(false, Ordering::Relaxed);
    params.formant_shift.set(0.0);
    params.distortion_enabled.store(false, Ordering::Relaxed);
    params.distortion_drive.set(1.2);
    params.distortion_mix.set(0.35);
    params.set_distortion_mode(DistortionMode::SoftClip);
}

fn configure_clean(params: &ParameterSet) {
    reset(params);
    params.noise_gate_enabled.store(true, Ordering::Relaxed);
    params.compressor_enabled.store(true, Ordering::Relaxed);
    params.eq_enabled.store(true, Ordering::Relaxed);
    params.delay_enabled.store(false, Ordering::Relaxed);
    params.reverb_enabled.store(true, Ordering::Relaxed);
    params.reverb_mix.set(0.1);
    params.reverb_decay.set(0.35);
    params.chorus_enabled.store(false, Ordering::Relaxed);
    params.formant_enabled.store(false, Ordering::Relaxed);
    params.distortion_enabled.store(false, Ordering::Relaxed);
}

fn configure_demon(params: &ParameterSet) {
    reset(params);
    params.formant_enabled.store(true, Ordering::Relaxed);
    params.formant_shift.set(-6.0);
    params.eq_enabled.store(true, Ordering::Relaxed);
    params.eq_low_gain_db.set(4.0);
    params.eq_high_gain_db.set(-4.0);
    params.delay_enabled.store(true, Ordering::Relaxed);
    params.delay_time_ms.set(320.0);
    params.delay_feedback.set(0.3);
    params.delay_mix.set(0.22);
    params.reverb_enabled.store(true, Ordering::Relaxed);
    params.reverb_mix.set(0.18);
    params.reverb_decay.set(0.5);
    params.distortion_enabled.store(true, Ordering::Relaxed);
    params.distortion_drive.set(1.8);
    params.distortion_mix.set(0.55);
    params.set_distortion_mode(DistortionMode::Fuzz);
}

fn configure_robot(params: &ParameterSet) {
    reset(params);
    params.formant_enabled.store(true, Ordering::Relaxed);
    params.formant_shift.set(3.0);
    params.chorus_enabled.store(true, Ordering::Relaxed);
    params.chorus_depth_ms.set(6.0);
    params.chorus_rate_hz.set(2.2);
    params.delay_enabled.store(false, Ordering::Relaxed);
    params.reverb_enabled.store(false, Ordering::Relaxed);
    params.distortion_enabled.store(true, Ordering::Relaxed);
    params.distortion_drive.set(1.3);
    params.distortion_mix.set(0.3);
    params.set_distortion_mode(DistortionMode::HardClip);
}

fn configure_radio(params: &ParameterSet) {
    reset(params);
    params.eq_enabled.store(true, Ordering::Relaxed);
    params.eq_low_gain_db.set(-6.0);
    params.eq_mid_gain_db.set(-2.0);
    params.eq_high_gain_db.set(3.0);
    params.delay_enabled.store(false, Ordering::Relaxed);
    params.reverb_enabled.store(false, Ordering::Relaxed);
    params.noise_gate_enabled.store(true, Ordering::Relaxed);
    params.noise_gate_threshold.set(0.04);
    params.compressor_enabled.store(true, Ordering::Relaxed);
}

fn configure_child(params: &ParameterSet) {
    reset(params);
    params.formant_enabled.store(true, Ordering::Relaxed);
    params.formant_shift.set(5.0);
    params.chorus_enabled.store(true, Ordering::Relaxed);
    params.chorus_depth_ms.set(10.0);
    params.chorus_rate_hz.set(1.6);
    params.reverb_enabled.store(true, Ordering::Relaxed);
    params.reverb_mix.set(0.16);
    params.reverb_decay.set(0.4);
    params.delay_enabled.store(false, Ordering::Relaxed);
    params.distortion_enabled.store(false, Ordering::Relaxed);
    params.eq_enabled.store(true, Ordering::Relaxed);
    params.eq_high_gain_db.set(3.0);
}

fn configure_whisper(params: &ParameterSet) {
    reset(params);
    params.noise_gate_enabled.store(true, Ordering::Relaxed);
    params.noise_gate_threshold.set(0.06);
    params.compressor_enabled.store(false, Ordering::Relaxed);
    params.eq_enabled.store(true, Ordering::Relaxed);
    params.eq_low_gain_db.set(-8.0);
    params.eq_high_gain_db.set(5.0);
    params.reverb_enabled.store(true, Ordering::Relaxed);
    params.reverb_mix.set(0.28);
    params.reverb_decay.set(0.6);
    params.delay_enabled.store(false, Ordering::Relaxed);
    params.chorus_enabled.store(false, Ordering::Relaxed);
    params.formant_enabled.store(false, Ordering::Relaxed);
    params.distortion_enabled.store(false, Ordering::Relaxed);
}

fn configure_alien(params: &ParameterSet) {
    reset(params);
    params.formant_enabled.store(true, Ordering::Relaxed);
    params.formant_shift.set(-9.0);
    params.chorus_enabled.store(true, Ordering::Relaxed);
    params.chorus_depth_ms.set(12.0);
    params.chorus_rate_hz.set(0.8);
    params.delay_enabled.store(true, Ordering::Relaxed);
    params.delay_time_ms.set(420.0);
    params.delay_feedback.set(0.35);
    params.delay_mix.set(0.28);
    params.reverb_enabled.store(true, Ordering::Relaxed);
    params.reverb_mix.set(0.22);
    params.reverb_decay.set(0.7);
    params.distortion_enabled.store(true, Ordering::Relaxed);
    params.distortion_drive.set(1.4);
    params.distortion_mix.set(0.25);
    params.set_distortion_mode(DistortionMode::SoftClip);
}

fn configure_studio(params: &ParameterSet) {
    reset(params);
    params.noise_gate_enabled.store(true, Ordering::Relaxed);
    params.noise_gate_threshold.set(0.018);
    params.compressor_enabled.store(true, Ordering::Relaxed);
    params.compressor_threshold_db.set(-9.0);
    params.compressor_ratio.set(2.8);
    params.eq_enabled.store(true, Ordering::Relaxed);
    params.eq_low_gain_db.set(2.0);
    params.eq_mid_gain_db.set(-1.0);
    params.eq_high_gain_db.set(2.0);
    params.reverb_enabled.store(true, Ordering::Relaxed);
    params.reverb_mix.set(0.08);
    params.reverb_decay.set(0.3);
    params.delay_enabled.store(false, Ordering::Relaxed);
    params.chorus_enabled.store(false, Ordering::Relaxed);
    params.formant_enabled.store(false, Ordering::Relaxed);
    params.distortion_enabled.store(false, Ordering::Relaxed);
}

fn configure_narrator(params: &ParameterSet) {
    reset(params);
    params.noise_gate_enabled.store(true, Ordering::Relaxed);
    params.noise_gate_threshold.set(0.025);
    params.compressor_enabled.store(true, Ordering::Relaxed);
    params.compressor_threshold_db.set(-10.0);
    params.compressor_ratio.set(2.4);
    params.eq_enabled.store(true, Ordering::Relaxed);
    params.eq_low_gain_db.set(3.0);
    params.eq_mid_gain_db.set(1.0);
    params.eq_high_gain_db.set(-1.0);
    params.reverb_enabled.store(true, Ordering::Relaxed);
    params.reverb_mix.set(0.12);
    params.reverb_decay.set(0.45);
    params.delay_enabled.store(false, Ordering::Relaxed);
    params.chorus_enabled.store(false, Ordering::Relaxed);
    params.formant_enabled.store(false, Ordering::Relaxed);
    params.distortion_enabled.store(false, Ordering::Relaxed);
}

fn configure_storyteller(params: &ParameterSet) {
    reset(params);
    params.noise_gate_enabled.store(true, Ordering::Relaxed);
    params.noise_gate_threshold.set(0.022);
    params.compressor_enabled.store(true, Ordering::Relaxed);
    params.compressor_threshold_db.set(-8.0);
    params.compressor_ratio.set(2.2);
    params.eq_enabled.store(true, Ordering::Relaxed);
    params.eq_low_gain_db.set(1.0);
    params.eq_mid_gain_db.set(2.0);
    params.eq_high_gain_db.set(2.0);
    params.reverb_enabled.store(true, Ordering::Relaxed);
    params.reverb_mix.set(0.2);
    params.reverb_decay.set(0.55);
    params.delay_enabled.store(true, Ordering::Relaxed);
    params.delay_time_ms.set(260.0);
    params.delay_feedback.set(0.22);
    params.delay_mix.set(0.18);
    params.chorus_enabled.store(true, Ordering::Relaxed);
    params.chorus_depth_ms.set(7.0);
    params.chorus_rate_hz.set(1.1);
    params.formant_enabled.store(false, Ordering::Relaxed);
    params.distortion_enabled.store(false, Ordering::Relaxed);
}
