// Voice Backend - real-time voice transformation
//
// Captures microphone audio, applies a pitch shift and a chain of DSP
// effects, and renders the result with bounded latency.
// Uses lock-free rings between the capture and render callbacks, cpal for
// audio I/O, and per-field atomic parameters shared with the control thread.

pub mod audio;
pub mod effects;

// Re-export commonly used types
pub use audio::{
    input_devices, measure, output_devices, AudioEngine, AudioEvent, BufferTelemetry, DeviceInfo,
    DistortionMode, EngineSettings, FrameProcessor, MeterReading, ParameterSet, ParameterSnapshot,
    PitchShifter, PresetConfiguration, PresetMode, PresetRegistry, WaveformSnapshot,
};
pub use effects::{Effect, EffectChain};
