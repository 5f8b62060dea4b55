pub mod devices;
pub mod engine;
pub mod events;
pub mod metering;
pub mod params;
pub mod pitch;
pub mod presets;
pub mod processor;

pub use devices::{input_devices, output_devices, DeviceInfo};
pub use engine::{AudioEngine, EngineSettings};
pub use events::AudioEvent;
pub use metering::{measure, MeterReading, WaveformSnapshot, MAX_WAVEFORM_POINTS};
pub use params::{AtomicF32, DistortionMode, ParameterSet, ParameterSnapshot};
pub use pitch::PitchShifter;
pub use presets::{PresetConfiguration, PresetMode, PresetRegistry};
pub use processor::{BufferTelemetry, FrameProcessor};
