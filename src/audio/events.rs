use crate::audio::metering::{MeterReading, WaveformSnapshot};

/// Telemetry sent from the audio thread to the control thread.
///
/// Published once per captured buffer through a bounded lock-free ring;
/// events that would overflow the ring are dropped, never blocked on.
#[derive(Debug, Clone, Copy)]
pub enum AudioEvent {
    /// Level of the signal entering the chain
    InputLevel(MeterReading),
    /// Level of the signal queued for render
    OutputLevel(MeterReading),
    /// Decimated first-channel output waveform
    Waveform(WaveformSnapshot),
    /// The engine left the Running state (explicit stop or transport failure)
    Stopped,
}
