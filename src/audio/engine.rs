use crate::audio::devices;
use crate::audio::events::AudioEvent;
use crate::audio::params::{AtomicF32, ParameterSet};
use crate::audio::presets::{PresetMode, PresetRegistry};
use crate::audio::processor::FrameProcessor;
use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{Sample, SampleFormat, SampleRate, StreamConfig};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Telemetry ring capacity; a few buffers' worth of events
const EVENT_QUEUE_CAPACITY: usize = 256;

/// Transport settings, read at `start` and fixed for the running lifetime.
/// Changing any of them goes through `apply_settings`, which restarts a
/// running engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub sample_rate: u32,
    pub channels: u16,
    /// Capture buffer duration in milliseconds
    pub buffer_ms: u32,
    /// Desired render latency in milliseconds
    pub latency_ms: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            channels: 1,
            buffer_ms: 10,
            latency_ms: 80,
        }
    }
}

/// State shared with the stream callbacks.
///
/// Everything here is written by the control thread and read by the audio
/// thread without locks; per-field Relaxed atomics are the whole contract.
struct SharedState {
    params: Arc<ParameterSet>,
    pitch_factor: AtomicF32,
    direct_monitor: AtomicBool,
    running: AtomicBool,
    events: Mutex<rtrb::Producer<AudioEvent>>,
}

impl SharedState {
    /// Flip to Stopped and tell the control thread. Safe to call from a
    /// stream error callback: no stream is touched here.
    fn mark_stopped(&self) {
        if self.running.swap(false, Ordering::Relaxed) {
            if let Some(mut events) = self.events.try_lock() {
                let _ = events.push(AudioEvent::Stopped);
            }
        }
    }
}

struct ActiveStreams {
    _input: cpal::Stream,
    _output: cpal::Stream,
    input_index: usize,
    output_index: usize,
}

struct EngineInner {
    settings: EngineSettings,
    streams: Option<ActiveStreams>,
    preset: PresetMode,
}

/// The audio engine: device lifecycle plus the capture→process→render path.
///
/// Stopped → `start` → Running → `stop` → Stopped. `start` while Running
/// restarts. The capture callback runs the whole processing pipeline and
/// feeds a bounded ring the render callback drains; a second ring carries
/// telemetry to the control thread.
///
/// Lifecycle transitions are serialized by a mutex; parameters are not.
/// They are Relaxed atomics the audio thread reads directly, so a buffer
/// may see a half-applied preset once, which self-corrects on the next
/// buffer. The engine owns its cpal streams and therefore lives on the
/// control thread.
pub struct AudioEngine {
    shared: Arc<SharedState>,
    registry: Arc<PresetRegistry>,
    inner: Mutex<EngineInner>,
}

impl AudioEngine {
    /// Create a stopped engine. Returns the consumer side of the telemetry
    /// ring; drain it from the UI thread.
    pub fn new(
        params: Arc<ParameterSet>,
        registry: Arc<PresetRegistry>,
        settings: EngineSettings,
    ) -> (Self, rtrb::Consumer<AudioEvent>) {
        let (event_tx, event_rx) = rtrb::RingBuffer::<AudioEvent>::new(EVENT_QUEUE_CAPACITY);

        let engine = Self {
            shared: Arc::new(SharedState {
                params,
                pitch_factor: AtomicF32::new(1.0),
                direct_monitor: AtomicBool::new(false),
                running: AtomicBool::new(false),
                events: Mutex::new(event_tx),
            }),
            registry,
            inner: Mutex::new(EngineInner {
                settings,
                streams: None,
                preset: PresetMode::Clean,
            }),
        };

        (engine, event_rx)
    }

    /// Start capturing from and rendering to the given device indices.
    ///
    /// An already-running engine is stopped first. On any failure the
    /// engine is left Stopped and the error carries the cause.
    pub fn start(&self, input_index: usize, output_index: usize) -> Result<()> {
        let mut inner = self.inner.lock();
        self.teardown(&mut inner);
        self.start_locked(&mut inner, input_index, output_index)
    }

    /// Stop the transport. Synchronous: once this returns, no callback
    /// references the old streams.
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        self.teardown(&mut inner);
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Relaxed)
    }

    pub fn params(&self) -> &Arc<ParameterSet> {
        &self.shared.params
    }

    pub fn pitch_factor(&self) -> f32 {
        self.shared.pitch_factor.get()
    }

    /// Set the pitch ratio. Non-positive values are treated as 1.0 by the
    /// shifter, so nothing is rejected here.
    pub fn set_pitch_factor(&self, factor: f32) {
        self.shared.pitch_factor.set(factor);
    }

    pub fn direct_monitor(&self) -> bool {
        self.shared.direct_monitor.load(Ordering::Relaxed)
    }

    pub fn set_direct_monitor(&self, enabled: bool) {
        self.shared.direct_monitor.store(enabled, Ordering::Relaxed);
    }

    pub fn set_stereo_width(&self, width: f32) {
        self.shared.params.stereo_width.set(width.clamp(0.0, 2.0));
    }

    pub fn preset(&self) -> PresetMode {
        self.inner.lock().preset
    }

    /// Apply a voice mode: its parameter configuration plus its base pitch
    pub fn set_preset(&self, mode: PresetMode) {
        let config = self.registry.apply(mode, &self.shared.params);
        self.shared.pitch_factor.set(config.base_pitch);
        self.inner.lock().preset = mode;
    }

    pub fn settings(&self) -> EngineSettings {
        self.inner.lock().settings
    }

    /// Replace the transport settings; a running engine is restarted on the
    /// devices it was using.
    pub fn apply_settings(&self, settings: EngineSettings) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.settings = settings;

        let devices = inner
            .streams
            .as_ref()
            .map(|streams| (streams.input_index, streams.output_index));
        if let Some((input_index, output_index)) = devices {
            self.teardown(&mut inner);
            self.start_locked(&mut inner, input_index, output_index)?;
        }
        Ok(())
    }

    fn start_locked(
        &self,
        inner: &mut EngineInner,
        input_index: usize,
        output_index: usize,
    ) -> Result<()> {
        let settings = inner.settings;
        let channels = settings.channels.max(1);

        let input_device = devices::input_device_at(input_index)?;
        let output_device = devices::output_device_at(output_index)?;

        let buffer_frames =
            ((settings.sample_rate as u64 * settings.buffer_ms as u64) / 1000).max(1) as u32;
        let config = StreamConfig {
            channels,
            sample_rate: SampleRate(settings.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(buffer_frames),
        };

        // The render ring holds a full latency window plus headroom
        let latency_samples =
            (settings.sample_rate as usize * settings.latency_ms as usize / 1000)
                * channels as usize;
        let ring_capacity = (latency_samples * 2).max(1024);
        let (ring_tx, ring_rx) = rtrb::RingBuffer::<f32>::new(ring_capacity);

        let input_format = input_device
            .default_input_config()
            .context("no default capture config for input device")?
            .sample_format();
        let output_format = output_device
            .default_output_config()
            .context("no default render config for output device")?
            .sample_format();

        let processor = FrameProcessor::new(
            Arc::clone(&self.shared.params),
            settings.sample_rate,
            channels as usize,
        );

        let input_stream = match input_format {
            SampleFormat::F32 => {
                self.build_input_stream::<f32>(&input_device, &config, processor, ring_tx)?
            }
            SampleFormat::I16 => {
                self.build_input_stream::<i16>(&input_device, &config, processor, ring_tx)?
            }
            SampleFormat::U16 => {
                self.build_input_stream::<u16>(&input_device, &config, processor, ring_tx)?
            }
            other => return Err(anyhow!("unsupported capture sample format {:?}", other)),
        };

        let output_stream = match output_format {
            SampleFormat::F32 => {
                self.build_output_stream::<f32>(&output_device, &config, ring_rx)?
            }
            SampleFormat::I16 => {
                self.build_output_stream::<i16>(&output_device, &config, ring_rx)?
            }
            SampleFormat::U16 => {
                self.build_output_stream::<u16>(&output_device, &config, ring_rx)?
            }
            other => return Err(anyhow!("unsupported render sample format {:?}", other)),
        };

        output_stream
            .play()
            .context("failed to start render stream")?;
        input_stream
            .play()
            .context("failed to start capture stream")?;

        self.shared.running.store(true, Ordering::Relaxed);
        inner.streams = Some(ActiveStreams {
            _input: input_stream,
            _output: output_stream,
            input_index,
            output_index,
        });

        log::info!(
            "Engine running: {} Hz, {} ch, {} ms buffer, {} ms latency",
            settings.sample_rate,
            channels,
            settings.buffer_ms,
            settings.latency_ms
        );
        Ok(())
    }

    /// Flip to Stopped and release the transport. Runs to completion under
    /// the lifecycle lock; the capture callback checks the running flag, so
    /// nothing touches the ring after the streams drop.
    fn teardown(&self, inner: &mut EngineInner) {
        self.shared.mark_stopped();
        if inner.streams.take().is_some() {
            log::info!("Engine stopped");
        }
    }

    fn build_input_stream<T>(
        &self,
        device: &cpal::Device,
        config: &StreamConfig,
        mut processor: FrameProcessor,
        mut ring: rtrb::Producer<f32>,
    ) -> Result<cpal::Stream>
    where
        T: cpal::SizedSample,
        f32: cpal::FromSample<T>,
    {
        let shared = Arc::clone(&self.shared);
        let err_shared = Arc::clone(&self.shared);
        let mut scratch: Vec<f32> = Vec::new();

        let stream = device
            .build_input_stream(
                config,
                move |data: &[T], _: &cpal::InputCallbackInfo| {
                    if !shared.running.load(Ordering::Relaxed) {
                        return;
                    }

                    scratch.resize(data.len(), 0.0);
                    for (dst, src) in scratch.iter_mut().zip(data.iter()) {
                        *dst = (*src).to_sample::<f32>();
                    }

                    let pitch_factor = shared.pitch_factor.get();
                    let monitor = shared.direct_monitor.load(Ordering::Relaxed);
                    let (output, telemetry) = processor.process(&scratch, pitch_factor, monitor);

                    // Captured order is render order: one SPSC ring, no
                    // reordering. A full ring drops the excess samples.
                    let writable = ring.slots().min(output.len());
                    if let Ok(mut chunk) = ring.write_chunk(writable) {
                        // The chunk may be split across the ring's wrap point
                        let (first, second) = chunk.as_mut_slices();
                        let mid = first.len();
                        first.copy_from_slice(&output[..mid]);
                        second.copy_from_slice(&output[mid..mid + second.len()]);
                        chunk.commit_all();
                    }

                    if let Some(mut events) = shared.events.try_lock() {
                        let _ = events.push(AudioEvent::InputLevel(telemetry.input));
                        let _ = events.push(AudioEvent::OutputLevel(telemetry.output));
                        let _ = events.push(AudioEvent::Waveform(telemetry.waveform));
                    }
                },
                move |err| {
                    log::error!("Capture stream error: {}", err);
                    err_shared.mark_stopped();
                },
                None,
            )
            .context("failed to build capture stream")?;

        Ok(stream)
    }

    fn build_output_stream<T>(
        &self,
        device: &cpal::Device,
        config: &StreamConfig,
        mut ring: rtrb::Consumer<f32>,
    ) -> Result<cpal::Stream>
    where
        T: cpal::SizedSample + cpal::FromSample<f32>,
    {
        let err_shared = Arc::clone(&self.shared);

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let readable = ring.slots().min(data.len());
                    let mut written = 0;
                    if let Ok(chunk) = ring.read_chunk(readable) {
                        let (first, second) = chunk.as_slices();
                        for &sample in first.iter().chain(second.iter()) {
                            data[written] = cpal::Sample::from_sample(sample);
                            written += 1;
                        }
                        chunk.commit_all();
                    }
                    // Underrun: render silence for the remainder
                    for dst in data[written..].iter_mut() {
                        *dst = cpal::Sample::from_sample(0.0f32);
                    }
                },
                move |err| {
                    log::error!("Render stream error: {}", err);
                    err_shared.mark_stopped();
                },
                None,
            )
            .context("failed to build render stream")?;

        Ok(stream)
    }
}
