use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait};
use serde::{Deserialize, Serialize};

/// One entry in the ordered device list. The index is the position in the
/// host's enumeration order and is what `AudioEngine::start` takes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub index: usize,
    pub name: String,
}

/// Ordered list of capture devices on the default host
pub fn input_devices() -> Result<Vec<DeviceInfo>> {
    let host = cpal::default_host();
    let devices = host
        .input_devices()
        .context("failed to enumerate input devices")?;
    Ok(collect(devices))
}

/// Ordered list of render devices on the default host
pub fn output_devices() -> Result<Vec<DeviceInfo>> {
    let host = cpal::default_host();
    let devices = host
        .output_devices()
        .context("failed to enumerate output devices")?;
    Ok(collect(devices))
}

fn collect(devices: impl Iterator<Item = cpal::Device>) -> Vec<DeviceInfo> {
    devices
        .enumerate()
        .map(|(index, device)| {
            let name = device.name().unwrap_or_else(|err| {
                log::warn!("No name for audio device {}: {}", index, err);
                format!("Unnamed device {}", index)
            });
            DeviceInfo { index, name }
        })
        .collect()
}

/// Resolve a capture device by its enumeration index
pub(crate) fn input_device_at(index: usize) -> Result<cpal::Device> {
    let host = cpal::default_host();
    host.input_devices()
        .context("failed to enumerate input devices")?
        .nth(index)
        .with_context(|| format!("input device index {} out of range", index))
}

/// Resolve a render device by its enumeration index
pub(crate) fn output_device_at(index: usize) -> Result<cpal::Device> {
    let host = cpal::default_host();
    host.output_devices()
        .context("failed to enumerate output devices")?
        .nth(index)
        .with_context(|| format!("output device index {} out of range", index))
}
