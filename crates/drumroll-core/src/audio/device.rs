//! Output device lookup

use cpal::traits::{DeviceTrait, HostTrait};

use super::error::{AudioError, AudioResult};

/// Names of the output devices on the default host
pub fn output_device_names() -> Vec<String> {
    let host = cpal::default_host();
    match host.output_devices() {
        Ok(devices) => devices.filter_map(|d| d.name().ok()).collect(),
        Err(e) => {
            log::warn!("Failed to enumerate audio devices: {}", e);
            Vec::new()
        }
    }
}

/// Resolve a configured device name, or the host default for `None`
///
/// Names are matched exactly first, then by case-insensitive substring.
pub fn find_output_device(name: Option<&str>) -> AudioResult<cpal::Device> {
    let host = cpal::default_host();

    let Some(name) = name else {
        return host
            .default_output_device()
            .ok_or_else(|| AudioError::NoDefaultDevice("No default output device".to_string()));
    };

    let devices: Vec<cpal::Device> = host
        .output_devices()
        .map_err(|e| AudioError::ConfigError(e.to_string()))?
        .collect();
    if devices.is_empty() {
        return Err(AudioError::NoDevices);
    }

    let names: Vec<Option<String>> = devices.iter().map(|d| d.name().ok()).collect();
    let index = names
        .iter()
        .position(|n| n.as_deref() == Some(name))
        .or_else(|| {
            let needle = name.to_lowercase();
            names.iter().position(|n| {
                n.as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
            })
        })
        .ok_or_else(|| AudioError::DeviceNotFound(name.to_string()))?;

    devices
        .into_iter()
        .nth(index)
        .ok_or_else(|| AudioError::DeviceNotFound(name.to_string()))
}
