//! Audio output configuration

use serde::{Deserialize, Serialize};

/// Preferred buffer size for the output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BufferSize {
    /// Let the system choose the default buffer size
    #[default]
    Default,
    /// Request a specific buffer size in frames (may be adjusted by the system)
    Fixed(u32),
}

impl BufferSize {
    /// Get the buffer size in frames, or None for system default
    pub fn as_frames(&self) -> Option<u32> {
        match self {
            BufferSize::Default => None,
            BufferSize::Fixed(frames) => Some(*frames),
        }
    }
}

/// Output device selection and initial playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Output device name; `None` uses the host default
    pub device: Option<String>,
    pub buffer_size: BufferSize,
    /// Initial volume in `[0, 1]`
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: None,
            buffer_size: BufferSize::Default,
            volume: 1.0,
        }
    }
}

impl AudioConfig {
    pub fn validate(&mut self) {
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        if let BufferSize::Fixed(frames) = self.buffer_size {
            self.buffer_size = BufferSize::Fixed(frames.clamp(32, 8192));
        }
        if matches!(self.device.as_deref(), Some(name) if name.trim().is_empty()) {
            self.device = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let mut config = AudioConfig {
            device: Some("  ".to_string()),
            buffer_size: BufferSize::Fixed(4),
            volume: 3.0,
        };
        config.validate();
        assert_eq!(config.device, None);
        assert_eq!(config.buffer_size.as_frames(), Some(32));
        assert_eq!(config.volume, 1.0);
    }
}
