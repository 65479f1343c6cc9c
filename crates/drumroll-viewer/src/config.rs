//! Viewer configuration
//!
//! Stored as YAML in `~/.config/drumroll/config.yaml`. Every section is
//! optional; missing fields take their defaults.

use std::path::{Path, PathBuf};

use drumroll_core::audio::AudioConfig;
use drumroll_core::config::{default_config_path as config_file, load_config, DisplayConfig};
use drumroll_core::LaneConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub display: DisplayConfig,
    pub audio: AudioConfig,
    /// Lane order, names and colors; validated when the session is built
    pub lanes: LaneConfig,
    /// Initial window width
    pub window_width: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            audio: AudioConfig::default(),
            lanes: LaneConfig::default(),
            window_width: 1100.0,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&mut self) {
        self.display.validate();
        self.audio.validate();
        self.window_width = if self.window_width.is_finite() {
            self.window_width.clamp(400.0, 4000.0)
        } else {
            1100.0
        };
    }
}

pub fn default_config_path() -> PathBuf {
    config_file("config.yaml")
}

/// Load and clamp the viewer config
pub fn load_viewer_config(path: &Path) -> ViewerConfig {
    let mut config: ViewerConfig = load_config(path);
    config.validate();
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use drumroll_core::{DrumClass, Rgb};
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "display:\n  lane_height: 2.0\nwindow_width: 900\n").unwrap();

        let config = load_viewer_config(&path);
        assert_eq!(config.display.lane_height, 16.0);
        assert_eq!(config.display.left_pad, 60.0);
        assert_eq!(config.window_width, 900.0);
        assert_eq!(config.lanes, LaneConfig::default());
    }

    #[test]
    fn test_lane_colors_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = ViewerConfig::default();
        if let Some(style) = config.lanes.classes.get_mut(&DrumClass::Snare) {
            style.color = Rgb::new(0x12, 0x34, 0x56);
            style.display_name = "Snare Drum".to_string();
        }
        std::fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("'#123456'") || contents.contains("\"#123456\""));

        assert_eq!(load_viewer_config(&path), config);
    }
}
