//! YAML configuration loading for any deserializable config type

use serde::de::DeserializeOwned;
use std::path::Path;

/// Load configuration from a YAML file
///
/// A missing file yields the default config. A file that can't be read or
/// parsed is logged and also yields the default; callers validate the
/// semantic content themselves.
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No config at {:?}, using defaults", path);
            return T::default();
        }
        Err(e) => {
            log::warn!("Could not read config {:?}: {}, using defaults", path, e);
            return T::default();
        }
    };

    serde_yaml::from_str::<T>(&contents)
        .map(|config| {
            log::info!("Loaded config from {:?}", path);
            config
        })
        .unwrap_or_else(|e| {
            log::warn!("Invalid config {:?}: {}, using defaults", path, e);
            T::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::layout::LaneConfig;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct TestConfig {
        display: DisplayConfig,
        lanes: LaneConfig,
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config: TestConfig = load_config(Path::new("/nonexistent/drumroll/config.yaml"));
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_loads_written_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = TestConfig::default();
        config.display.lane_height = 52.0;
        std::fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();

        let loaded: TestConfig = load_config(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unparsable_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "display: [this is not a map").unwrap();

        let loaded: TestConfig = load_config(&path);
        assert_eq!(loaded, TestConfig::default());
    }
}
