//! Standard locations for drumroll configuration files

use std::path::PathBuf;

/// Get the configuration directory
///
/// Returns: `$XDG_CONFIG_HOME/drumroll` (or the platform equivalent),
/// falling back to `./drumroll` when no config dir is known.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("drumroll")
}

/// Get the default path of a config file inside [`default_config_dir`]
pub fn default_config_path(filename: &str) -> PathBuf {
    default_config_dir().join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_drumroll() {
        assert!(default_config_dir().ends_with("drumroll"));
    }

    #[test]
    fn test_config_path_includes_filename() {
        let path = default_config_path("viewer.yaml");
        assert!(path.ends_with("drumroll/viewer.yaml"));
    }
}
