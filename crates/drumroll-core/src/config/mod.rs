//! Configuration for drumroll applications
//!
//! - Generic YAML config loading
//! - Default config location
//! - Timeline display metrics
//!
//! # Usage
//!
//! ```ignore
//! use drumroll_core::config::{load_config, default_config_path};
//!
//! let path = default_config_path("config.yaml");
//! let config: ViewerConfig = load_config(&path);
//! ```

mod display;
mod io;
mod paths;

pub use display::DisplayConfig;
pub use io::load_config;
pub use paths::{default_config_dir, default_config_path};
