//! Drumroll Core - data model and playback for the drum-hit timeline
//!
//! This crate has no UI dependencies. It provides:
//! - Drum classes, hits and the per-segment hit dataset
//! - Lane layout and lane configuration
//! - Viewport geometry and the time/pixel coordinate mapper
//! - Audio decoding and the playback transport
//! - YAML configuration helpers

pub mod audio;
pub mod config;
pub mod dataset;
pub mod geometry;
pub mod layout;
pub mod types;

pub use audio::{AudioTransport, PlaybackState, TransportStatus};
pub use dataset::{HitDataset, Transcription};
pub use geometry::{CoordinateMapper, GeometryCache, ViewportGeometry};
pub use layout::{LaneConfig, LaneLayout, Rgb};
pub use types::{DrumClass, DrumHit, RawHit};
