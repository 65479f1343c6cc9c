//! Audio backend error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while opening an output device
#[derive(Error, Debug)]
pub enum AudioError {
    /// No audio devices available
    #[error("No audio output devices found")]
    NoDevices,

    /// Failed to get default device
    #[error("Failed to get default audio device: {0}")]
    NoDefaultDevice(String),

    /// Device not found
    #[error("Audio device not found: {0}")]
    DeviceNotFound(String),

    /// Failed to get device configuration
    #[error("Failed to get device config: {0}")]
    ConfigError(String),

    /// Failed to build audio stream
    #[error("Failed to build audio stream: {0}")]
    StreamBuildError(String),

    /// Failed to start/play stream
    #[error("Failed to start audio stream: {0}")]
    StreamPlayError(String),

    /// Unsupported sample format
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for audio operations
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while decoding an audio file into memory
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to read {path}: {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("Segment start {start:.2}s is beyond the end of the file ({duration:.2}s)")]
    StartBeyondEnd { start: f64, duration: f64 },

    #[error("Audio segment is empty")]
    Empty,

    #[error("Invalid sample layout: {0}")]
    InvalidLayout(String),
}
