//! Where transcription results come from
//!
//! The viewer never runs a transcriber itself; `main` constructs a source
//! and hands it to the session loader.

use std::path::PathBuf;

use drumroll_core::dataset::{load_transcription, DatasetError, Transcription};

pub trait TranscriptionSource {
    /// Human-readable origin, for logs and the window title
    fn describe(&self) -> String;

    fn load(&self) -> Result<Transcription, DatasetError>;
}

/// Transcription stored as a JSON document
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TranscriptionSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn load(&self) -> Result<Transcription, DatasetError> {
        let transcription = load_transcription(&self.path)?;
        log::info!(
            "Loaded {} hits from {}",
            transcription.hits.len(),
            self.path.display()
        );
        Ok(transcription)
    }
}
