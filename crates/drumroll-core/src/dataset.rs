//! Hit dataset ingestion
//!
//! Turns producer records into validated [`DrumHit`]s. Unknown labels are
//! filtered here so they never reach layout or rendering. Times and
//! confidences are passed through untouched; values outside their nominal
//! range are only counted, and the renderer decides how to draw them.

use crate::types::{DrumClass, DrumHit, RawHit};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a transcription document
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read transcription {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse transcription {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Transcription document as written by the upstream pipeline
///
/// Either `{"duration": 30.0, "hits": [...]}` or a bare array of hits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    /// Segment duration in seconds, if the producer recorded it
    #[serde(default)]
    pub duration: Option<f64>,
    pub hits: Vec<RawHit>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptionFile {
    Document(Transcription),
    Bare(Vec<RawHit>),
}

/// Load a transcription document from a JSON file
pub fn load_transcription(path: &Path) -> Result<Transcription, DatasetError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let file: TranscriptionFile =
        serde_json::from_str(&contents).map_err(|source| DatasetError::Parse {
            path: path.display().to_string(),
            source,
        })?;

    let transcription = match file {
        TranscriptionFile::Document(doc) => doc,
        TranscriptionFile::Bare(hits) => Transcription {
            duration: None,
            hits,
        },
    };

    log::info!(
        "load_transcription: {} records from {:?}",
        transcription.hits.len(),
        path
    );
    Ok(transcription)
}

/// Validated, immutable set of hits for one transcription result
#[derive(Debug, Clone)]
pub struct HitDataset {
    hits: Vec<DrumHit>,
    duration: f64,
    dropped: usize,
    out_of_range: usize,
}

impl HitDataset {
    /// Ingest producer records
    ///
    /// Records with an unrecognised label are dropped silently. Producer order
    /// is preserved; hits are not sorted.
    pub fn from_raw<I>(raw: I, duration: f64) -> Self
    where
        I: IntoIterator<Item = RawHit>,
    {
        let mut hits = Vec::new();
        let mut dropped = 0;

        for record in raw {
            match DrumClass::from_label(&record.label) {
                Some(class) => hits.push(DrumHit::new(record.time, class, record.confidence)),
                None => {
                    log::debug!(
                        "HitDataset: dropping hit at {:.3}s with unknown label {:?}",
                        record.time,
                        record.label
                    );
                    dropped += 1;
                }
            }
        }

        Self::from_hits(hits, duration, dropped)
    }

    /// Build from a loaded transcription, using `fallback_duration` when the
    /// document doesn't carry one
    pub fn from_transcription(transcription: Transcription, fallback_duration: f64) -> Self {
        let duration = transcription.duration.unwrap_or(fallback_duration);
        Self::from_raw(transcription.hits, duration)
    }

    fn from_hits(hits: Vec<DrumHit>, duration: f64, dropped: usize) -> Self {
        let out_of_range = hits
            .iter()
            .filter(|hit| {
                !(0.0..=duration).contains(&hit.time())
                    || !(0.0..=1.0).contains(&hit.confidence())
            })
            .count();

        if out_of_range > 0 {
            log::warn!(
                "HitDataset: {} of {} hits have time or confidence outside the expected range",
                out_of_range,
                hits.len()
            );
        }

        Self {
            hits,
            duration,
            dropped,
            out_of_range,
        }
    }

    pub fn hits(&self) -> &[DrumHit] {
        &self.hits
    }

    /// Hits belonging to one class, in producer order
    pub fn hits_for(&self, class: DrumClass) -> impl Iterator<Item = &DrumHit> + '_ {
        self.hits.iter().filter(move |hit| hit.label() == class)
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Segment duration in seconds, as supplied (may be degenerate)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of records dropped for having an unknown label
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    /// Number of kept hits with time or confidence outside the nominal range
    pub fn out_of_range_count(&self) -> usize {
        self.out_of_range
    }
}
