//! Core data types for transcribed drum hits
//!
//! A transcription is a flat list of hit events. Each event carries the time
//! (seconds from the start of the decoded audio), the drum class the model
//! picked, and the model's confidence in that pick.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of drum classes the timeline knows about
pub const NUM_DRUM_CLASSES: usize = 6;

/// Closed set of drum classes produced by the transcription pipeline
///
/// Identifiers match the labels emitted upstream (`kick_drum`, `snare`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrumClass {
    KickDrum,
    Snare,
    TomH,
    HihatC,
    Ride,
    Crash,
}

impl DrumClass {
    /// All classes, in declaration order
    pub const ALL: [DrumClass; NUM_DRUM_CLASSES] = [
        DrumClass::KickDrum,
        DrumClass::Snare,
        DrumClass::TomH,
        DrumClass::HihatC,
        DrumClass::Ride,
        DrumClass::Crash,
    ];

    /// Wire identifier used by the transcription producer
    pub fn id(self) -> &'static str {
        match self {
            DrumClass::KickDrum => "kick_drum",
            DrumClass::Snare => "snare",
            DrumClass::TomH => "tom_h",
            DrumClass::HihatC => "hihat_c",
            DrumClass::Ride => "ride",
            DrumClass::Crash => "crash",
        }
    }

    /// Look up a class by its wire identifier
    ///
    /// Returns `None` for anything the timeline has no lane for.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|class| class.id() == label)
    }
}

impl fmt::Display for DrumClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DrumClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("unknown drum class: {}", s))
    }
}

/// One detected drum event, validated at ingestion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrumHit {
    time: f64,
    label: DrumClass,
    confidence: f32,
}

impl DrumHit {
    pub fn new(time: f64, label: DrumClass, confidence: f32) -> Self {
        Self {
            time,
            label,
            confidence,
        }
    }

    /// Onset time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn label(&self) -> DrumClass {
        self.label
    }

    /// Model confidence, nominally in `[0, 1]`
    pub fn confidence(&self) -> f32 {
        self.confidence
    }
}

/// A hit record as emitted by the transcription producer
///
/// The label is kept as a string until ingestion so that unknown labels can
/// be filtered instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    pub time: f64,
    #[serde(alias = "prediction")]
    pub label: String,
    #[serde(default)]
    pub confidence: f32,
}

impl RawHit {
    pub fn new(time: f64, label: impl Into<String>, confidence: f32) -> Self {
        Self {
            time,
            label: label.into(),
            confidence,
        }
    }
}
