//! WAV decoding into a [`PcmBuffer`]
//!
//! Only the requested segment is read: the reader seeks to the start frame
//! and stops after `length` seconds.

use std::path::Path;

use hound::{SampleFormat, WavReader};

use super::error::DecodeError;
use super::pcm::PcmBuffer;

/// Default segment length, matching the transcription window
pub const DEFAULT_SEGMENT_SECONDS: f64 = 30.0;

/// Part of a file to load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentWindow {
    /// Offset into the file in seconds
    pub start: f64,
    /// Segment length in seconds; `None` reads to the end of the file
    pub length: Option<f64>,
}

impl Default for SegmentWindow {
    fn default() -> Self {
        Self {
            start: 0.0,
            length: Some(DEFAULT_SEGMENT_SECONDS),
        }
    }
}

impl SegmentWindow {
    pub fn whole_file() -> Self {
        Self {
            start: 0.0,
            length: None,
        }
    }
}

pub fn decode_wav(path: &Path, window: SegmentWindow) -> Result<PcmBuffer, DecodeError> {
    let wav_error = |source| DecodeError::Wav {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = WavReader::open(path).map_err(wav_error)?;
    let spec = reader.spec();
    let rate = spec.sample_rate as f64;
    let total_frames = reader.duration() as u64;

    let start_frame = (window.start.max(0.0) * rate).round() as u64;
    if start_frame >= total_frames {
        return Err(DecodeError::StartBeyondEnd {
            start: window.start,
            duration: total_frames as f64 / rate,
        });
    }

    let remaining = total_frames - start_frame;
    let frames = match window.length {
        Some(length) => ((length.max(0.0) * rate).round() as u64).min(remaining),
        None => remaining,
    };
    if frames == 0 {
        return Err(DecodeError::Empty);
    }

    reader
        .seek(start_frame as u32)
        .map_err(|e| wav_error(hound::Error::IoError(e)))?;

    let wanted = frames as usize * spec.channels as usize;
    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .take(wanted)
            .collect::<Result<_, _>>()
            .map_err(wav_error)?,
        SampleFormat::Int => {
            let scale = 1.0 / (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .take(wanted)
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()
                .map_err(wav_error)?
        }
    };

    log::info!(
        "Decoded {}: {} frames @ {} Hz, {} ch (start {:.2}s)",
        path.display(),
        samples.len() / spec.channels.max(1) as usize,
        spec.sample_rate,
        spec.channels,
        window.start
    );

    PcmBuffer::new(samples, spec.channels, spec.sample_rate)
}
