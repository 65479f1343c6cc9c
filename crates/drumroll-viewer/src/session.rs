//! Everything one viewer window shows, loaded up front

use std::sync::Arc;

use anyhow::{Context, Result};
use drumroll_core::audio::{decode_wav, AudioTransport};
use drumroll_core::config::DisplayConfig;
use drumroll_core::{HitDataset, LaneLayout};

use crate::args::Args;
use crate::config::ViewerConfig;
use crate::source::TranscriptionSource;

/// Largest audio/transcription duration mismatch accepted silently
const DURATION_TOLERANCE: f64 = 0.05;

pub struct Session {
    pub title: String,
    pub dataset: HitDataset,
    pub layout: LaneLayout,
    pub transport: AudioTransport,
    pub display: DisplayConfig,
}

pub fn load_session(
    args: &Args,
    config: &ViewerConfig,
    source: &dyn TranscriptionSource,
) -> Result<Session> {
    let layout = LaneLayout::new(&config.lanes).context("Invalid lane configuration")?;

    let pcm = decode_wav(&args.audio, args.window)
        .with_context(|| format!("Failed to load audio {}", args.audio.display()))?;

    let transcription = source
        .load()
        .with_context(|| format!("Failed to load transcription {}", source.describe()))?;

    let dataset = HitDataset::from_transcription(transcription, pcm.duration());
    if (dataset.duration() - pcm.duration()).abs() > DURATION_TOLERANCE {
        log::warn!(
            "Transcription covers {:.2}s but the audio segment is {:.2}s",
            dataset.duration(),
            pcm.duration()
        );
    }
    if dataset.dropped_count() > 0 {
        log::info!(
            "Ignored {} hits with unknown drum labels",
            dataset.dropped_count()
        );
    }

    let pcm = Arc::new(pcm);
    let transport = if args.silent {
        AudioTransport::silent(pcm)
    } else {
        AudioTransport::open(pcm, &config.audio)
    };

    let title = format!(
        "drumroll - {} ({:.1}s @ {:.1}s)",
        source.describe(),
        dataset.duration(),
        args.window.start
    );

    Ok(Session {
        title,
        dataset,
        layout,
        transport,
        display: config.display,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::JsonFileSource;
    use drumroll_core::audio::SegmentWindow;
    use drumroll_core::DrumClass;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use std::path::Path;
    use tempfile::TempDir;

    fn write_wav(path: &Path, seconds: u32) {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 1000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for _ in 0..seconds * 1000 {
            writer.write_sample(0_i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn args(dir: &TempDir) -> Args {
        Args {
            audio: dir.path().join("song.wav"),
            transcription: dir.path().join("hits.json"),
            window: SegmentWindow {
                start: 1.0,
                length: Some(2.0),
            },
            config: None,
            silent: true,
        }
    }

    #[test]
    fn test_loads_segment_and_hits() {
        let dir = TempDir::new().unwrap();
        let args = args(&dir);
        write_wav(&args.audio, 5);
        std::fs::write(
            &args.transcription,
            r#"[{"time": 0.5, "label": "kick_drum", "confidence": 0.9},
                {"time": 1.5, "label": "cowbell", "confidence": 0.4}]"#,
        )
        .unwrap();

        let source = JsonFileSource::new(&args.transcription);
        let session = load_session(&args, &ViewerConfig::default(), &source).unwrap();

        assert_eq!(session.dataset.len(), 1);
        assert_eq!(session.dataset.dropped_count(), 1);
        assert_eq!(session.dataset.duration(), 2.0);
        assert_eq!(session.transport.duration(), 2.0);
        assert_eq!(session.layout.lane_index(DrumClass::KickDrum), 5);
        assert_eq!(session.transport.output_name(), "silent");
    }

    #[test]
    fn test_invalid_lanes_fail_before_loading_audio() {
        let dir = TempDir::new().unwrap();
        let args = args(&dir);

        let mut config = ViewerConfig::default();
        config.lanes.classes.remove(&DrumClass::Crash);

        let source = JsonFileSource::new(&args.transcription);
        let err = load_session(&args, &config, &source).err().unwrap();
        assert!(err.to_string().contains("lane configuration"));
    }

    #[test]
    fn test_missing_audio_is_reported() {
        let dir = TempDir::new().unwrap();
        let args = args(&dir);
        let source = JsonFileSource::new(&args.transcription);
        let err = load_session(&args, &ViewerConfig::default(), &source).err().unwrap();
        assert!(err.to_string().contains("Failed to load audio"));
    }
}
