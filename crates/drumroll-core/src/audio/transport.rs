//! Playback transport: the single authority for current time and play state

use std::sync::Arc;
use std::time::Instant;

use super::config::AudioConfig;
use super::cpal_backend::CpalOutput;
use super::output::{AudioOutput, SilentOutput};
use super::pcm::PcmBuffer;

/// Whether the transport can actually produce sound
#[derive(Debug, Clone, PartialEq)]
pub enum TransportStatus {
    Ready,
    /// Playback failed; the timeline still renders in its last state
    Unplayable(String),
}

/// Snapshot of the transport observed by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Seconds, always within `[0, duration]`
    pub current_time: f64,
    pub is_playing: bool,
    /// Within `[0, 1]`
    pub volume: f32,
    pub status: TransportStatus,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            is_playing: false,
            volume: 1.0,
            status: TransportStatus::Ready,
        }
    }
}

pub struct AudioTransport {
    output: Box<dyn AudioOutput>,
    buffer: Arc<PcmBuffer>,
    duration: f64,
    state: PlaybackState,
}

impl AudioTransport {
    pub fn new(buffer: Arc<PcmBuffer>, output: Box<dyn AudioOutput>) -> Self {
        let duration = buffer.duration();
        Self {
            output,
            buffer,
            duration,
            state: PlaybackState::default(),
        }
    }

    /// Transport that advances on the frame clock without producing sound
    pub fn silent(buffer: Arc<PcmBuffer>) -> Self {
        let output = SilentOutput::new(buffer.duration());
        Self::new(buffer, Box::new(output))
    }

    /// Open the configured output device
    ///
    /// Falls back to a silent output marked [`TransportStatus::Unplayable`]
    /// when the device cannot be opened.
    pub fn open(buffer: Arc<PcmBuffer>, config: &AudioConfig) -> Self {
        let mut transport = match CpalOutput::open(buffer.clone(), config) {
            Ok(output) => Self::new(buffer, Box::new(output)),
            Err(e) => {
                log::warn!("Audio output unavailable, continuing silently: {}", e);
                let mut transport = Self::silent(buffer);
                transport.state.status = TransportStatus::Unplayable(e.to_string());
                transport
            }
        };
        transport.set_volume(config.volume);
        transport
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn buffer(&self) -> &PcmBuffer {
        &self.buffer
    }

    pub fn output_name(&self) -> String {
        self.output.name()
    }

    /// Start playback; at the end of the segment this restarts from 0
    pub fn play(&mut self) {
        if self.state.is_playing {
            return;
        }
        if self.state.current_time >= self.duration {
            log::debug!("AudioTransport: play at end of segment, rewinding");
            self.seek(0.0);
        }
        self.output.play();
        self.state.is_playing = true;
    }

    pub fn pause(&mut self) {
        if !self.state.is_playing {
            return;
        }
        self.output.pause();
        self.state.is_playing = false;
    }

    pub fn toggle(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Jump to `time`, clamped to `[0, duration]`; the play state is kept
    pub fn seek(&mut self, time: f64) {
        let time = if time.is_nan() {
            0.0
        } else {
            time.clamp(0.0, self.duration)
        };
        self.output.seek(time);
        self.state.current_time = time;
        log::debug!("AudioTransport: seek to {:.3}s", time);
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self.output.set_volume(volume);
        self.state.volume = volume;
    }

    /// Adopt the output's position; called once per rendered frame
    pub fn sync(&mut self, now: Instant) {
        let report = self.output.poll(now);

        if let Some(reason) = report.failure {
            if self.state.status == TransportStatus::Ready {
                log::error!("AudioTransport: output failed: {}", reason);
                self.state.status = TransportStatus::Unplayable(reason);
            }
        }

        if !self.state.is_playing {
            return;
        }

        self.state.current_time = report.position.clamp(0.0, self.duration);

        if report.ended {
            self.output.pause();
            self.state.is_playing = false;
            self.state.current_time = self.duration;
            log::info!("AudioTransport: reached end at {:.2}s", self.duration);
        }
    }
}
