//! Output seam between the transport and whatever produces sound

use std::time::Instant;

/// What an output reports back on each poll
#[derive(Debug, Clone, PartialEq)]
pub struct OutputReport {
    /// Playback position in seconds
    pub position: f64,
    /// Playback ran into the end of the buffer
    pub ended: bool,
    /// Set once the output can no longer play
    pub failure: Option<String>,
}

/// A sink the [`AudioTransport`](super::AudioTransport) drives
///
/// Commands are fire-and-forget; the transport learns about their effect on
/// the next [`poll`](AudioOutput::poll).
pub trait AudioOutput {
    fn play(&mut self);
    fn pause(&mut self);
    /// Move to `seconds`, already clamped to the buffer
    fn seek(&mut self, seconds: f64);
    fn set_volume(&mut self, volume: f32);
    fn poll(&mut self, now: Instant) -> OutputReport;
    /// Short name for logs and the status line
    fn name(&self) -> String;
}

/// Output that plays nothing and advances on the frame clock
///
/// Used when no device can be opened, and by tests.
#[derive(Debug, Clone)]
pub struct SilentOutput {
    duration: f64,
    position: f64,
    playing: bool,
    ended: bool,
    last_poll: Option<Instant>,
}

impl SilentOutput {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            position: 0.0,
            playing: false,
            ended: false,
            last_poll: None,
        }
    }
}

impl AudioOutput for SilentOutput {
    fn play(&mut self) {
        if !self.playing {
            self.playing = true;
            self.ended = false;
            self.last_poll = None;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
        self.last_poll = None;
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds.clamp(0.0, self.duration);
        self.ended = false;
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn poll(&mut self, now: Instant) -> OutputReport {
        if self.playing {
            if let Some(last) = self.last_poll {
                self.position += now.saturating_duration_since(last).as_secs_f64();
            }
            self.last_poll = Some(now);

            if self.position >= self.duration {
                self.position = self.duration;
                self.playing = false;
                self.ended = true;
            }
        }

        OutputReport {
            position: self.position,
            ended: self.ended,
            failure: None,
        }
    }

    fn name(&self) -> String {
        "silent".to_string()
    }
}
