//! Decoded audio held in memory

use super::error::DecodeError;

/// Interleaved f32 samples for one audio segment
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl PcmBuffer {
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Result<Self, DecodeError> {
        if channels == 0 || sample_rate == 0 {
            return Err(DecodeError::InvalidLayout(format!(
                "{} channels at {} Hz",
                channels, sample_rate
            )));
        }
        if samples.len() % channels as usize != 0 {
            return Err(DecodeError::InvalidLayout(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            )));
        }
        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Length in seconds
    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    pub fn sample(&self, frame: usize, channel: usize) -> f32 {
        let channels = self.channels as usize;
        if frame >= self.frames() || channel >= channels {
            return 0.0;
        }
        self.samples[frame * channels + channel]
    }

    /// Linearly interpolated sample at a fractional frame position
    pub fn interpolated(&self, position: f64, channel: usize) -> f32 {
        if position < 0.0 {
            return 0.0;
        }
        let index = position.floor() as usize;
        let frac = (position - index as f64) as f32;
        let a = self.sample(index, channel);
        let b = self.sample(index + 1, channel);
        a + (b - a) * frac
    }

    /// Sample for one device channel
    ///
    /// Mono is copied to every output channel, a mono device gets the average
    /// of the first two channels, and device channels past the second stay
    /// silent for multichannel sources.
    pub fn output_sample(&self, position: f64, out_channel: usize, out_channels: usize) -> f32 {
        match (self.channels, out_channels) {
            (1, _) => self.interpolated(position, 0),
            (_, 1) => (self.interpolated(position, 0) + self.interpolated(position, 1)) * 0.5,
            _ if out_channel < 2 => self.interpolated(position, out_channel),
            _ => 0.0,
        }
    }
}
