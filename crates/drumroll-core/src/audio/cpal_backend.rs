//! CPAL output stream playing a [`PcmBuffer`]
//!
//! The UI thread sends commands through a lock-free SPSC ring; the audio
//! callback reports its position back through atomics. Every command carries
//! a generation number so the UI can tell whether the callback has caught up
//! with its last request yet.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::SampleFormat;

use super::config::AudioConfig;
use super::device::find_output_device;
use super::error::{AudioError, AudioResult};
use super::output::{AudioOutput, OutputReport};
use super::pcm::PcmBuffer;

/// Capacity of the command ring
const COMMAND_QUEUE_SIZE: usize = 64;

#[derive(Debug, Clone, Copy)]
enum OutputCommand {
    Play { generation: u64 },
    Pause { generation: u64 },
    Seek { frame: f64, generation: u64 },
}

impl OutputCommand {
    fn generation(&self) -> u64 {
        match *self {
            OutputCommand::Play { generation }
            | OutputCommand::Pause { generation }
            | OutputCommand::Seek { generation, .. } => generation,
        }
    }
}

/// State shared between the UI and the audio callback
struct OutputAtomics {
    /// Source frame under the read head
    position: AtomicU64,
    playing: AtomicBool,
    ended: AtomicBool,
    volume_bits: AtomicU32,
    applied_generation: AtomicU64,
    /// Written by the stream error callback, never by the data callback
    failure: Mutex<Option<String>>,
}

impl OutputAtomics {
    fn new() -> Self {
        Self {
            position: AtomicU64::new(0),
            playing: AtomicBool::new(false),
            ended: AtomicBool::new(false),
            volume_bits: AtomicU32::new(1.0_f32.to_bits()),
            applied_generation: AtomicU64::new(0),
            failure: Mutex::new(None),
        }
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }
}

/// Everything the audio callback owns
struct PlaybackCallback {
    buffer: Arc<PcmBuffer>,
    commands: rtrb::Consumer<OutputCommand>,
    atomics: Arc<OutputAtomics>,
    /// Fractional source frame
    cursor: f64,
    /// Source frames advanced per device frame
    step: f64,
    playing: bool,
    channels: usize,
}

impl PlaybackCallback {
    fn process_commands(&mut self) {
        let end = self.buffer.frames() as f64;
        while let Ok(command) = self.commands.pop() {
            match command {
                OutputCommand::Play { .. } => {
                    if self.cursor < end {
                        self.playing = true;
                        self.atomics.ended.store(false, Ordering::Relaxed);
                    }
                }
                OutputCommand::Pause { .. } => self.playing = false,
                OutputCommand::Seek { frame, .. } => {
                    self.cursor = frame.clamp(0.0, end);
                    self.atomics.ended.store(false, Ordering::Relaxed);
                }
            }
            self.atomics
                .position
                .store(self.cursor as u64, Ordering::Relaxed);
            self.atomics
                .playing
                .store(self.playing, Ordering::Relaxed);
            self.atomics
                .applied_generation
                .store(command.generation(), Ordering::Release);
        }
    }

    fn render(&mut self, data: &mut [f32]) {
        self.process_commands();

        let volume = self.atomics.volume();
        let end = self.buffer.frames() as f64;

        for frame in data.chunks_mut(self.channels) {
            if !self.playing {
                frame.fill(0.0);
                continue;
            }
            if self.cursor >= end {
                self.playing = false;
                self.atomics.playing.store(false, Ordering::Relaxed);
                self.atomics.ended.store(true, Ordering::Relaxed);
                frame.fill(0.0);
                continue;
            }
            for (channel, out) in frame.iter_mut().enumerate() {
                *out = self.buffer.output_sample(self.cursor, channel, self.channels) * volume;
            }
            self.cursor += self.step;
        }

        self.atomics
            .position
            .store(self.cursor.min(end) as u64, Ordering::Relaxed);
    }
}

/// UI side of the command ring
///
/// A command that does not fit is held back instead of dropped. Held
/// commands coalesce: only the latest seek and the latest play state are
/// kept, and they are pushed (seek first) once the callback drains the ring.
struct CommandSender {
    producer: rtrb::Producer<OutputCommand>,
    /// Generation of the last command actually in the ring
    sent_generation: u64,
    deferred_seek: Option<f64>,
    deferred_playing: Option<bool>,
}

impl CommandSender {
    fn new(producer: rtrb::Producer<OutputCommand>) -> Self {
        Self {
            producer,
            sent_generation: 0,
            deferred_seek: None,
            deferred_playing: None,
        }
    }

    fn seek(&mut self, frame: f64) {
        self.deferred_seek = Some(frame);
        self.flush();
    }

    fn set_playing(&mut self, playing: bool) {
        self.deferred_playing = Some(playing);
        self.flush();
    }

    fn has_deferred(&self) -> bool {
        self.deferred_seek.is_some() || self.deferred_playing.is_some()
    }

    /// Whether the callback has applied everything requested so far
    fn is_caught_up(&self, applied_generation: u64) -> bool {
        !self.has_deferred() && applied_generation >= self.sent_generation
    }

    /// Push held commands while the ring has room
    fn flush(&mut self) {
        if let Some(frame) = self.deferred_seek {
            if !self.push(|generation| OutputCommand::Seek { frame, generation }) {
                return;
            }
            self.deferred_seek = None;
        }
        if let Some(playing) = self.deferred_playing {
            let pushed = self.push(|generation| {
                if playing {
                    OutputCommand::Play { generation }
                } else {
                    OutputCommand::Pause { generation }
                }
            });
            if pushed {
                self.deferred_playing = None;
            }
        }
    }

    fn push(&mut self, command: impl FnOnce(u64) -> OutputCommand) -> bool {
        let generation = self.sent_generation + 1;
        match self.producer.push(command(generation)) {
            Ok(()) => {
                self.sent_generation = generation;
                true
            }
            Err(_) => {
                log::debug!("CpalOutput: command queue full, holding command back");
                false
            }
        }
    }
}

/// Audio output backed by a CPAL stream
pub struct CpalOutput {
    _stream: cpal::Stream,
    commands: CommandSender,
    atomics: Arc<OutputAtomics>,
    sample_rate: u32,
    total_frames: u64,
    /// Position to report until the callback applies the last command
    pending_position: f64,
    device_name: String,
}

impl CpalOutput {
    /// Open the configured device and start a (paused) stream
    pub fn open(buffer: Arc<PcmBuffer>, config: &AudioConfig) -> AudioResult<Self> {
        let device = find_output_device(config.device.as_deref())?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let supported = select_output_config(&device, buffer.sample_rate())?;
        let mut stream_config: cpal::StreamConfig = supported.config();
        if let Some(frames) = config.buffer_size.as_frames() {
            stream_config.buffer_size = cpal::BufferSize::Fixed(frames);
        }

        let device_rate = stream_config.sample_rate.0;
        let channels = stream_config.channels as usize;
        log::info!(
            "Opening audio output '{}': {} Hz, {} ch (source {} Hz, {} ch)",
            device_name,
            device_rate,
            channels,
            buffer.sample_rate(),
            buffer.channels()
        );

        let (producer, consumer) = rtrb::RingBuffer::new(COMMAND_QUEUE_SIZE);
        let atomics = Arc::new(OutputAtomics::new());

        let mut callback = PlaybackCallback {
            buffer: buffer.clone(),
            commands: consumer,
            atomics: atomics.clone(),
            cursor: 0.0,
            step: buffer.sample_rate() as f64 / device_rate as f64,
            playing: false,
            channels,
        };

        let error_atomics = atomics.clone();
        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| callback.render(data),
                move |err| {
                    log::error!("Audio stream error: {}", err);
                    if let Ok(mut failure) = error_atomics.failure.lock() {
                        failure.get_or_insert_with(|| err.to_string());
                    }
                },
                None,
            )
            .map_err(|e| AudioError::StreamBuildError(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlayError(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            commands: CommandSender::new(producer),
            atomics,
            sample_rate: buffer.sample_rate(),
            total_frames: buffer.frames() as u64,
            pending_position: 0.0,
            device_name,
        })
    }

    fn reported_position(&self) -> f64 {
        let frame = self.atomics.position.load(Ordering::Relaxed).min(self.total_frames);
        frame as f64 / self.sample_rate as f64
    }

    fn caught_up(&self) -> bool {
        self.commands
            .is_caught_up(self.atomics.applied_generation.load(Ordering::Acquire))
    }
}

impl AudioOutput for CpalOutput {
    fn play(&mut self) {
        if self.caught_up() {
            self.pending_position = self.reported_position();
        }
        self.commands.set_playing(true);
    }

    fn pause(&mut self) {
        if self.caught_up() {
            self.pending_position = self.reported_position();
        }
        self.commands.set_playing(false);
    }

    fn seek(&mut self, seconds: f64) {
        self.pending_position = seconds;
        self.commands.seek(seconds * self.sample_rate as f64);
    }

    fn set_volume(&mut self, volume: f32) {
        self.atomics
            .volume_bits
            .store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    fn poll(&mut self, _now: Instant) -> OutputReport {
        self.commands.flush();

        let failure = self
            .atomics
            .failure
            .lock()
            .ok()
            .and_then(|failure| failure.clone());

        if !self.caught_up() {
            return OutputReport {
                position: self.pending_position,
                ended: false,
                failure,
            };
        }

        OutputReport {
            position: self.reported_position(),
            ended: self.atomics.ended.load(Ordering::Relaxed),
            failure,
        }
    }

    fn name(&self) -> String {
        self.device_name.clone()
    }
}

/// Pick an f32 stream config, preferring the source rate and stereo
fn select_output_config(
    device: &cpal::Device,
    source_rate: u32,
) -> AudioResult<cpal::SupportedStreamConfig> {
    let supported_configs: Vec<_> = device
        .supported_output_configs()
        .map_err(|e| AudioError::ConfigError(e.to_string()))?
        .filter(|c| c.sample_format() == SampleFormat::F32)
        .collect();

    if supported_configs.is_empty() {
        return Err(AudioError::UnsupportedFormat(
            "device offers no f32 output configuration".to_string(),
        ));
    }

    let in_range = |c: &cpal::SupportedStreamConfigRange| {
        source_rate >= c.min_sample_rate().0 && source_rate <= c.max_sample_rate().0
    };

    let best = supported_configs
        .iter()
        .find(|c| c.channels() >= 2 && in_range(c))
        .or_else(|| supported_configs.iter().find(|c| in_range(c)))
        .or_else(|| supported_configs.iter().find(|c| c.channels() >= 2))
        .or_else(|| supported_configs.first())
        .ok_or_else(|| AudioError::ConfigError("No suitable output configuration".to_string()))?;

    if in_range(best) {
        Ok(best.clone().with_sample_rate(cpal::SampleRate(source_rate)))
    } else {
        log::warn!(
            "Audio device doesn't support {}Hz, resampling to {}Hz",
            source_rate,
            best.max_sample_rate().0
        );
        Ok(best.clone().with_max_sample_rate())
    }
}
