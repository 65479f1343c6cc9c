//! Audio playback for the timeline
//!
//! - [`decode_wav`] loads one segment of a file into a [`PcmBuffer`]
//! - [`AudioTransport`] owns playback state and drives an [`AudioOutput`]
//! - [`CpalOutput`] plays through a CPAL device; [`SilentOutput`] keeps time
//!   without one

mod config;
mod cpal_backend;
mod decode;
mod device;
mod error;
mod output;
mod pcm;
mod transport;

pub use config::{AudioConfig, BufferSize};
pub use cpal_backend::CpalOutput;
pub use decode::{decode_wav, SegmentWindow, DEFAULT_SEGMENT_SECONDS};
pub use device::{find_output_device, output_device_names};
pub use error::{AudioError, AudioResult, DecodeError};
pub use output::{AudioOutput, OutputReport, SilentOutput};
pub use pcm::PcmBuffer;
pub use transport::{AudioTransport, PlaybackState, TransportStatus};
