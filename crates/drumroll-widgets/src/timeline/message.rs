//! Messages understood by the timeline widget

use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineMessage {
    /// Display refresh tick from the render loop
    Frame(Instant),
    /// Canvas observed a container width different from the cached one
    Resized(f32),
    /// Host reported a new device pixel ratio
    ScaleFactorChanged(f32),
    /// Seek to an absolute time in seconds
    Seek(f64),
    TogglePlayback,
    /// Relative seek in seconds
    Nudge(f64),
    /// Volume slider value, 0 to 100
    SetVolume(f32),
}
