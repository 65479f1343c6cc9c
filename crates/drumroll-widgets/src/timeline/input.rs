//! Pointer and keyboard input for the timeline
//!
//! Input is translated into [`InputAction`]s against the current geometry;
//! the widget applies them to the transport.

use drumroll_core::{CoordinateMapper, ViewportGeometry};
use iced::keyboard::{self, key::Named};
use iced::Point;

/// Seconds moved by one arrow key press
pub const NUDGE_SECONDS: f64 = 1.0;

/// Canvas interaction state
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    /// Left button went down inside the roll and is still held
    pub scrubbing: bool,
    /// Last pointer position over the canvas
    pub hover: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Seek(f64),
    TogglePlayback,
    Nudge(f64),
}

/// Translates input at one geometry into transport actions
#[derive(Debug, Clone, Copy)]
pub struct InputController {
    geometry: ViewportGeometry,
    mapper: CoordinateMapper,
}

impl InputController {
    pub fn new(geometry: ViewportGeometry, mapper: CoordinateMapper) -> Self {
        Self { geometry, mapper }
    }

    /// Whether a point lies on the lanes, horizontally inside the roll
    pub fn in_roll(&self, position: Point) -> bool {
        self.mapper.roll_contains(position.x)
            && position.y >= self.geometry.top_pad_px
            && position.y <= self.geometry.lanes_bottom()
    }

    /// Left button pressed; clicks outside the roll do nothing
    pub fn pointer_pressed(&self, state: &mut PointerState, position: Point) -> Option<InputAction> {
        state.hover = Some(position);
        if !self.in_roll(position) {
            return None;
        }
        state.scrubbing = true;
        Some(InputAction::Seek(self.mapper.to_time(position.x)))
    }

    /// Pointer moved; keeps seeking while a scrub is in progress
    pub fn pointer_moved(&self, state: &mut PointerState, position: Point) -> Option<InputAction> {
        state.hover = Some(position);
        state
            .scrubbing
            .then(|| InputAction::Seek(self.mapper.to_time(position.x)))
    }

    pub fn pointer_released(&self, state: &mut PointerState) {
        state.scrubbing = false;
    }

    pub fn pointer_left(&self, state: &mut PointerState) {
        state.hover = None;
    }

    pub fn key_pressed(&self, key: &keyboard::Key) -> Option<InputAction> {
        match key {
            keyboard::Key::Named(Named::Space) => Some(InputAction::TogglePlayback),
            keyboard::Key::Named(Named::ArrowLeft) => Some(InputAction::Nudge(-NUDGE_SECONDS)),
            keyboard::Key::Named(Named::ArrowRight) => Some(InputAction::Nudge(NUDGE_SECONDS)),
            _ => None,
        }
    }
}

/// Volume slider position (0 to 100) to transport volume
pub fn volume_from_slider(value: f32) -> f32 {
    value / 100.0
}

/// Transport volume to slider position
pub fn slider_from_volume(volume: f32) -> f32 {
    volume * 100.0
}
