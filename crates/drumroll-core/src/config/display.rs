//! Timeline display configuration

use serde::{Deserialize, Serialize};

/// Fixed vertical metrics of the timeline and the padding around the roll
///
/// Width is fluid and comes from the host layout; everything here is in
/// logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Height of one drum lane
    pub lane_height: f32,
    /// Space above the first lane (time readout lives here)
    pub top_pad: f32,
    /// Space below the last lane (tick labels live here)
    pub bottom_pad: f32,
    /// Label gutter left of the roll
    pub left_pad: f32,
    /// Margin right of the roll
    pub right_margin: f32,
    /// Height of the play/volume control row under the canvas
    pub control_bar_height: f32,
    /// Device pixel ratio used until the host reports one
    pub scale_factor: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            lane_height: 40.0,
            top_pad: 28.0,
            bottom_pad: 24.0,
            left_pad: 60.0,
            right_margin: 10.0,
            control_bar_height: 44.0,
            scale_factor: 1.0,
        }
    }
}

impl DisplayConfig {
    /// Clamp values to ranges the renderer can lay out sensibly
    pub fn validate(&mut self) {
        self.lane_height = self.lane_height.clamp(16.0, 200.0);
        self.top_pad = self.top_pad.clamp(0.0, 200.0);
        self.bottom_pad = self.bottom_pad.clamp(0.0, 200.0);
        self.left_pad = self.left_pad.clamp(0.0, 400.0);
        self.right_margin = self.right_margin.clamp(0.0, 200.0);
        self.control_bar_height = self.control_bar_height.clamp(24.0, 120.0);
        self.scale_factor = if self.scale_factor.is_finite() {
            self.scale_factor.clamp(0.5, 4.0)
        } else {
            1.0
        };
    }

    /// Canvas height: `top_pad + lanes * lane_height + bottom_pad`
    pub fn timeline_height(&self, lane_count: usize) -> f32 {
        self.top_pad + lane_count as f32 * self.lane_height + self.bottom_pad
    }

    /// Height the host must reserve for the whole widget, control bar included
    pub fn total_height(&self, lane_count: usize) -> f32 {
        self.timeline_height(lane_count) + self.control_bar_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizing_contract() {
        let display = DisplayConfig::default();
        assert_eq!(display.timeline_height(6), 28.0 + 6.0 * 40.0 + 24.0);
        assert_eq!(display.total_height(6), display.timeline_height(6) + 44.0);
    }

    #[test]
    fn test_validate_clamps() {
        let mut display = DisplayConfig {
            lane_height: 2.0,
            scale_factor: f32::NAN,
            ..DisplayConfig::default()
        };
        display.validate();
        assert_eq!(display.lane_height, 16.0);
        assert_eq!(display.scale_factor, 1.0);
    }
}
