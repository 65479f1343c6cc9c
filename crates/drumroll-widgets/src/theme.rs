//! Shared theme constants for the timeline
//!
//! Lane colors come from the lane configuration; everything else drawn on
//! the roll uses the fixed palette below.

use drumroll_core::Rgb;
use iced::Color;

/// Canvas background behind the gutter and pads
pub const BACKGROUND: Color = Color::from_rgb(0.09, 0.09, 0.11);

/// Alternating lane shades, indexed by `lane % 2`
pub const LANE_SHADES: [Color; 2] = [
    Color::from_rgb(0.13, 0.13, 0.16),
    Color::from_rgb(0.16, 0.16, 0.19),
];

pub const LANE_SEPARATOR: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.08);

/// Tick gridlines and tick labels
pub const GRID_LINE: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.12);
pub const GRID_LABEL: Color = Color::from_rgb(0.55, 0.55, 0.6);

pub const PLAYHEAD: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const READOUT: Color = Color::from_rgb(0.85, 0.85, 0.9);

/// Banner shown when audio cannot be played
pub const WARNING: Color = Color::from_rgb(0.95, 0.55, 0.2);

pub const TOOLTIP_BACKGROUND: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.8);
pub const TOOLTIP_TEXT: Color = Color::from_rgb(1.0, 1.0, 1.0);

/// Convert a configured lane color
pub fn to_color(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.to_f32();
    Color::from_rgb(r, g, b)
}

/// Lane color with an explicit alpha
pub fn to_color_alpha(rgb: Rgb, alpha: f32) -> Color {
    let [r, g, b] = rgb.to_f32();
    Color::from_rgba(r, g, b, alpha)
}
