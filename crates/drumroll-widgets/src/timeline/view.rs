//! Timeline view functions
//!
//! Plain functions that take state references and return elements; the
//! widget wires them together in [`TimelineWidget::view`](super::TimelineWidget::view).

use drumroll_core::{GeometryCache, HitDataset, LaneLayout, PlaybackState};
use iced::widget::{button, row, slider, text, Canvas, Space};
use iced::{Alignment, Element, Length};

use super::canvas::TimelineCanvas;
use super::input::slider_from_volume;
use super::message::TimelineMessage;

/// The roll canvas at its fixed height
pub fn timeline_canvas<'a>(
    dataset: &'a HitDataset,
    layout: &'a LaneLayout,
    geometry: &'a GeometryCache,
    playback: &'a PlaybackState,
    device_pixel_ratio: f32,
    active: bool,
    height: f32,
) -> Element<'a, TimelineMessage> {
    Canvas::new(TimelineCanvas {
        dataset,
        layout,
        geometry,
        playback,
        device_pixel_ratio,
        active,
    })
    .width(Length::Fill)
    .height(Length::Fixed(height))
    .into()
}

/// Play/pause button and volume slider
pub fn control_bar<'a>(playback: &PlaybackState, height: f32) -> Element<'a, TimelineMessage> {
    // Icon shows the action the button performs
    let icon = if playback.is_playing { "⏸" } else { "▶" };
    let play_btn = button(text(icon).size(18))
        .on_press(TimelineMessage::TogglePlayback)
        .padding(8);

    let volume = slider(
        0.0..=100.0,
        slider_from_volume(playback.volume),
        TimelineMessage::SetVolume,
    )
    .width(Length::Fixed(140.0));

    row![
        play_btn,
        Space::new().width(Length::Fixed(12.0)),
        text("Vol").size(12),
        volume,
        text(format!("{:>3.0}%", slider_from_volume(playback.volume))).size(12),
        Space::new().width(Length::Fill),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .height(Length::Fixed(height))
    .into()
}
