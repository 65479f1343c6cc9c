//! The embeddable timeline: canvas, controls, transport and frame loop

use drumroll_core::config::DisplayConfig;
use drumroll_core::{AudioTransport, GeometryCache, HitDataset, LaneLayout, PlaybackState};
use iced::widget::column;
use iced::{event, window, Element, Event, Subscription};

use super::input::volume_from_slider;
use super::message::TimelineMessage;
use super::render_loop::RenderLoop;
use super::view::{control_bar, timeline_canvas};

/// Self-contained drum-hit timeline for one transcription result
///
/// Owns its data outright: the dataset and layout are immutable after
/// construction, the transport is the only writer of playback state, and
/// the geometry cache is only written on the resize path.
pub struct TimelineWidget {
    dataset: HitDataset,
    layout: LaneLayout,
    transport: AudioTransport,
    display: DisplayConfig,
    geometry: GeometryCache,
    render_loop: RenderLoop,
    device_pixel_ratio: f32,
    mounted: bool,
}

impl TimelineWidget {
    pub fn new(
        dataset: HitDataset,
        layout: LaneLayout,
        transport: AudioTransport,
        display: DisplayConfig,
    ) -> Self {
        let geometry = GeometryCache::new(display, layout.lane_count(), dataset.duration());

        log::info!(
            "TimelineWidget: {} hits in {} lanes over {:.2}s (audio {:.2}s via {})",
            dataset.len(),
            layout.lane_count(),
            dataset.duration(),
            transport.duration(),
            transport.output_name()
        );

        Self {
            dataset,
            layout,
            transport,
            display,
            geometry,
            render_loop: RenderLoop::new(),
            device_pixel_ratio: display.scale_factor,
            mounted: false,
        }
    }

    /// Height the host must reserve for the widget
    pub fn required_height(display: &DisplayConfig, lane_count: usize) -> f32 {
        display.total_height(lane_count)
    }

    /// Start drawing; the playhead and frame loop run while mounted
    pub fn mount(&mut self) {
        self.mounted = true;
        self.render_loop.start();
    }

    /// Stop the frame loop and silence playback
    pub fn unmount(&mut self) {
        self.render_loop.stop();
        self.transport.pause();
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn update(&mut self, message: TimelineMessage) {
        match message {
            TimelineMessage::Frame(now) => {
                if self.render_loop.begin_frame() {
                    self.transport.sync(now);
                }
            }
            TimelineMessage::Resized(width) => {
                self.geometry.observe(width, self.device_pixel_ratio);
            }
            TimelineMessage::ScaleFactorChanged(ratio) => {
                if !ratio.is_finite() || ratio <= 0.0 || ratio == self.device_pixel_ratio {
                    return;
                }
                self.device_pixel_ratio = ratio;
                if let Some(width) = self.geometry.geometry().map(|g| g.width_px) {
                    self.geometry.observe(width, ratio);
                }
            }
            TimelineMessage::Seek(time) => self.transport.seek(time),
            TimelineMessage::TogglePlayback => self.transport.toggle(),
            TimelineMessage::Nudge(delta) => {
                let target = self.transport.state().current_time + delta;
                self.transport.seek(target);
            }
            TimelineMessage::SetVolume(value) => {
                self.transport.set_volume(volume_from_slider(value));
            }
        }
    }

    pub fn view(&self) -> Element<'_, TimelineMessage> {
        let lanes = self.layout.lane_count();
        column![
            timeline_canvas(
                &self.dataset,
                &self.layout,
                &self.geometry,
                self.transport.state(),
                self.device_pixel_ratio,
                self.mounted,
                self.display.timeline_height(lanes),
            ),
            control_bar(self.transport.state(), self.display.control_bar_height),
        ]
        .into()
    }

    /// Frame ticks while mounted, plus device pixel ratio changes
    pub fn subscription(&self) -> Subscription<TimelineMessage> {
        Subscription::batch([
            self.render_loop.subscription(),
            event::listen_with(rescale_message),
        ])
    }

    pub fn playback(&self) -> &PlaybackState {
        self.transport.state()
    }

    pub fn transport(&self) -> &AudioTransport {
        &self.transport
    }

    pub fn dataset(&self) -> &HitDataset {
        &self.dataset
    }

    pub fn layout(&self) -> &LaneLayout {
        &self.layout
    }

    pub fn geometry(&self) -> &GeometryCache {
        &self.geometry
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }
}

fn rescale_message(
    event: Event,
    _status: event::Status,
    _window: window::Id,
) -> Option<TimelineMessage> {
    match event {
        Event::Window(window::Event::Rescaled(ratio)) => {
            Some(TimelineMessage::ScaleFactorChanged(ratio))
        }
        _ => None,
    }
}
