//! Canvas program for the timeline
//!
//! `draw` builds a [`Scene`] and replays it into an iced frame; `update`
//! turns mouse and keyboard events into [`TimelineMessage`]s and reports
//! container width changes.

use drumroll_core::{
    CoordinateMapper, GeometryCache, HitDataset, LaneLayout, PlaybackState, ViewportGeometry,
};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke, Text};
use iced::{keyboard, mouse, Point, Rectangle, Theme};

use super::input::{InputAction, InputController, PointerState};
use super::message::TimelineMessage;
use super::scene::{build_scene, Primitive, Scene, SceneInput, TextAlign};
use crate::theme;

pub struct TimelineCanvas<'a> {
    pub dataset: &'a HitDataset,
    pub layout: &'a LaneLayout,
    pub geometry: &'a GeometryCache,
    pub playback: &'a PlaybackState,
    pub device_pixel_ratio: f32,
    pub active: bool,
}

impl TimelineCanvas<'_> {
    /// Cached geometry, or a transient one until the resize is observed
    fn geometry_for(&self, width: f32) -> (ViewportGeometry, CoordinateMapper) {
        match (self.geometry.geometry(), self.geometry.mapper()) {
            (Some(geometry), Some(mapper))
                if !self.geometry.is_stale(width, self.device_pixel_ratio) =>
            {
                (*geometry, *mapper)
            }
            _ => self.geometry.compute(width, self.device_pixel_ratio),
        }
    }

    /// `Resized` when the cache has not yet observed this width
    fn resize_message(&self, bounds: Rectangle) -> Option<TimelineMessage> {
        (bounds.width > 0.0 && self.geometry.is_stale(bounds.width, self.device_pixel_ratio))
            .then_some(TimelineMessage::Resized(bounds.width))
    }

    fn input(&self, bounds: Rectangle) -> InputController {
        let (geometry, mapper) = self.geometry_for(bounds.width);
        InputController::new(geometry, mapper)
    }
}

fn to_message(action: InputAction) -> TimelineMessage {
    match action {
        InputAction::Seek(time) => TimelineMessage::Seek(time),
        InputAction::TogglePlayback => TimelineMessage::TogglePlayback,
        InputAction::Nudge(delta) => TimelineMessage::Nudge(delta),
    }
}

impl Program<TimelineMessage> for TimelineCanvas<'_> {
    type State = PointerState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<TimelineMessage>> {
        let input = self.input(bounds);

        let action = match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => cursor
                .position_in(bounds)
                .and_then(|position| input.pointer_pressed(state, position))
                .map(|action| canvas::Action::publish(to_message(action)).and_capture()),
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                input.pointer_released(state);
                None
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => match cursor.position_in(bounds) {
                Some(position) => Some(
                    input
                        .pointer_moved(state, position)
                        .map(|action| canvas::Action::publish(to_message(action)))
                        .unwrap_or_else(canvas::Action::request_redraw),
                ),
                None if state.scrubbing => cursor
                    .position()
                    .map(|p| Point::new(p.x - bounds.x, p.y - bounds.y))
                    .and_then(|position| input.pointer_moved(state, position))
                    .map(|action| canvas::Action::publish(to_message(action))),
                None => {
                    let had_hover = state.hover.take().is_some();
                    had_hover.then(canvas::Action::request_redraw)
                }
            },
            Event::Mouse(mouse::Event::CursorLeft) => {
                input.pointer_left(state);
                Some(canvas::Action::request_redraw())
            }
            Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => input
                .key_pressed(key)
                .map(|action| canvas::Action::publish(to_message(action))),
            _ => None,
        };

        if action.is_some() {
            return action;
        }

        // Width changes are reported from here; the widget owns the cache
        self.resize_message(bounds).map(canvas::Action::publish)
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.scrubbing {
            return mouse::Interaction::Grabbing;
        }
        match cursor.position_in(bounds) {
            Some(position) if self.input(bounds).in_roll(position) => mouse::Interaction::Pointer,
            _ => mouse::Interaction::default(),
        }
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), theme::BACKGROUND);

        let (geometry, mapper) = self.geometry_for(bounds.width);
        let scene = build_scene(&SceneInput {
            dataset: self.dataset,
            layout: self.layout,
            geometry: &geometry,
            mapper: &mapper,
            playback: self.playback,
            active: self.active,
            hover: state.hover,
        });
        paint(&mut frame, &scene);

        vec![frame.into_geometry()]
    }
}

/// Replay a scene into a frame
fn paint(frame: &mut Frame, scene: &Scene) {
    for (_, primitive) in scene.items() {
        match primitive {
            Primitive::Rect {
                top_left,
                size,
                color,
            } => frame.fill_rectangle(*top_left, *size, *color),
            Primitive::Line {
                from,
                to,
                width,
                color,
            } => frame.stroke(
                &Path::line(*from, *to),
                Stroke::default().with_color(*color).with_width(*width),
            ),
            Primitive::Circle {
                center,
                radius,
                color,
            } => frame.fill(&Path::circle(*center, *radius), *color),
            Primitive::Triangle { points, color } => {
                let path = Path::new(|builder| {
                    builder.move_to(points[0]);
                    builder.line_to(points[1]);
                    builder.line_to(points[2]);
                    builder.close();
                });
                frame.fill(&path, *color);
            }
            Primitive::Text {
                content,
                position,
                size,
                color,
                align,
            } => {
                let align_x = match align {
                    TextAlign::Left => Horizontal::Left,
                    TextAlign::Center => Horizontal::Center,
                    TextAlign::Right => Horizontal::Right,
                };
                frame.fill_text(Text {
                    content: content.clone(),
                    position: *position,
                    size: (*size).into(),
                    color: *color,
                    align_x: align_x.into(),
                    align_y: Vertical::Center.into(),
                    ..Text::default()
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drumroll_core::config::DisplayConfig;
    use drumroll_core::LaneConfig;
    use iced::Size;

    struct Fixture {
        dataset: HitDataset,
        layout: LaneLayout,
        geometry: GeometryCache,
        playback: PlaybackState,
    }

    impl Fixture {
        fn new() -> Self {
            let layout = LaneLayout::new(&LaneConfig::default()).unwrap();
            let geometry = GeometryCache::new(DisplayConfig::default(), layout.lane_count(), 30.0);
            Self {
                dataset: HitDataset::from_raw(Vec::new(), 30.0),
                layout,
                geometry,
                playback: PlaybackState::default(),
            }
        }

        fn canvas(&self) -> TimelineCanvas<'_> {
            TimelineCanvas {
                dataset: &self.dataset,
                layout: &self.layout,
                geometry: &self.geometry,
                playback: &self.playback,
                device_pixel_ratio: 1.0,
                active: true,
            }
        }
    }

    fn bounds(width: f32) -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(width, 300.0))
    }

    fn idle_update(canvas: &TimelineCanvas<'_>, width: f32) -> bool {
        canvas
            .update(
                &mut PointerState::default(),
                &Event::Mouse(mouse::Event::CursorEntered),
                bounds(width),
                mouse::Cursor::Unavailable,
            )
            .is_some()
    }

    #[test]
    fn test_resize_published_once_per_width() {
        let mut fixture = Fixture::new();

        assert!(idle_update(&fixture.canvas(), 800.0));
        assert_eq!(
            fixture.canvas().resize_message(bounds(800.0)),
            Some(TimelineMessage::Resized(800.0))
        );

        // The widget feeds the published width back into its cache
        assert!(fixture.geometry.observe(800.0, 1.0));

        assert!(!idle_update(&fixture.canvas(), 800.0));
        assert!(!idle_update(&fixture.canvas(), 800.0));
        assert_eq!(fixture.canvas().resize_message(bounds(800.0)), None);
        assert_eq!(fixture.geometry.recompute_count(), 1);

        assert_eq!(
            fixture.canvas().resize_message(bounds(1024.0)),
            Some(TimelineMessage::Resized(1024.0))
        );
    }

    #[test]
    fn test_zero_width_is_not_reported() {
        let fixture = Fixture::new();
        assert_eq!(fixture.canvas().resize_message(bounds(0.0)), None);
    }
}
