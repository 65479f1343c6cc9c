//! Scene building: the full timeline as an ordered list of draw primitives
//!
//! A scene is rebuilt from scratch for every frame and holds no GPU state,
//! so everything the canvas will draw can be inspected in tests.

use drumroll_core::layout::tick_times;
use drumroll_core::{
    CoordinateMapper, DrumHit, HitDataset, LaneLayout, PlaybackState, TransportStatus,
    ViewportGeometry,
};
use iced::{Color, Point, Size};

use crate::theme;

/// Radius of a zero-confidence marker
pub const MIN_RADIUS: f32 = 4.0;
/// Extra radius of a full-confidence marker
pub const RADIUS_RANGE: f32 = 6.0;
/// Opacity of a zero-confidence highlight bar
pub const BASE_ALPHA: f32 = 0.15;
/// Extra opacity of a full-confidence highlight bar
pub const ALPHA_RANGE: f32 = 0.35;

/// Width of the translucent bar behind each marker
const HIGHLIGHT_WIDTH: f32 = 3.0;
/// Vertical inset of the highlight bar from the lane edges
const HIGHLIGHT_INSET: f32 = 3.0;
/// Half width and height of the playhead pointer
const POINTER_HALF_WIDTH: f32 = 5.0;
const POINTER_HEIGHT: f32 = 8.0;
const LABEL_SIZE: f32 = 12.0;
const TICK_LABEL_SIZE: f32 = 10.0;
const READOUT_SIZE: f32 = 13.0;
/// Extra hover slack around a marker, in pixels
const HOVER_SLACK: f32 = 2.0;

/// Draw order; a scene lists its primitives in ascending layer order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    LaneBackground,
    LaneSeparator,
    LaneLabel,
    Tick,
    HitHighlight,
    HitMarker,
    Playhead,
    Readout,
    Tooltip,
}

/// Horizontal anchoring of a text primitive; text is always centered vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        top_left: Point,
        size: Size,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        width: f32,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Color,
    },
    Triangle {
        points: [Point; 3],
        color: Color,
    },
    Text {
        content: String,
        position: Point,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    items: Vec<(Layer, Primitive)>,
}

impl Scene {
    fn push(&mut self, layer: Layer, primitive: Primitive) {
        debug_assert!(
            self.items.last().is_none_or(|(last, _)| *last <= layer),
            "primitives must be pushed in layer order"
        );
        self.items.push((layer, primitive));
    }

    pub fn items(&self) -> &[(Layer, Primitive)] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Primitives of one layer, in draw order
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Primitive> + '_ {
        self.items
            .iter()
            .filter(move |(l, _)| *l == layer)
            .map(|(_, primitive)| primitive)
    }
}

/// Everything one frame is drawn from
pub struct SceneInput<'a> {
    pub dataset: &'a HitDataset,
    pub layout: &'a LaneLayout,
    pub geometry: &'a ViewportGeometry,
    pub mapper: &'a CoordinateMapper,
    pub playback: &'a PlaybackState,
    /// Playhead is only drawn while the widget is mounted
    pub active: bool,
    /// Pointer position in canvas coordinates
    pub hover: Option<Point>,
}

/// Confidence used for glyph sizing, clamped to `[0, 1]`
fn glyph_confidence(confidence: f32) -> f32 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

pub fn marker_radius(confidence: f32) -> f32 {
    MIN_RADIUS + glyph_confidence(confidence) * RADIUS_RANGE
}

pub fn highlight_alpha(confidence: f32) -> f32 {
    BASE_ALPHA + glyph_confidence(confidence) * ALPHA_RANGE
}

/// Format seconds as `mm:ss.s`
pub fn format_clock(seconds: f64) -> String {
    let tenths = (seconds.max(0.0) * 10.0).round() as u64;
    let minutes = tenths / 600;
    let rest = tenths % 600;
    format!("{:02}:{:02}.{}", minutes, rest / 10, rest % 10)
}

/// Tooltip text for a hovered hit
pub fn hover_label(display_name: &str, hit: &DrumHit) -> String {
    format!(
        "{} · t={:.2}s · Conf: {:.0}%",
        display_name,
        hit.time(),
        glyph_confidence(hit.confidence()) * 100.0
    )
}

/// A marker that survived the roll clip
struct PlacedMarker<'a> {
    hit: &'a DrumHit,
    lane: usize,
    center: Point,
    radius: f32,
}

/// Build the complete scene for one frame
pub fn build_scene(input: &SceneInput<'_>) -> Scene {
    let mut scene = Scene::default();
    let geometry = input.geometry;
    let layout = input.layout;
    let roll_left = geometry.roll_left();
    let roll_right = geometry.roll_right();
    let roll_width = geometry.roll_width();
    let hairline = geometry.hairline();

    // (1) lane backgrounds
    for index in 0..layout.lane_count() {
        let (top, bottom) = layout.lane_band(index, geometry);
        scene.push(
            Layer::LaneBackground,
            Primitive::Rect {
                top_left: Point::new(roll_left, top),
                size: Size::new(roll_width, bottom - top),
                color: theme::LANE_SHADES[index % 2],
            },
        );
    }

    // (2) separators on every lane boundary
    for index in 0..=layout.lane_count() {
        let y = geometry.snap(geometry.top_pad_px + index as f32 * geometry.lane_height_px);
        scene.push(
            Layer::LaneSeparator,
            Primitive::Line {
                from: Point::new(roll_left, y),
                to: Point::new(roll_right, y),
                width: hairline,
                color: theme::LANE_SEPARATOR,
            },
        );
    }

    // (3) labels in the gutter
    for (index, class) in layout.classes().enumerate() {
        let (top, bottom) = layout.lane_band(index, geometry);
        scene.push(
            Layer::LaneLabel,
            Primitive::Text {
                content: layout.display_name(class).to_string(),
                position: Point::new(roll_left - 8.0, (top + bottom) / 2.0),
                size: LABEL_SIZE,
                color: theme::to_color(layout.color(class)),
                align: TextAlign::Right,
            },
        );
    }

    // (4) ticks
    let lanes_top = geometry.top_pad_px;
    let lanes_bottom = geometry.lanes_bottom();
    for time in tick_times(input.mapper.duration()) {
        let x = geometry.snap(input.mapper.to_pixel(time));
        scene.push(
            Layer::Tick,
            Primitive::Line {
                from: Point::new(x, lanes_top),
                to: Point::new(x, lanes_bottom),
                width: hairline,
                color: theme::GRID_LINE,
            },
        );
        scene.push(
            Layer::Tick,
            Primitive::Text {
                content: format!("{:.0}s", time),
                position: Point::new(x, lanes_bottom + geometry.bottom_pad_px / 2.0),
                size: TICK_LABEL_SIZE,
                color: theme::GRID_LABEL,
                align: TextAlign::Center,
            },
        );
    }

    // (5) markers, highlight bars first so every circle sits above every bar
    let markers = place_markers(input);
    for marker in &markers {
        let (top, bottom) = layout.lane_band(marker.lane, geometry);
        let color = layout.color(marker.hit.label());
        scene.push(
            Layer::HitHighlight,
            Primitive::Rect {
                top_left: Point::new(marker.center.x - HIGHLIGHT_WIDTH / 2.0, top + HIGHLIGHT_INSET),
                size: Size::new(HIGHLIGHT_WIDTH, (bottom - top - 2.0 * HIGHLIGHT_INSET).max(0.0)),
                color: theme::to_color_alpha(color, highlight_alpha(marker.hit.confidence())),
            },
        );
    }
    for marker in &markers {
        scene.push(
            Layer::HitMarker,
            Primitive::Circle {
                center: marker.center,
                radius: marker.radius,
                color: theme::to_color(layout.color(marker.hit.label())),
            },
        );
    }

    // (6) playhead
    if input.active {
        let x = geometry.snap(input.mapper.to_pixel(input.playback.current_time));
        scene.push(
            Layer::Playhead,
            Primitive::Line {
                from: Point::new(x, lanes_top),
                to: Point::new(x, lanes_bottom),
                width: 2.0,
                color: theme::PLAYHEAD,
            },
        );
        scene.push(
            Layer::Playhead,
            Primitive::Triangle {
                points: [
                    Point::new(x - POINTER_HALF_WIDTH, lanes_top - POINTER_HEIGHT),
                    Point::new(x + POINTER_HALF_WIDTH, lanes_top - POINTER_HEIGHT),
                    Point::new(x, lanes_top),
                ],
                color: theme::PLAYHEAD,
            },
        );
    }

    // (7) readout
    let readout_y = geometry.top_pad_px / 2.0 - POINTER_HEIGHT / 2.0;
    scene.push(
        Layer::Readout,
        Primitive::Text {
            content: format!(
                "{} / {}",
                format_clock(input.playback.current_time),
                format_clock(input.mapper.duration())
            ),
            position: Point::new(roll_right, readout_y),
            size: READOUT_SIZE,
            color: theme::READOUT,
            align: TextAlign::Right,
        },
    );
    if let TransportStatus::Unplayable(reason) = &input.playback.status {
        scene.push(
            Layer::Readout,
            Primitive::Text {
                content: format!("Audio unavailable: {}", reason),
                position: Point::new(roll_left, readout_y),
                size: READOUT_SIZE,
                color: theme::WARNING,
                align: TextAlign::Left,
            },
        );
    }

    // (8) tooltip for the marker under the pointer
    if let Some(marker) = input.hover.and_then(|p| hovered_marker(&markers, p)) {
        let content = hover_label(layout.display_name(marker.hit.label()), marker.hit);
        let position = Point::new(marker.center.x, marker.center.y - marker.radius - 10.0);
        // Rough text extent; the canvas has no text measurement
        let width = content.chars().count() as f32 * 6.5 + 8.0;
        scene.push(
            Layer::Tooltip,
            Primitive::Rect {
                top_left: Point::new(position.x - width / 2.0, position.y - 9.0),
                size: Size::new(width, 18.0),
                color: theme::TOOLTIP_BACKGROUND,
            },
        );
        scene.push(
            Layer::Tooltip,
            Primitive::Text {
                content,
                position,
                size: LABEL_SIZE,
                color: theme::TOOLTIP_TEXT,
                align: TextAlign::Center,
            },
        );
    }

    scene
}

/// Map every hit to its marker position, skipping hits outside the roll
fn place_markers<'a>(input: &SceneInput<'a>) -> Vec<PlacedMarker<'a>> {
    let mut markers = Vec::with_capacity(input.dataset.len());
    for class in input.layout.classes() {
        let lane = input.layout.lane_index(class);
        let y = input.layout.lane_center_y(class, input.geometry);
        for hit in input.dataset.hits_for(class) {
            let x = input.mapper.to_pixel(hit.time());
            if !x.is_finite() || !input.mapper.roll_contains(x) {
                continue;
            }
            markers.push(PlacedMarker {
                hit,
                lane,
                center: Point::new(x, y),
                radius: marker_radius(hit.confidence()),
            });
        }
    }
    markers
}

/// Topmost marker under the pointer; later markers are drawn above earlier ones
fn hovered_marker<'m, 'a>(markers: &'m [PlacedMarker<'a>], pointer: Point) -> Option<&'m PlacedMarker<'a>> {
    markers.iter().rev().find(|marker| {
        let reach = marker.radius + HOVER_SLACK;
        marker.center.distance(pointer) <= reach
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use drumroll_core::config::DisplayConfig;
    use drumroll_core::{DrumClass, LaneConfig, RawHit};

    struct Fixture {
        dataset: HitDataset,
        layout: LaneLayout,
        geometry: ViewportGeometry,
        mapper: CoordinateMapper,
        playback: PlaybackState,
    }

    impl Fixture {
        fn new(raw: Vec<RawHit>, duration: f64) -> Self {
            let dataset = HitDataset::from_raw(raw, duration);
            let layout = LaneLayout::new(&LaneConfig::default()).unwrap();
            let geometry =
                ViewportGeometry::compute(800.0, 1.0, &DisplayConfig::default(), layout.lane_count());
            let mapper = CoordinateMapper::new(&geometry, duration);
            Self {
                dataset,
                layout,
                geometry,
                mapper,
                playback: PlaybackState::default(),
            }
        }

        fn scene(&self, hover: Option<Point>) -> Scene {
            build_scene(&SceneInput {
                dataset: &self.dataset,
                layout: &self.layout,
                geometry: &self.geometry,
                mapper: &self.mapper,
                playback: &self.playback,
                active: true,
                hover,
            })
        }
    }

    fn circles(scene: &Scene) -> Vec<(Point, f32)> {
        scene
            .layer(Layer::HitMarker)
            .filter_map(|p| match p {
                Primitive::Circle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_radius_and_alpha_mapping() {
        assert_eq!(marker_radius(0.0), 4.0);
        assert_eq!(marker_radius(1.0), 10.0);
        assert_eq!(marker_radius(0.5), 7.0);
        assert_eq!(highlight_alpha(0.0), BASE_ALPHA);
        assert!((highlight_alpha(1.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_confidence_is_clamped_for_glyphs() {
        assert_eq!(marker_radius(1.8), 10.0);
        assert_eq!(marker_radius(-0.3), 4.0);
        assert_eq!(marker_radius(f32::NAN), 4.0);
    }

    #[test]
    fn test_one_marker_per_known_hit() {
        let mut raw: Vec<RawHit> = DrumClass::ALL
            .iter()
            .enumerate()
            .map(|(i, class)| RawHit::new(1.0 + i as f64, class.id(), 0.5))
            .collect();
        raw.push(RawHit::new(2.5, "cowbell", 0.9));

        let fixture = Fixture::new(raw, 10.0);
        let scene = fixture.scene(None);
        assert_eq!(circles(&scene).len(), DrumClass::ALL.len());
        assert_eq!(scene.layer(Layer::HitHighlight).count(), DrumClass::ALL.len());
    }

    #[test]
    fn test_single_kick_end_to_end() {
        let fixture = Fixture::new(vec![RawHit::new(1.0, "kick_drum", 0.9)], 2.0);
        let scene = fixture.scene(None);

        let markers = circles(&scene);
        assert_eq!(markers.len(), 1);
        let (center, radius) = markers[0];

        let expected_x = fixture.geometry.left_pad_px + 0.5 * fixture.geometry.roll_width();
        assert!((center.x - expected_x).abs() < 1e-3);
        assert_eq!(
            center.y,
            fixture.layout.lane_center_y(DrumClass::KickDrum, &fixture.geometry)
        );
        assert!((radius - 9.4).abs() < 1e-5);

        let alpha = scene
            .layer(Layer::HitHighlight)
            .find_map(|p| match p {
                Primitive::Rect { color, .. } => Some(color.a),
                _ => None,
            })
            .unwrap();
        assert!((alpha - (BASE_ALPHA + 0.9 * ALPHA_RANGE)).abs() < 1e-6);
    }

    #[test]
    fn test_hits_outside_roll_are_skipped() {
        let fixture = Fixture::new(
            vec![
                RawHit::new(-1.0, "snare", 0.5),
                RawHit::new(5.0, "snare", 0.5),
                RawHit::new(2.0, "snare", 0.5),
            ],
            2.0,
        );
        assert_eq!(circles(&fixture.scene(None)).len(), 1);
    }

    #[test]
    fn test_layers_are_in_draw_order() {
        let fixture = Fixture::new(vec![RawHit::new(1.0, "ride", 0.3)], 12.0);
        let scene = fixture.scene(None);
        let layers: Vec<Layer> = scene.items().iter().map(|(l, _)| *l).collect();
        let mut sorted = layers.clone();
        sorted.sort();
        assert_eq!(layers, sorted);

        // 12 s segment uses 2 s ticks: 0, 2, .., 12 -> 7 lines and 7 labels
        assert_eq!(scene.layer(Layer::Tick).count(), 14);
        assert_eq!(scene.layer(Layer::LaneBackground).count(), 6);
        assert_eq!(scene.layer(Layer::LaneSeparator).count(), 7);
    }

    #[test]
    fn test_playhead_only_while_active() {
        let fixture = Fixture::new(Vec::new(), 30.0);
        assert_eq!(fixture.scene(None).layer(Layer::Playhead).count(), 2);

        let inactive = build_scene(&SceneInput {
            dataset: &fixture.dataset,
            layout: &fixture.layout,
            geometry: &fixture.geometry,
            mapper: &fixture.mapper,
            playback: &fixture.playback,
            active: false,
            hover: None,
        });
        assert_eq!(inactive.layer(Layer::Playhead).count(), 0);
    }

    #[test]
    fn test_readout_and_unplayable_banner() {
        let mut fixture = Fixture::new(Vec::new(), 30.0);
        fixture.playback.current_time = 61.24;
        fixture.playback.status = TransportStatus::Unplayable("no device".to_string());

        let texts: Vec<String> = fixture
            .scene(None)
            .layer(Layer::Readout)
            .filter_map(|p| match p {
                Primitive::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts[0], "01:01.2 / 00:30.0");
        assert_eq!(texts[1], "Audio unavailable: no device");
    }

    #[test]
    fn test_hover_tooltip() {
        let fixture = Fixture::new(vec![RawHit::new(1.0, "snare", 0.87)], 2.0);
        let (center, _) = circles(&fixture.scene(None))[0];

        let scene = fixture.scene(Some(Point::new(center.x + 3.0, center.y)));
        let tooltip = scene.layer(Layer::Tooltip).find_map(|p| match p {
            Primitive::Text { content, .. } => Some(content.clone()),
            _ => None,
        });
        assert_eq!(tooltip.as_deref(), Some("Snare · t=1.00s · Conf: 87%"));

        let away = fixture.scene(Some(Point::new(center.x + 40.0, center.y)));
        assert_eq!(away.layer(Layer::Tooltip).count(), 0);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00.0");
        assert_eq!(format_clock(59.96), "01:00.0");
        assert_eq!(format_clock(125.5), "02:05.5");
        assert_eq!(format_clock(-2.0), "00:00.0");
    }
}
