//! Lane layout for the drum timeline
//!
//! Each [`DrumClass`] gets exactly one horizontal lane. Lane order, display
//! name and color come from a single [`LaneConfig`] value that is validated
//! once when the [`LaneLayout`] is built; a layout that exists is always
//! complete.

use crate::geometry::ViewportGeometry;
use crate::types::{DrumClass, NUM_DRUM_CLASSES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors raised while validating a lane configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LaneConfigError {
    #[error("Lane configuration has no entry for drum class '{0}'")]
    MissingClass(DrumClass),

    #[error("Lane order {order} for '{class}' is out of range (0..{lanes})")]
    OrderOutOfRange {
        class: DrumClass,
        order: usize,
        lanes: usize,
    },

    #[error("Lane order {order} is used by both '{first}' and '{second}'")]
    DuplicateOrder {
        order: usize,
        first: DrumClass,
        second: DrumClass,
    },

    #[error("Lane for '{0}' has an empty display name")]
    EmptyName(DrumClass),

    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),
}

/// 8-bit RGB color, serialized as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string
    pub fn parse(hex: &str) -> Result<Self, LaneConfigError> {
        let invalid = || LaneConfigError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Channels as floats in `[0, 1]`
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = LaneConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Presentation of one drum class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneStyle {
    /// Lane index, 0 = top lane
    pub order: usize,
    pub display_name: String,
    pub color: Rgb,
}

impl LaneStyle {
    pub fn new(order: usize, display_name: impl Into<String>, color: Rgb) -> Self {
        Self {
            order,
            display_name: display_name.into(),
            color,
        }
    }
}

/// Structured presentation config: `{class_id: {order, display_name, color}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneConfig {
    pub classes: BTreeMap<DrumClass, LaneStyle>,
}

impl Default for LaneConfig {
    /// Cymbals on top, kick at the bottom
    fn default() -> Self {
        let classes = [
            (DrumClass::Crash, LaneStyle::new(0, "Crash", Rgb::new(0xE6, 0xC2, 0x29))),
            (DrumClass::Ride, LaneStyle::new(1, "Ride", Rgb::new(0x33, 0xCC, 0xCC))),
            (DrumClass::HihatC, LaneStyle::new(2, "Hi-Hat", Rgb::new(0x4D, 0x9D, 0xE0))),
            (DrumClass::TomH, LaneStyle::new(3, "Tom", Rgb::new(0x9B, 0x5D, 0xE5))),
            (DrumClass::Snare, LaneStyle::new(4, "Snare", Rgb::new(0x33, 0xCC, 0x66))),
            (DrumClass::KickDrum, LaneStyle::new(5, "Kick", Rgb::new(0xCC, 0x33, 0x33))),
        ];
        Self {
            classes: classes.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Lane {
    class: DrumClass,
    display_name: String,
    color: Rgb,
}

/// Validated, fixed vertical ordering of drum lanes
#[derive(Debug, Clone, PartialEq)]
pub struct LaneLayout {
    lanes: Vec<Lane>,
    /// Lane index per class, indexed by `DrumClass as usize`
    index_of: [usize; NUM_DRUM_CLASSES],
}

impl LaneLayout {
    /// Validate a lane configuration
    ///
    /// Every class must be present, orders must form a permutation of
    /// `0..N`, and display names must be non-empty.
    pub fn new(config: &LaneConfig) -> Result<Self, LaneConfigError> {
        let lane_count = DrumClass::ALL.len();
        let mut slots: Vec<Option<Lane>> = vec![None; lane_count];
        let mut index_of = [0usize; NUM_DRUM_CLASSES];

        for class in DrumClass::ALL {
            let style = config
                .classes
                .get(&class)
                .ok_or(LaneConfigError::MissingClass(class))?;

            if style.order >= lane_count {
                return Err(LaneConfigError::OrderOutOfRange {
                    class,
                    order: style.order,
                    lanes: lane_count,
                });
            }
            if style.display_name.trim().is_empty() {
                return Err(LaneConfigError::EmptyName(class));
            }
            if let Some(existing) = &slots[style.order] {
                return Err(LaneConfigError::DuplicateOrder {
                    order: style.order,
                    first: existing.class,
                    second: class,
                });
            }

            slots[style.order] = Some(Lane {
                class,
                display_name: style.display_name.clone(),
                color: style.color,
            });
            index_of[class as usize] = style.order;
        }

        // Every class landed in a distinct in-range slot, so all slots are full
        let lanes = slots.into_iter().flatten().collect();

        Ok(Self { lanes, index_of })
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn lane_index(&self, class: DrumClass) -> usize {
        self.index_of[class as usize]
    }

    /// Classes in lane order
    pub fn classes(&self) -> impl Iterator<Item = DrumClass> + '_ {
        self.lanes.iter().map(|lane| lane.class)
    }

    pub fn display_name(&self, class: DrumClass) -> &str {
        &self.lanes[self.lane_index(class)].display_name
    }

    pub fn color(&self, class: DrumClass) -> Rgb {
        self.lanes[self.lane_index(class)].color
    }

    /// Vertical band `[top, bottom)` of lane `index`
    pub fn lane_band(&self, index: usize, geometry: &ViewportGeometry) -> (f32, f32) {
        let top = geometry.top_pad_px + index as f32 * geometry.lane_height_px;
        (top, top + geometry.lane_height_px)
    }

    pub fn lane_center_y(&self, class: DrumClass, geometry: &ViewportGeometry) -> f32 {
        let (top, bottom) = self.lane_band(self.lane_index(class), geometry);
        (top + bottom) / 2.0
    }
}

/// Seconds between time-axis ticks for a given duration
///
/// Fires once per session since duration is fixed.
pub fn tick_spacing(duration: f64) -> f64 {
    if duration > 20.0 {
        5.0
    } else if duration > 10.0 {
        2.0
    } else {
        1.0
    }
}

/// Tick positions `0, step, 2*step, ...` up to and including `duration`
pub fn tick_times(duration: f64) -> Vec<f64> {
    if !duration.is_finite() || duration <= 0.0 {
        return vec![0.0];
    }
    let step = tick_spacing(duration);
    let count = (duration / step).floor() as usize;
    (0..=count).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let layout = LaneLayout::new(&LaneConfig::default()).unwrap();
        assert_eq!(layout.lane_count(), 6);
        assert_eq!(layout.classes().next(), Some(DrumClass::Crash));
        assert_eq!(layout.classes().last(), Some(DrumClass::KickDrum));
        assert_eq!(layout.lane_index(DrumClass::Snare), 4);
        assert_eq!(layout.display_name(DrumClass::HihatC), "Hi-Hat");
    }

    #[test]
    fn test_missing_class_is_rejected() {
        let mut config = LaneConfig::default();
        config.classes.remove(&DrumClass::Ride);
        assert_eq!(
            LaneLayout::new(&config),
            Err(LaneConfigError::MissingClass(DrumClass::Ride))
        );
    }

    #[test]
    fn test_duplicate_order_is_rejected() {
        let mut config = LaneConfig::default();
        config.classes.get_mut(&DrumClass::Snare).unwrap().order = 0;
        assert!(matches!(
            LaneLayout::new(&config),
            Err(LaneConfigError::DuplicateOrder { order: 0, .. })
        ));
    }

    #[test]
    fn test_order_out_of_range_is_rejected() {
        let mut config = LaneConfig::default();
        config.classes.get_mut(&DrumClass::Crash).unwrap().order = 6;
        assert!(matches!(
            LaneLayout::new(&config),
            Err(LaneConfigError::OrderOutOfRange { order: 6, .. })
        ));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut config = LaneConfig::default();
        config.classes.get_mut(&DrumClass::TomH).unwrap().display_name = "  ".into();
        assert_eq!(
            LaneLayout::new(&config),
            Err(LaneConfigError::EmptyName(DrumClass::TomH))
        );
    }

    #[test]
    fn test_rgb_parsing() {
        assert_eq!(Rgb::parse("#CC3333"), Ok(Rgb::new(0xCC, 0x33, 0x33)));
        assert_eq!(Rgb::new(0x0A, 0xFF, 0x00).to_string(), "#0AFF00");
        assert!(Rgb::parse("CC3333").is_err());
        assert!(Rgb::parse("#CC33").is_err());
        assert!(Rgb::parse("#GG3333").is_err());
        assert!(Rgb::parse("#+1+2+3").is_err());
        assert!(Rgb::parse("#-1FF00").is_err());
    }

    #[test]
    fn test_yaml_with_unknown_class_fails_to_parse() {
        let yaml = "cowbell:\n  order: 0\n  display_name: Cowbell\n  color: '#FFFFFF'\n";
        assert!(serde_yaml::from_str::<LaneConfig>(yaml).is_err());
    }

    #[test]
    fn test_yaml_with_bad_color_fails_to_parse() {
        let yaml = "snare:\n  order: 0\n  display_name: Snare\n  color: red\n";
        assert!(serde_yaml::from_str::<LaneConfig>(yaml).is_err());
    }

    #[test]
    fn test_tick_spacing_thresholds() {
        assert_eq!(tick_spacing(30.0), 5.0);
        assert_eq!(tick_spacing(20.0), 2.0);
        assert_eq!(tick_spacing(15.0), 2.0);
        assert_eq!(tick_spacing(10.0), 1.0);
        assert_eq!(tick_spacing(2.0), 1.0);
    }

    #[test]
    fn test_tick_times_include_duration_boundary() {
        assert_eq!(tick_times(30.0), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0]);
        assert_eq!(tick_times(2.5), vec![0.0, 1.0, 2.0]);
        assert_eq!(tick_times(0.0), vec![0.0]);
    }

    #[test]
    fn test_lane_bands_follow_order() {
        let layout = LaneLayout::new(&LaneConfig::default()).unwrap();
        let geometry = ViewportGeometry::for_test(800.0);
        let (top, bottom) = layout.lane_band(2, &geometry);
        assert_eq!(top, geometry.top_pad_px + 2.0 * geometry.lane_height_px);
        assert_eq!(bottom - top, geometry.lane_height_px);

        let kick_y = layout.lane_center_y(DrumClass::KickDrum, &geometry);
        let expected = geometry.top_pad_px + 5.5 * geometry.lane_height_px;
        assert!((kick_y - expected).abs() < 1e-3);
    }
}
