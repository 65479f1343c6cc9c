use crate::config::DisplayConfig;

/// Derived layout of the timeline canvas for one container size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    pub width_px: f32,
    pub height_px: f32,
    pub device_pixel_ratio: f32,
    pub lane_height_px: f32,
    pub top_pad_px: f32,
    pub bottom_pad_px: f32,
    pub left_pad_px: f32,
    pub right_margin_px: f32,
}

impl ViewportGeometry {
    pub fn compute(
        width: f32,
        device_pixel_ratio: f32,
        display: &DisplayConfig,
        lane_count: usize,
    ) -> Self {
        Self {
            width_px: width,
            height_px: display.timeline_height(lane_count),
            device_pixel_ratio,
            lane_height_px: display.lane_height,
            top_pad_px: display.top_pad,
            bottom_pad_px: display.bottom_pad,
            left_pad_px: display.left_pad,
            right_margin_px: display.right_margin,
        }
    }

    /// Width of the drawable roll, never less than one pixel
    pub fn roll_width(&self) -> f32 {
        (self.width_px - self.left_pad_px - self.right_margin_px).max(1.0)
    }

    pub fn roll_left(&self) -> f32 {
        self.left_pad_px
    }

    pub fn roll_right(&self) -> f32 {
        self.left_pad_px + self.roll_width()
    }

    /// Bottom edge of the last lane
    pub fn lanes_bottom(&self) -> f32 {
        self.height_px - self.bottom_pad_px
    }

    /// Thinnest line that still lands on a whole device pixel
    pub fn hairline(&self) -> f32 {
        1.0 / self.device_pixel_ratio.max(1.0)
    }

    /// Round a coordinate to the nearest device pixel
    pub fn snap(&self, value: f32) -> f32 {
        let ratio = self.device_pixel_ratio.max(f32::EPSILON);
        (value * ratio).round() / ratio
    }

    #[cfg(test)]
    pub(crate) fn for_test(width: f32) -> Self {
        Self::compute(width, 1.0, &DisplayConfig::default(), 6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_excludes_gutter_and_margin() {
        let geometry = ViewportGeometry::for_test(800.0);
        assert_eq!(geometry.roll_left(), 60.0);
        assert_eq!(geometry.roll_right(), 790.0);
        assert_eq!(geometry.roll_width(), 730.0);
    }

    #[test]
    fn test_degenerate_width_keeps_one_pixel_roll() {
        let geometry = ViewportGeometry::for_test(20.0);
        assert_eq!(geometry.roll_width(), 1.0);
    }

    #[test]
    fn test_snap_on_hidpi() {
        let geometry = ViewportGeometry::compute(800.0, 2.0, &DisplayConfig::default(), 6);
        assert_eq!(geometry.snap(10.3), 10.5);
        assert_eq!(geometry.hairline(), 0.5);
    }
}
