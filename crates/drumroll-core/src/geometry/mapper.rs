use super::ViewportGeometry;

/// Bidirectional mapping between timeline seconds and canvas x coordinates
///
/// `to_pixel(t) = left_pad + t / duration * roll_width`
/// `to_time(x) = clamp((x - left_pad) / roll_width * duration, 0, duration)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    left_pad: f32,
    roll_width: f32,
    duration: f64,
}

impl CoordinateMapper {
    /// Build a mapper for a geometry and segment duration
    ///
    /// A non-positive or non-finite duration is mapped as if it were one
    /// second so that nothing divides by zero; the resulting layout is
    /// degenerate but drawable.
    pub fn new(geometry: &ViewportGeometry, duration: f64) -> Self {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            1.0
        };
        Self {
            left_pad: geometry.left_pad_px,
            roll_width: geometry.roll_width(),
            duration,
        }
    }

    /// Effective duration used for mapping
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn to_pixel(&self, time: f64) -> f32 {
        self.left_pad + ((time / self.duration) * self.roll_width as f64) as f32
    }

    pub fn to_time(&self, x: f32) -> f64 {
        let ratio = (x - self.left_pad) as f64 / self.roll_width as f64;
        (ratio * self.duration).clamp(0.0, self.duration)
    }

    /// Whether `x` falls inside the roll (gutter and right margin excluded)
    pub fn roll_contains(&self, x: f32) -> bool {
        x >= self.left_pad && x <= self.left_pad + self.roll_width
    }

    /// Time covered by one logical pixel
    pub fn seconds_per_pixel(&self) -> f64 {
        self.duration / self.roll_width as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_within_one_pixel() {
        for width in [200.0_f32, 801.0, 1920.0] {
            let geometry = ViewportGeometry::for_test(width);
            let mapper = CoordinateMapper::new(&geometry, 30.0);
            let tolerance = mapper.seconds_per_pixel();

            for i in 0..=300 {
                let t = 30.0 * i as f64 / 300.0;
                let back = mapper.to_time(mapper.to_pixel(t));
                assert!(
                    (back - t).abs() <= tolerance,
                    "width {}: {} -> {} (tolerance {})",
                    width,
                    t,
                    back,
                    tolerance
                );
            }
        }
    }

    #[test]
    fn test_endpoints() {
        let geometry = ViewportGeometry::for_test(800.0);
        let mapper = CoordinateMapper::new(&geometry, 30.0);
        assert_eq!(mapper.to_pixel(0.0), 60.0);
        assert_eq!(mapper.to_pixel(30.0), 790.0);
        assert_eq!(mapper.to_time(0.0), 0.0);
        assert_eq!(mapper.to_time(10_000.0), 30.0);
    }

    #[test]
    fn test_roll_contains_excludes_gutter_and_margin() {
        let geometry = ViewportGeometry::for_test(800.0);
        let mapper = CoordinateMapper::new(&geometry, 30.0);
        assert!(!mapper.roll_contains(30.0));
        assert!(mapper.roll_contains(60.0));
        assert!(mapper.roll_contains(790.0));
        assert!(!mapper.roll_contains(795.0));
    }

    #[test]
    fn test_degenerate_duration_maps_as_one_second() {
        let geometry = ViewportGeometry::for_test(800.0);
        for duration in [0.0, -3.0, f64::NAN] {
            let mapper = CoordinateMapper::new(&geometry, duration);
            assert_eq!(mapper.duration(), 1.0);
            assert!(mapper.to_pixel(0.5).is_finite());
        }
    }
}
