//! Viewport geometry and time/pixel mapping
//!
//! The geometry is derived from the container width and device pixel ratio
//! and is cached: [`GeometryCache::observe`] is the only way to replace it,
//! and it only recomputes when one of those two inputs actually changed.

mod mapper;
mod viewport;

pub use mapper::CoordinateMapper;
pub use viewport::ViewportGeometry;

use crate::config::DisplayConfig;

/// Cached geometry plus the mapper derived from it
#[derive(Debug, Clone)]
pub struct GeometryCache {
    display: DisplayConfig,
    lane_count: usize,
    duration: f64,
    current: Option<(ViewportGeometry, CoordinateMapper)>,
    recomputes: u64,
}

impl GeometryCache {
    pub fn new(display: DisplayConfig, lane_count: usize, duration: f64) -> Self {
        Self {
            display,
            lane_count,
            duration,
            current: None,
            recomputes: 0,
        }
    }

    /// Report the observed container size
    ///
    /// Returns `true` if the geometry was recomputed. Repeated calls with the
    /// last-known width and ratio are no-ops.
    pub fn observe(&mut self, width: f32, device_pixel_ratio: f32) -> bool {
        if !self.is_stale(width, device_pixel_ratio) {
            return false;
        }

        let computed = self.compute(width, device_pixel_ratio);
        self.current = Some(computed);
        self.recomputes += 1;

        log::debug!(
            "GeometryCache: recomputed for width {:.1}px @ {:.2}x (roll {:.1}px, #{})",
            width,
            device_pixel_ratio,
            computed.0.roll_width(),
            self.recomputes
        );
        true
    }

    /// Whether `observe(width, ratio)` would recompute
    pub fn is_stale(&self, width: f32, device_pixel_ratio: f32) -> bool {
        match &self.current {
            Some((geometry, _)) => {
                geometry.width_px != width || geometry.device_pixel_ratio != device_pixel_ratio
            }
            None => true,
        }
    }

    /// Geometry for a size without touching the cache
    ///
    /// Used to draw the frame between a resize and its observation.
    pub fn compute(&self, width: f32, device_pixel_ratio: f32) -> (ViewportGeometry, CoordinateMapper) {
        let geometry =
            ViewportGeometry::compute(width, device_pixel_ratio, &self.display, self.lane_count);
        let mapper = CoordinateMapper::new(&geometry, self.duration);
        (geometry, mapper)
    }

    pub fn geometry(&self) -> Option<&ViewportGeometry> {
        self.current.as_ref().map(|(geometry, _)| geometry)
    }

    pub fn mapper(&self) -> Option<&CoordinateMapper> {
        self.current.as_ref().map(|(_, mapper)| mapper)
    }

    /// Number of recomputations so far
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_width_does_not_recompute() {
        let mut cache = GeometryCache::new(DisplayConfig::default(), 6, 30.0);
        assert!(cache.observe(800.0, 1.0));
        assert!(!cache.observe(800.0, 1.0));
        assert!(!cache.observe(800.0, 1.0));
        assert_eq!(cache.recompute_count(), 1);
    }

    #[test]
    fn test_width_or_ratio_change_recomputes() {
        let mut cache = GeometryCache::new(DisplayConfig::default(), 6, 30.0);
        cache.observe(800.0, 1.0);
        assert!(cache.observe(640.0, 1.0));
        assert!(cache.observe(640.0, 2.0));
        assert_eq!(cache.recompute_count(), 3);
        assert_eq!(cache.geometry().unwrap().width_px, 640.0);
        assert_eq!(cache.geometry().unwrap().device_pixel_ratio, 2.0);
    }

    #[test]
    fn test_compute_leaves_cache_untouched() {
        let cache = GeometryCache::new(DisplayConfig::default(), 6, 30.0);
        let (geometry, _) = cache.compute(500.0, 1.0);
        assert_eq!(geometry.width_px, 500.0);
        assert!(cache.geometry().is_none());
        assert_eq!(cache.recompute_count(), 0);
    }
}
