//! Camera state and the raw-input to drawing-space transform.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest display scale a zoom can reach.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest display scale a zoom can reach.
pub const MAX_ZOOM: f64 = 10.0;

/// Camera holds the pan offset and display scale of the drawing surface.
///
/// Raw pointer coordinates are divided by the display scale and shifted by
/// the camera position, then by the canvas element's own offset, to land in
/// logical drawing space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Camera position in drawing space (`cameraX`, `cameraY`).
    pub offset: Vec2,
    /// Position of the canvas element inside the page.
    pub canvas_offset: Vec2,
    /// Current display scale, always within `[min_zoom, max_zoom]`.
    zoom: f64,
    /// Minimum allowed zoom level, finite and positive.
    min_zoom: f64,
    /// Maximum allowed zoom level, never below `min_zoom`.
    max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            canvas_offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom zoom limits.
    ///
    /// A lower limit that is not finite and positive falls back to
    /// [`MIN_ZOOM`]; an upper limit that is not finite or below the lower
    /// one falls back to [`MAX_ZOOM`] (or the lower limit, if larger).
    pub fn with_limits(min_zoom: f64, max_zoom: f64) -> Self {
        let min_zoom = if min_zoom.is_finite() && min_zoom > 0.0 {
            min_zoom
        } else {
            MIN_ZOOM
        };
        let max_zoom = if max_zoom.is_finite() && max_zoom >= min_zoom {
            max_zoom
        } else {
            MAX_ZOOM.max(min_zoom)
        };
        Self {
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            ..Self::default()
        }
    }

    /// Current display scale.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Lower zoom limit.
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    /// Upper zoom limit.
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Set the display scale, clamped to the camera limits.
    ///
    /// A NaN scale is ignored and returns `false`.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if zoom.is_nan() {
            return false;
        }
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        true
    }

    /// Map a raw input position to drawing space.
    ///
    /// Never mutates the camera; the clamp in [`Camera::set_zoom`] keeps the
    /// divisor non-zero.
    pub fn transform(&self, raw: Point) -> Point {
        Point::new(
            raw.x / self.zoom + self.offset.x - self.canvas_offset.x,
            raw.y / self.zoom + self.offset.y - self.canvas_offset.y,
        )
    }

    /// Pan the camera by a delta in drawing-space units.
    ///
    /// A non-finite delta is ignored and returns `false`.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        if !delta.is_finite() {
            return false;
        }
        self.offset += delta;
        true
    }

    /// Zoom the camera, keeping the given raw point fixed in drawing space.
    ///
    /// Returns `false`, leaving the camera untouched, when the anchor or
    /// the factor is not finite, or when the clamped scale does not change.
    pub fn zoom_at(&mut self, raw_point: Point, factor: f64) -> bool {
        if !raw_point.is_finite() || !factor.is_finite() {
            return false;
        }
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }

        let anchor = self.transform(raw_point);
        self.zoom = new_zoom;

        // Shift the camera so `raw_point` still lands on `anchor`
        let moved = self.transform(raw_point);
        self.offset += Vec2::new(anchor.x - moved.x, anchor.y - moved.y);
        true
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_transform_identity() {
        let camera = Camera::new();
        let world = camera.transform(Point::new(100.0, 200.0));
        assert!((world.x - 100.0).abs() < f64::EPSILON);
        assert!((world.y - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_transform_camera_and_scale() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(10.0, 20.0);
        camera.set_zoom(2.0);

        let world = camera.transform(Point::new(100.0, 50.0));
        assert!((world.x - 60.0).abs() < f64::EPSILON);
        assert!((world.y - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_transform_canvas_offset() {
        let mut camera = Camera::new();
        camera.canvas_offset = Vec2::new(8.0, 16.0);

        let world = camera.transform(Point::new(100.0, 100.0));
        assert!((world.x - 92.0).abs() < f64::EPSILON);
        assert!((world.y - 84.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_transform_does_not_mutate() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(3.0, 4.0);
        camera.set_zoom(1.5);
        let _ = camera.transform(Point::new(7.0, 9.0));
        assert_eq!(camera.offset, Vec2::new(3.0, 4.0));
        assert!((camera.zoom() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        assert!(camera.zoom_at(Point::ZERO, 0.001));
        assert!((camera.zoom() - MIN_ZOOM).abs() < f64::EPSILON);

        camera.set_zoom(1.0);
        assert!(camera.zoom_at(Point::ZERO, 1000.0));
        assert!((camera.zoom() - MAX_ZOOM).abs() < f64::EPSILON);

        camera.set_zoom(0.0);
        assert!((camera.zoom() - MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_at_keeps_anchor() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        let raw = Point::new(123.0, 456.0);
        let before = camera.transform(raw);

        assert!(camera.zoom_at(raw, 2.5));
        let after = camera.transform(raw);

        assert!((camera.zoom() - 2.5).abs() < f64::EPSILON);
        assert!((before.x - after.x).abs() < 1e-10);
        assert!((before.y - after.y).abs() < 1e-10);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_limits() {
        let mut camera = Camera::with_limits(0.5, 4.0);
        camera.set_zoom(8.0);
        assert!((camera.zoom() - 4.0).abs() < f64::EPSILON);
        camera.reset();
        assert!((camera.zoom() - 1.0).abs() < f64::EPSILON);
        assert_eq!(camera.offset, Vec2::ZERO);
    }

    #[test]
    fn test_non_finite_zoom_ignored() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(5.0, 5.0);

        assert!(!camera.zoom_at(Point::ZERO, f64::NAN));
        assert!(!camera.zoom_at(Point::ZERO, f64::INFINITY));
        assert!(!camera.zoom_at(Point::new(f64::NAN, 0.0), 2.0));
        assert!(!camera.set_zoom(f64::NAN));

        assert!((camera.zoom() - 1.0).abs() < f64::EPSILON);
        assert_eq!(camera.offset, Vec2::new(5.0, 5.0));
        assert!(camera.transform(Point::new(1.0, 1.0)).is_finite());
    }

    #[test]
    fn test_non_finite_pan_ignored() {
        let mut camera = Camera::new();
        assert!(!camera.pan(Vec2::new(f64::NAN, 1.0)));
        assert!(!camera.pan(Vec2::new(0.0, f64::NEG_INFINITY)));
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!(camera.pan(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_invalid_limits_sanitised() {
        let camera = Camera::with_limits(f64::NAN, 4.0);
        assert!((camera.min_zoom() - MIN_ZOOM).abs() < f64::EPSILON);
        assert!((camera.max_zoom() - 4.0).abs() < f64::EPSILON);

        let camera = Camera::with_limits(0.0, f64::NAN);
        assert!((camera.min_zoom() - MIN_ZOOM).abs() < f64::EPSILON);
        assert!((camera.max_zoom() - MAX_ZOOM).abs() < f64::EPSILON);

        let mut camera = Camera::with_limits(20.0, 5.0);
        assert!((camera.max_zoom() - 20.0).abs() < f64::EPSILON);
        assert!((camera.zoom() - 20.0).abs() < f64::EPSILON);
        camera.set_zoom(0.0);
        assert!(camera.zoom() > 0.0);
    }
}
