//! Device-to-logical coordinate mapping.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom and translation of the drawing view.
///
/// The translation is in device pixels, as the rendering surface stores it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub zoom: f64,
    pub translation: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            translation: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn new(zoom: f64, translation: Vec2) -> Self {
        Self { zoom, translation }
    }

    /// Logical to device transform, excluding the window scale.
    pub fn affine(&self) -> Affine {
        Affine::translate(self.translation) * Affine::scale(self.zoom)
    }

    /// Whether a device point (already divided by the window scale) falls
    /// inside the zoomed drawing area of the given size.
    pub fn contains_device_point(&self, point: Point, size: Size) -> bool {
        let width = size.width * self.zoom;
        let height = size.height * self.zoom;
        let t = self.translation;
        point.x >= t.x && point.y >= t.y && point.x <= t.x + width && point.y <= t.y + height
    }
}

/// Map a raw device pointer position to logical drawing coordinates.
///
/// `zoom` must be non-zero; the view controller guarantees it.
pub fn device_to_logical(point: Point, window_scale: f64, view: &ViewTransform) -> Point {
    let x = point.x / window_scale;
    let y = point.y / window_scale;
    Point::new(
        x / view.zoom - view.translation.x / view.zoom,
        y / view.zoom - view.translation.y / view.zoom,
    )
}

/// Forward transform: logical drawing coordinates to raw device pixels.
pub fn logical_to_device(point: Point, window_scale: f64, view: &ViewTransform) -> Point {
    let scaled = view.affine() * point;
    Point::new(scaled.x * window_scale, scaled.y * window_scale)
}
