//! Zoom bounds and clamping.

use log::warn;

/// Zoom a new board starts at.
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Default lower zoom bound.
pub const DEFAULT_MIN_ZOOM: f64 = 0.2;
/// Default upper zoom bound.
pub const DEFAULT_MAX_ZOOM: f64 = 3.0;
/// Wheel delta units per unit of zoom.
pub const WHEEL_ZOOM_DIVISOR: f64 = 10000.0;

/// Current zoom and the range it is clamped to.
///
/// Changing a bound does not re-clamp the current zoom; the next
/// [`ViewController::clamp`] call applies it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewController {
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for ViewController {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl ViewController {
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            min_zoom,
            max_zoom,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Clamp a requested zoom into range. The maximum is applied first, so
    /// an inverted range resolves to the minimum.
    pub fn clamp(&self, value: f64) -> f64 {
        let mut zoom = value;
        if zoom > self.max_zoom {
            zoom = self.max_zoom;
        }
        if zoom < self.min_zoom {
            zoom = self.min_zoom;
        }
        zoom
    }

    /// Clamp and store a zoom. Returns `None` for non-finite input, which
    /// leaves the zoom unchanged.
    pub fn set_zoom(&mut self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            warn!("Ignoring non-finite zoom {}", value);
            return None;
        }
        self.zoom = self.clamp(value);
        Some(self.zoom)
    }

    pub fn set_min_zoom(&mut self, min_zoom: f64) {
        if !min_zoom.is_finite() || min_zoom <= 0.0 {
            warn!("Ignoring invalid minimum zoom {}", min_zoom);
            return;
        }
        self.min_zoom = min_zoom;
    }

    pub fn set_max_zoom(&mut self, max_zoom: f64) {
        if !max_zoom.is_finite() || max_zoom <= 0.0 {
            warn!("Ignoring invalid maximum zoom {}", max_zoom);
            return;
        }
        self.max_zoom = max_zoom;
    }
}

/// Zoom requested by a wheel event, before clamping.
pub fn wheel_target(current: f64, delta_y: f64) -> f64 {
    current + delta_y / WHEEL_ZOOM_DIVISOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let view = ViewController::default();
        assert!((view.zoom() - 1.0).abs() < f64::EPSILON);
        assert!((view.min_zoom() - 0.2).abs() < f64::EPSILON);
        assert!((view.max_zoom() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_zoom_stays_in_range() {
        let mut view = ViewController::default();
        for value in [-1e9, -1.0, 0.0, 0.1, 0.2, 1.5, 3.0, 3.1, 1e12] {
            let zoom = view.set_zoom(value).unwrap();
            assert!(zoom >= view.min_zoom() && zoom <= view.max_zoom(), "{}", value);
        }
        assert!((view.set_zoom(10.0).unwrap() - 3.0).abs() < f64::EPSILON);
        assert!((view.set_zoom(0.0).unwrap() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_finite_is_ignored() {
        let mut view = ViewController::default();
        view.set_zoom(2.0);
        assert_eq!(view.set_zoom(f64::NAN), None);
        assert_eq!(view.set_zoom(f64::INFINITY), None);
        assert!((view.zoom() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_do_not_reclamp() {
        let mut view = ViewController::default();
        view.set_zoom(2.5);
        view.set_max_zoom(2.0);
        assert!((view.zoom() - 2.5).abs() < f64::EPSILON);
        assert!((view.set_zoom(2.5).unwrap() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_min_zoom_must_be_positive() {
        let mut view = ViewController::default();
        view.set_min_zoom(0.0);
        view.set_min_zoom(-1.0);
        assert!((view.min_zoom() - 0.2).abs() < f64::EPSILON);
        view.set_min_zoom(0.5);
        assert!((view.min_zoom() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_target() {
        assert!((wheel_target(1.0, 500.0) - 1.05).abs() < 1e-12);
        assert!((wheel_target(1.0, -2000.0) - 0.8).abs() < 1e-12);
    }
}
