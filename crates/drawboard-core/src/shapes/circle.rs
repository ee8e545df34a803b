//! Circle shape.

use super::{ObjectId, ShapeStyle, ShapeTrait};
use crate::tools::Brush;
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ObjectId,
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            style: ShapeStyle::default(),
        }
    }

    /// Build an unfilled circle centered on `from`; the drag length is its diameter.
    pub fn build(from: Point, to: Point, brush: &Brush) -> Self {
        Self {
            style: ShapeStyle::stroked(brush.color, brush.width),
            ..Self::new(from, from.distance(to) / 2.0)
        }
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius)
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_kurbo().bounding_box()
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_is_half_the_drag() {
        let circle = Circle::build(Point::new(0.0, 0.0), Point::new(6.0, 8.0), &Brush::default());
        assert!((circle.radius - 5.0).abs() < f64::EPSILON);
        assert_eq!(circle.center, Point::new(0.0, 0.0));
        assert!(circle.style.fill_color.is_none());
    }

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(10.0, 10.0), 5.0);
        let bounds = circle.bounds();
        assert!((bounds.x0 - 5.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 15.0).abs() < f64::EPSILON);
    }
}
