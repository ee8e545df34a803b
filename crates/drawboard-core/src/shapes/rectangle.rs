//! Rectangle shape.

use super::{ObjectId, ShapeStyle, ShapeTrait};
use crate::tools::Brush;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle.
///
/// `width` and `height` keep the sign of the drag that produced them; a
/// rectangle dragged up-left has negative extents. Consumers normalize via
/// [`Rectangle::as_rect`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ObjectId,
    /// Anchor corner (the gesture start).
    pub position: Point,
    /// Signed width of the rectangle.
    pub width: f64,
    /// Signed height of the rectangle.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    /// Build an unfilled rectangle anchored at `from` reaching `to`.
    pub fn build(from: Point, to: Point, brush: &Brush) -> Self {
        Self {
            style: ShapeStyle::stroked(brush.color, brush.width),
            ..Self::new(from, to.x - from.x, to.y - from.y)
        }
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
        .abs()
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}
