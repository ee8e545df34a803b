//! Line shape.

use super::{ObjectId, ShapeStyle, ShapeTrait};
use crate::tools::Brush;
use kurbo::{BezPath, Line as KurboLine, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ObjectId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    /// Create a new line with the default style.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style: ShapeStyle::default(),
        }
    }

    /// Build a segment from `from` to `to` stroked with the brush.
    pub fn build(from: Point, to: Point, brush: &Brush) -> Self {
        Self {
            style: ShapeStyle::stroked(brush.color, brush.width),
            ..Self::new(from, to)
        }
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn to_path(&self) -> BezPath {
        KurboLine::new(self.start, self.end).to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}
