//! Path shape built from SVG path data.

use super::{ObjectId, SerializableColor, ShapeStyle, ShapeTrait};
use crate::error::{DrawboardError, DrawboardResult};
use crate::tools::Brush;
use kurbo::{BezPath, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Options for building a path, as produced by custom-draw generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    /// SVG path data (`M 0 0 L 10 10 ...`). Required.
    pub path: String,
    /// Stroke color. Falls back to the brush color.
    pub stroke: Option<SerializableColor>,
    /// Stroke width. Falls back to the brush width.
    pub stroke_width: Option<f64>,
    /// Fill color. Falls back to no fill.
    pub fill: Option<SerializableColor>,
}

impl PathOptions {
    /// Options carrying only path data.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// A stroked path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub(crate) id: ObjectId,
    /// The SVG path data this shape was built from.
    pub data: String,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Path {
    /// Build a path, validating its data.
    pub fn build(options: PathOptions, brush: &Brush) -> DrawboardResult<Self> {
        if options.path.trim().is_empty() {
            return Err(DrawboardError::InvalidPath("path data is empty".to_string()));
        }
        BezPath::from_svg(&options.path)
            .map_err(|e| DrawboardError::InvalidPath(format!("{}: {:?}", options.path, e)))?;

        Ok(Self {
            id: Uuid::new_v4(),
            data: options.path,
            style: ShapeStyle {
                stroke_color: options.stroke.unwrap_or(brush.color),
                stroke_width: options.stroke_width.unwrap_or(brush.width),
                fill_color: options.fill,
            },
        })
    }
}

impl ShapeTrait for Path {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.to_path().bounding_box()
    }

    fn to_path(&self) -> BezPath {
        BezPath::from_svg(&self.data).unwrap_or_default()
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults_to_brush() {
        let brush = Brush {
            width: 3.0,
            ..Brush::default()
        };
        let path = Path::build(PathOptions::new("M 0 0 L 10 10"), &brush).unwrap();
        assert_eq!(path.data, "M 0 0 L 10 10");
        assert_eq!(path.style.stroke_color, brush.color);
        assert!((path.style.stroke_width - 3.0).abs() < f64::EPSILON);
        assert!(path.style.fill_color.is_none());

        let bounds = path.bounds();
        assert!((bounds.x1 - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_explicit_style_wins() {
        let options = PathOptions {
            stroke: Some(SerializableColor::white()),
            stroke_width: Some(7.0),
            ..PathOptions::new("M 1 1 L 2 2")
        };
        let path = Path::build(options, &Brush::default()).unwrap();
        assert_eq!(path.style.stroke_color, SerializableColor::white());
        assert!((path.style.stroke_width - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_path_fails() {
        let result = Path::build(PathOptions::default(), &Brush::default());
        assert!(matches!(result, Err(DrawboardError::InvalidPath(_))));

        let result = Path::build(PathOptions::new("   "), &Brush::default());
        assert!(matches!(result, Err(DrawboardError::InvalidPath(_))));
    }

    #[test]
    fn test_unparsable_path_fails() {
        let result = Path::build(PathOptions::new("not a path"), &Brush::default());
        assert!(matches!(result, Err(DrawboardError::InvalidPath(_))));
    }
}
