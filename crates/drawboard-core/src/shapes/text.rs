//! Text box shape.

use super::{ObjectId, SerializableColor, ShapeStyle, ShapeTrait};
use crate::tools::Brush;
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Width of a text box when none is requested.
pub const DEFAULT_TEXT_WIDTH: f64 = 150.0;

/// Font family used for every text box.
pub const DEFAULT_FONT_FAMILY: &str = "Microsoft YaHei";

/// Offset added to both axes of a rotated text box.
///
/// Applied whenever the requested angle is non-zero. It compensates a
/// layout quirk of rotated boxes rather than following from the geometry.
pub const ROTATED_TEXT_OFFSET: f64 = 100.0;

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f64 = 1.16;

/// Options for creating a text box.
///
/// Every field is optional; see the field docs for what an absent value
/// falls back to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Left edge. Falls back to the gesture start point.
    pub left: Option<f64>,
    /// Top edge. Falls back to the gesture start point.
    pub top: Option<f64>,
    /// Box width. Falls back to [`DEFAULT_TEXT_WIDTH`].
    pub width: Option<f64>,
    /// Lines of text, joined with `\n`. Empty means one empty line.
    pub text: Vec<String>,
    /// Enter text-edit mode and request input focus after creation.
    pub edit: bool,
    /// Text color. Falls back to the brush color.
    pub color: Option<SerializableColor>,
    /// Font size. Falls back to the brush font size.
    pub font_size: Option<f64>,
    /// Rotation in degrees.
    pub angle: f64,
}

impl TextOptions {
    /// Options for a box holding the given lines.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// An editable text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub(crate) id: ObjectId,
    /// Top-left corner of the box.
    pub position: Point,
    /// Box width; lines wrap inside it.
    pub width: f64,
    /// The text content.
    pub content: String,
    /// Font size in logical units.
    pub font_size: f64,
    /// Font family name.
    pub font_family: String,
    /// Rotation in degrees around the top-left corner.
    pub angle: f64,
    /// Style properties; the fill carries the text color.
    pub style: ShapeStyle,
}

impl TextBox {
    /// Build a text box from options, anchored at `anchor` unless the
    /// options place it explicitly.
    pub fn build(options: &TextOptions, anchor: Point, brush: &Brush) -> Self {
        let offset = if options.angle != 0.0 {
            ROTATED_TEXT_OFFSET
        } else {
            0.0
        };
        let left = options.left.unwrap_or(anchor.x) + offset;
        let top = options.top.unwrap_or(anchor.y) + offset;
        let color = options.color.unwrap_or(brush.color);

        Self {
            id: Uuid::new_v4(),
            position: Point::new(left, top),
            width: options.width.unwrap_or(DEFAULT_TEXT_WIDTH),
            content: options.text.join("\n"),
            font_size: options.font_size.unwrap_or(brush.font_size),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            angle: options.angle,
            style: ShapeStyle {
                stroke_color: color,
                stroke_width: 0.0,
                fill_color: Some(color),
            },
        }
    }

    /// Whether the box holds no text.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Unrotated layout box (approximate; the renderer owns real text metrics).
    pub fn layout_rect(&self) -> Rect {
        let lines = self.content.split('\n').count().max(1) as f64;
        Rect::from_origin_size(self.position, (self.width, lines * self.font_size * LINE_HEIGHT))
    }

    fn rotation(&self) -> Affine {
        Affine::rotate_about(self.angle.to_radians(), self.position)
    }
}

impl ShapeTrait for TextBox {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.to_path().bounding_box()
    }

    fn to_path(&self) -> BezPath {
        self.rotation() * self.layout_rect().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}
