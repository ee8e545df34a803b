//! Drawing modes and brush state.

use crate::shapes::SerializableColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default stroke width for new boards.
pub const DEFAULT_BRUSH_WIDTH: f64 = 2.0;

/// Default text font size.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Shape-construction behavior selected by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Objects can be selected and hit-tested; nothing is drawn.
    Select,
    Line,
    /// Freehand strokes through the surface's native freehand mode.
    #[default]
    Pen,
    Rect,
    Circle,
    /// Pointer-up places an editable text box.
    Text,
    /// Armed custom-draw generators run on their trigger.
    Custom,
}

impl DrawMode {
    /// Every mode, in toolbar order.
    pub fn all() -> &'static [DrawMode] {
        &[
            DrawMode::Select,
            DrawMode::Line,
            DrawMode::Pen,
            DrawMode::Rect,
            DrawMode::Circle,
            DrawMode::Text,
            DrawMode::Custom,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            DrawMode::Select => "select",
            DrawMode::Line => "line",
            DrawMode::Pen => "pen",
            DrawMode::Rect => "rect",
            DrawMode::Circle => "circle",
            DrawMode::Text => "text",
            DrawMode::Custom => "custom",
        }
    }

    /// Whether pointer moves replace a preview object in this mode.
    pub fn builds_on_move(self) -> bool {
        matches!(self, DrawMode::Line | DrawMode::Rect | DrawMode::Circle)
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown draw mode: {0}")]
pub struct ParseModeError(pub String);

impl FromStr for DrawMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DrawMode::all()
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

/// Current brush, read by every shape builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    /// Stroke color.
    pub color: SerializableColor,
    /// Stroke width.
    pub width: f64,
    /// Text font size.
    pub font_size: f64,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            width: DEFAULT_BRUSH_WIDTH,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Partial brush update; absent fields are left as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrushUpdate {
    pub color: Option<SerializableColor>,
    pub width: Option<f64>,
}

impl Brush {
    /// Apply an update. Non-positive or non-finite widths are ignored.
    pub fn apply(&mut self, update: BrushUpdate) {
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(width) = update.width.filter(|w| w.is_finite() && *w > 0.0) {
            self.width = width;
        }
    }
}
