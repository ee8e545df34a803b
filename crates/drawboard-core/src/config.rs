//! Board construction settings and host observers.

use crate::error::{DrawboardError, DrawboardResult};
use crate::shapes::SerializableColor;
use crate::surface::Snapshot;
use crate::tools::{DEFAULT_BRUSH_WIDTH, DEFAULT_FONT_SIZE, DrawMode};
use crate::view::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Settings a board is constructed with.
///
/// All fields have defaults, so a host can deserialize a partial document:
///
/// ```json
/// { "brush_width": 4.0, "initial_mode": "rect", "window_scale": 1.25 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_background_color")]
    pub background_color: SerializableColor,

    #[serde(default = "default_brush_color")]
    pub brush_color: SerializableColor,

    /// Stroke width; must be positive.
    #[serde(default = "default_brush_width")]
    pub brush_width: f64,

    #[serde(default = "default_font_size")]
    pub font_size: f64,

    #[serde(default)]
    pub initial_mode: DrawMode,

    /// Ratio between device pixels and the host page's CSS-like units.
    #[serde(default = "default_window_scale")]
    pub window_scale: f64,

    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,

    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,

    /// Undo depth; `None` keeps every snapshot.
    #[serde(default)]
    pub max_history: Option<usize>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            brush_color: default_brush_color(),
            brush_width: default_brush_width(),
            font_size: default_font_size(),
            initial_mode: DrawMode::default(),
            window_scale: default_window_scale(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            max_history: None,
        }
    }
}

impl BoardConfig {
    /// Reject settings the board cannot run with.
    pub fn validate(&self) -> DrawboardResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.window_scale) {
            return Err(DrawboardError::Configuration(format!(
                "window_scale must be positive, got {}",
                self.window_scale
            )));
        }
        if !positive(self.brush_width) {
            return Err(DrawboardError::Configuration(format!(
                "brush_width must be positive, got {}",
                self.brush_width
            )));
        }
        if !positive(self.font_size) {
            return Err(DrawboardError::Configuration(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        if !positive(self.min_zoom) || !positive(self.max_zoom) || self.min_zoom > self.max_zoom {
            return Err(DrawboardError::Configuration(format!(
                "invalid zoom range {}..{}",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}

fn default_background_color() -> SerializableColor {
    SerializableColor::white()
}

fn default_brush_color() -> SerializableColor {
    SerializableColor::black()
}

fn default_brush_width() -> f64 {
    DEFAULT_BRUSH_WIDTH
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

fn default_window_scale() -> f64 {
    1.0
}

fn default_min_zoom() -> f64 {
    DEFAULT_MIN_ZOOM
}

fn default_max_zoom() -> f64 {
    DEFAULT_MAX_ZOOM
}

/// Called with the history stack (oldest first) before an undo pops it.
pub type UndoHandler = Box<dyn FnMut(&[Snapshot])>;
/// Called with the clamped zoom.
pub type ZoomHandler = Box<dyn FnMut(f64)>;
/// Called with `true` when a pan starts and `false` when it ends.
pub type DragHandler = Box<dyn FnMut(bool)>;

/// Observers the host registers with the board. Each is invoked
/// synchronously from the board operation that triggers it.
#[derive(Default)]
pub struct BoardHandlers {
    pub on_undo: Option<UndoHandler>,
    pub on_zoom_change: Option<ZoomHandler>,
    pub on_drag_state_change: Option<DragHandler>,
}

impl BoardHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_undo(mut self, handler: impl FnMut(&[Snapshot]) + 'static) -> Self {
        self.on_undo = Some(Box::new(handler));
        self
    }

    pub fn on_zoom_change(mut self, handler: impl FnMut(f64) + 'static) -> Self {
        self.on_zoom_change = Some(Box::new(handler));
        self
    }

    pub fn on_drag_state_change(mut self, handler: impl FnMut(bool) + 'static) -> Self {
        self.on_drag_state_change = Some(Box::new(handler));
        self
    }

    pub(crate) fn undo(&mut self, history: &[Snapshot]) {
        if let Some(handler) = self.on_undo.as_mut() {
            handler(history);
        }
    }

    pub(crate) fn zoom_changed(&mut self, zoom: f64) {
        if let Some(handler) = self.on_zoom_change.as_mut() {
            handler(zoom);
        }
    }

    pub(crate) fn drag_changed(&mut self, dragging: bool) {
        if let Some(handler) = self.on_drag_state_change.as_mut() {
            handler(dragging);
        }
    }
}

impl fmt::Debug for BoardHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardHandlers")
            .field("on_undo", &self.on_undo.is_some())
            .field("on_zoom_change", &self.on_zoom_change.is_some())
            .field("on_drag_state_change", &self.on_drag_state_change.is_some())
            .finish()
    }
}
