//! Rendering-surface contract.
//!
//! The engine never rasterizes or serializes anything itself. Everything it
//! needs from the retained scene goes through [`RenderSurface`]; the surface
//! owns the objects and the engine only keeps [`ObjectId`] handles into it.

mod memory;

pub use memory::MemorySurface;

use crate::shapes::{ObjectId, SerializableColor, Shape};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Image error: {0}")]
    Image(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Opaque serialized capture of the whole surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Supported background image rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// 0 or 360 degrees.
    #[default]
    Upright,
    /// 90 degrees; the image pivots on its bottom-left corner.
    Quarter,
    /// 180 degrees; the image pivots on its bottom-right corner.
    Half,
    /// 270 degrees; the image pivots on its top-right corner.
    ThreeQuarter,
}

impl Orientation {
    /// Map an angle in degrees; only multiples of 90 in `0..=360` are supported.
    pub fn from_degrees(angle: f64) -> Option<Self> {
        match angle {
            a if a == 0.0 || a == 360.0 => Some(Orientation::Upright),
            a if a == 90.0 => Some(Orientation::Quarter),
            a if a == 180.0 => Some(Orientation::Half),
            a if a == 270.0 => Some(Orientation::ThreeQuarter),
            _ => None,
        }
    }

    pub fn degrees(self) -> f64 {
        match self {
            Orientation::Upright => 0.0,
            Orientation::Quarter => 90.0,
            Orientation::Half => 180.0,
            Orientation::ThreeQuarter => 270.0,
        }
    }

    /// Whether width and height swap once rotated.
    pub fn is_sideways(self) -> bool {
        matches!(self, Orientation::Quarter | Orientation::ThreeQuarter)
    }
}

/// Background image placed behind all objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImage {
    /// Where the image was loaded from.
    pub src: String,
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    pub orientation: Orientation,
}

/// Raster export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    Jpeg,
    Png,
}

impl ExportFormat {
    /// MIME type used in the exported data URI.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Png => "image/png",
        }
    }
}

/// Raster export parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Encoder quality in `0.0..=1.0` (JPEG only).
    pub quality: f32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Jpeg,
            quality: 0.9,
        }
    }
}

/// Capabilities the engine requires from the retained-mode rendering surface.
pub trait RenderSurface {
    /// Add an object on top of the stack and return its handle.
    fn add(&mut self, shape: Shape) -> ObjectId;

    /// Remove an object, returning it if it was present.
    fn remove(&mut self, id: ObjectId) -> Option<Shape>;

    /// Whether the object is still owned by the surface.
    fn contains(&self, id: ObjectId) -> bool;

    /// Look up an object.
    fn get(&self, id: ObjectId) -> Option<&Shape>;

    /// Objects currently selected by the user.
    fn selected(&self) -> Vec<ObjectId>;

    /// Remove every object. The background is kept.
    fn clear(&mut self);

    fn set_background_color(&mut self, color: SerializableColor);

    /// Load `src` and make it the background in one step; on error the
    /// previous background stays in place.
    fn set_background_image(&mut self, src: &str, orientation: Orientation) -> SurfaceResult<()>;

    /// Serialize the whole surface.
    fn snapshot(&self) -> SurfaceResult<Snapshot>;

    /// Replace the whole surface with a snapshot.
    fn restore(&mut self, snapshot: &Snapshot) -> SurfaceResult<()>;

    fn zoom(&self) -> f64;

    fn set_zoom(&mut self, zoom: f64);

    /// View translation in device pixels.
    fn translation(&self) -> Vec2;

    fn set_translation(&mut self, translation: Vec2);

    /// Set the zoom while keeping `point` (device pixels) fixed on screen.
    fn zoom_to_point(&mut self, point: Point, zoom: f64) {
        let old_zoom = self.zoom();
        if old_zoom <= 0.0 {
            self.set_zoom(zoom);
            return;
        }
        let offset = self.translation();
        let ratio = zoom / old_zoom;
        let anchor = point.to_vec2();
        self.set_zoom(zoom);
        self.set_translation(anchor - (anchor - offset) * ratio);
    }

    /// Render the current view and encode it as a `data:` URI.
    fn export_image(&mut self, options: &ExportOptions) -> SurfaceResult<String>;

    /// Toggle the native freehand mode. Disabling discards an uncommitted stroke.
    fn set_free_drawing(&mut self, enabled: bool);

    /// Whether native freehand mode is on.
    fn is_free_drawing(&self) -> bool;

    /// Color and width used for freehand strokes.
    fn set_free_drawing_brush(&mut self, color: SerializableColor, width: f64);

    /// Append a logical point to the in-progress freehand stroke.
    fn free_drawing_sample(&mut self, point: Point);

    /// Commit the in-progress freehand stroke as an object.
    fn finish_free_drawing(&mut self) -> Option<ObjectId>;

    /// Toggle object selection and hit-testing together.
    fn set_selection_enabled(&mut self, enabled: bool);

    fn is_selection_enabled(&self) -> bool;

    /// Put a text object in edit mode and give it input focus.
    fn enter_text_editing(&mut self, id: ObjectId) -> bool;

    fn exit_text_editing(&mut self, id: ObjectId);

    /// Current content of a text object.
    fn text_content(&self, id: ObjectId) -> Option<&str>;

    fn request_render(&mut self);

    /// Release surface resources.
    fn dispose(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_degrees() {
        assert_eq!(Orientation::from_degrees(0.0), Some(Orientation::Upright));
        assert_eq!(Orientation::from_degrees(360.0), Some(Orientation::Upright));
        assert_eq!(Orientation::from_degrees(90.0), Some(Orientation::Quarter));
        assert_eq!(Orientation::from_degrees(180.0), Some(Orientation::Half));
        assert_eq!(Orientation::from_degrees(270.0), Some(Orientation::ThreeQuarter));
        assert_eq!(Orientation::from_degrees(45.0), None);
        assert!(Orientation::Quarter.is_sideways());
        assert!(!Orientation::Half.is_sideways());
    }

    #[test]
    fn test_export_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.format, ExportFormat::Jpeg);
        assert_eq!(options.format.mime_type(), "image/jpeg");
        assert!((options.quality - 0.9).abs() < f32::EPSILON);
    }
}
