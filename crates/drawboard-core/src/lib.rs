//! Drawboard Core Library
//!
//! Platform-agnostic drawing-surface engine: pointer gestures, shape builders,
//! custom-draw generators, undo history and the view transform. Rendering goes
//! through the [`RenderSurface`] trait.

pub mod annotations;
pub mod board;
pub mod config;
pub mod custom;
pub mod error;
pub mod history;
pub mod image_source;
pub mod input;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod tools;
pub mod transform;
pub mod view;

pub use board::{BackgroundImageOptions, Drawboard, DrawboardBuilder, Gesture};
pub use config::{BoardConfig, BoardHandlers};
pub use custom::{CustomDraw, CustomDrawRegistry, CustomKind, Trigger};
pub use error::{DrawboardError, DrawboardResult};
pub use history::History;
pub use input::{Modifiers, PointerEvent};
pub use scene::Scene;
pub use shapes::{ObjectId, PathOptions, SerializableColor, Shape, ShapeStyle, TextOptions};
pub use surface::{
    BackgroundImage, ExportFormat, ExportOptions, MemorySurface, Orientation, RenderSurface,
    Snapshot, SurfaceError, SurfaceResult,
};
pub use tools::{Brush, BrushUpdate, DrawMode, ParseModeError};
pub use transform::{ViewTransform, device_to_logical, logical_to_device};
pub use view::ViewController;
