//! In-memory surface implementation.

use super::{
    BackgroundImage, ExportOptions, Orientation, RenderSurface, Snapshot, SurfaceError,
    SurfaceResult,
};
use crate::scene::Scene;
use crate::shapes::{ObjectId, SerializableColor, Shape};
use kurbo::{Point, Vec2};
use std::collections::HashMap;

/// Headless surface for testing and ephemeral use.
///
/// Background images resolve against a table registered with
/// [`MemorySurface::with_image`]; any other source fails to load. Raster
/// export is not available.
#[derive(Debug, Default)]
pub struct MemorySurface {
    scene: Scene,
    images: HashMap<String, (u32, u32)>,
}

impl MemorySurface {
    /// Create a new empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image source that will load with the given size.
    pub fn with_image(mut self, src: impl Into<String>, width: u32, height: u32) -> Self {
        self.images.insert(src.into(), (width, height));
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
}

impl RenderSurface for MemorySurface {
    fn add(&mut self, shape: Shape) -> ObjectId {
        self.scene.add(shape)
    }

    fn remove(&mut self, id: ObjectId) -> Option<Shape> {
        self.scene.remove(id)
    }

    fn contains(&self, id: ObjectId) -> bool {
        self.scene.contains(id)
    }

    fn get(&self, id: ObjectId) -> Option<&Shape> {
        self.scene.get(id)
    }

    fn selected(&self) -> Vec<ObjectId> {
        self.scene.selected().to_vec()
    }

    fn clear(&mut self) {
        self.scene.clear();
    }

    fn set_background_color(&mut self, color: SerializableColor) {
        self.scene.set_background_color(color);
    }

    fn set_background_image(&mut self, src: &str, orientation: Orientation) -> SurfaceResult<()> {
        let (width, height) = self
            .images
            .get(src)
            .copied()
            .ok_or_else(|| SurfaceError::NotFound(src.to_string()))?;
        self.scene.set_background_image(BackgroundImage {
            src: src.to_string(),
            width,
            height,
            orientation,
        });
        Ok(())
    }

    fn snapshot(&self) -> SurfaceResult<Snapshot> {
        self.scene.snapshot()
    }

    fn restore(&mut self, snapshot: &Snapshot) -> SurfaceResult<()> {
        self.scene.restore(snapshot)
    }

    fn zoom(&self) -> f64 {
        self.scene.zoom()
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.scene.set_zoom(zoom);
    }

    fn translation(&self) -> Vec2 {
        self.scene.translation()
    }

    fn set_translation(&mut self, translation: Vec2) {
        self.scene.set_translation(translation);
    }

    fn export_image(&mut self, _options: &ExportOptions) -> SurfaceResult<String> {
        Err(SurfaceError::Unsupported(
            "memory surface cannot rasterize".to_string(),
        ))
    }

    fn set_free_drawing(&mut self, enabled: bool) {
        self.scene.set_free_drawing(enabled);
    }

    fn is_free_drawing(&self) -> bool {
        self.scene.is_free_drawing()
    }

    fn set_free_drawing_brush(&mut self, color: SerializableColor, width: f64) {
        self.scene.set_free_drawing_brush(color, width);
    }

    fn free_drawing_sample(&mut self, point: Point) {
        self.scene.free_drawing_sample(point);
    }

    fn finish_free_drawing(&mut self) -> Option<ObjectId> {
        self.scene.finish_free_drawing()
    }

    fn set_selection_enabled(&mut self, enabled: bool) {
        self.scene.set_selection_enabled(enabled);
    }

    fn is_selection_enabled(&self) -> bool {
        self.scene.selection_enabled()
    }

    fn enter_text_editing(&mut self, id: ObjectId) -> bool {
        self.scene.enter_text_editing(id)
    }

    fn exit_text_editing(&mut self, id: ObjectId) {
        self.scene.exit_text_editing(id);
    }

    fn text_content(&self, id: ObjectId) -> Option<&str> {
        self.scene.text_content(id)
    }

    fn request_render(&mut self) {
        self.scene.request_render();
    }

    fn dispose(&mut self) {
        self.scene.dispose();
    }
}
