//! A [`RenderSurface`] that draws into an in-process pixel buffer.

use crate::error::RenderError;
use crate::export::{encode, to_data_uri};
use crate::loader::{load_image, orient};
use crate::rasterize::{render_scene, to_pixmap};
use drawboard_core::surface::{BackgroundImage, SurfaceResult};
use drawboard_core::{
    ExportOptions, ObjectId, Orientation, RenderSurface, Scene, SerializableColor, Shape, Snapshot,
};
use image::RgbaImage;
use kurbo::{Point, Vec2};
use tiny_skia::Pixmap;

/// Software surface with a fixed device size.
///
/// Objects and view state live in a [`Scene`]; pixels are produced on
/// demand by [`RasterSurface::render`] and by image export.
#[derive(Debug)]
pub struct RasterSurface {
    scene: Scene,
    width: u32,
    height: u32,
    /// Decoded background, already rotated to its orientation.
    background: Option<Pixmap>,
    frames: u64,
}

impl RasterSurface {
    /// Create a surface of `width` x `height` device pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scene: Scene::new(),
            width,
            height,
            background: None,
            frames: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Number of frames rendered through [`RenderSurface::request_render`].
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Rasterize the current view.
    pub fn render(&self) -> RgbaImage {
        render_scene(&self.scene, self.width, self.height, self.background.as_ref())
    }

    fn load_background(
        src: &str,
        orientation: Orientation,
    ) -> SurfaceResult<(Pixmap, BackgroundImage)> {
        let decoded = load_image(src)?;
        let (width, height) = decoded.dimensions();
        let info = BackgroundImage {
            src: src.to_string(),
            width,
            height,
            orientation,
        };
        let pixels = to_pixmap(&orient(decoded, orientation))
            .ok_or_else(|| RenderError::InvalidImage(format!("{} has no pixels", src)))?;
        Ok((pixels, info))
    }
}

impl RenderSurface for RasterSurface {
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
        let (pixels, info) = Self::load_background(src, orientation)?;
        log::debug!(
            "Background {} loaded ({}x{}, {}°)",
            src,
            info.width,
            info.height,
            orientation.degrees()
        );
        self.background = Some(pixels);
        self.scene.set_background_image(info);
        Ok(())
    }

    fn snapshot(&self) -> SurfaceResult<Snapshot> {
        self.scene.snapshot()
    }

    fn restore(&mut self, snapshot: &Snapshot) -> SurfaceResult<()> {
        let previous = self.scene.background_image().cloned();
        self.scene.restore(snapshot)?;

        let current = self.scene.background_image().cloned();
        if current == previous {
            return Ok(());
        }
        self.background = match current {
            Some(info) => match Self::load_background(&info.src, info.orientation) {
                Ok((pixels, _)) => Some(pixels),
                Err(e) => {
                    log::warn!("Failed to reload background {}: {}", info.src, e);
                    None
                }
            },
            None => None,
        };
        Ok(())
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

    fn export_image(&mut self, options: &ExportOptions) -> SurfaceResult<String> {
        let pixels = self.render();
        let bytes = encode(&pixels, options)?;
        log::info!(
            "Exported {}x{} {} ({} bytes)",
            self.width,
            self.height,
            options.format.mime_type(),
            bytes.len()
        );
        Ok(to_data_uri(&bytes, options.format))
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
        // Frames are produced lazily; only count the request.
        self.frames += 1;
        self.scene.request_render();
    }

    fn dispose(&mut self) {
        self.background = None;
        self.scene.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawboard_core::shapes::Rectangle;
    use image::Rgba;

    fn write_png(dir: &tempfile::TempDir, name: &str, w: u32, h: u32) -> String {
        let path = dir.path().join(name);
        RgbaImage::from_pixel(w, h, Rgba([0, 0, 255, 255]))
            .save(&path)
            .unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_background_image_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_png(&dir, "page.png", 4, 2);
        let mut surface = RasterSurface::new(8, 8);

        surface
            .set_background_image(&src, Orientation::Quarter)
            .unwrap();
        let info = surface.scene().background_image().unwrap();
        assert_eq!((info.width, info.height), (4, 2));

        // Rotated a quarter turn the image covers 2x4 device pixels.
        let frame = surface.render();
        assert_eq!(*frame.get_pixel(1, 3), Rgba([0, 0, 255, 255]));
        assert_eq!(*frame.get_pixel(3, 1), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_missing_background_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_png(&dir, "page.png", 2, 2);
        let mut surface = RasterSurface::new(4, 4);
        surface.set_background_image(&src, Orientation::Upright).unwrap();

        let missing = dir.path().join("nope.png");
        let result = surface.set_background_image(missing.to_str().unwrap(), Orientation::Upright);
        assert!(result.is_err());
        assert_eq!(surface.scene().background_image().unwrap().src, src);
        assert_eq!(*surface.render().get_pixel(0, 0), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_restore_reloads_background() {
        let dir = tempfile::tempdir().unwrap();
        let src = write_png(&dir, "page.png", 2, 2);
        let mut surface = RasterSurface::new(4, 4);
        let empty = surface.snapshot().unwrap();

        surface.set_background_image(&src, Orientation::Upright).unwrap();
        let with_image = surface.snapshot().unwrap();

        surface.restore(&empty).unwrap();
        assert!(surface.scene().background_image().is_none());
        assert_eq!(*surface.render().get_pixel(0, 0), Rgba([255, 255, 255, 255]));

        surface.restore(&with_image).unwrap();
        assert_eq!(*surface.render().get_pixel(0, 0), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_export_jpeg_data_uri() {
        let mut surface = RasterSurface::new(16, 16);
        surface.add(Shape::Rectangle(Rectangle::new(Point::new(2.0, 2.0), 8.0, 8.0)));
        let uri = surface.export_image(&ExportOptions::default()).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_request_render_counts_frames() {
        let mut surface = RasterSurface::new(1, 1);
        surface.request_render();
        surface.request_render();
        assert_eq!(surface.frames(), 2);
    }
}
