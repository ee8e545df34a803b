//! Retained scene state shared by the surface implementations.

use crate::shapes::{Freehand, ObjectId, SerializableColor, Shape, ShapeStyle};
use crate::surface::{BackgroundImage, Snapshot, SurfaceError, SurfaceResult};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tolerance used when committing a freehand stroke.
const STROKE_SIMPLIFY_TOLERANCE: f64 = 0.5;

/// Serialized part of a scene (what a snapshot captures).
#[derive(Serialize)]
struct SceneStateRef<'a> {
    objects: Vec<&'a Shape>,
    background_color: SerializableColor,
    background_image: Option<&'a BackgroundImage>,
}

#[derive(Deserialize)]
struct SceneState {
    objects: Vec<Shape>,
    background_color: SerializableColor,
    #[serde(default)]
    background_image: Option<BackgroundImage>,
}

/// Objects, background and interaction flags of a drawing surface.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: HashMap<ObjectId, Shape>,
    /// Back to front.
    z_order: Vec<ObjectId>,
    background_color: SerializableColor,
    background_image: Option<BackgroundImage>,
    selected: Vec<ObjectId>,
    selection_enabled: bool,
    editing: Option<ObjectId>,
    free_drawing: bool,
    stroke_style: ShapeStyle,
    stroke: Vec<Point>,
    zoom: f64,
    translation: Vec2,
    render_requests: u64,
    disposed: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            z_order: Vec::new(),
            background_color: SerializableColor::white(),
            background_image: None,
            selected: Vec::new(),
            selection_enabled: true,
            editing: None,
            free_drawing: false,
            stroke_style: ShapeStyle::default(),
            stroke: Vec::new(),
            zoom: 1.0,
            translation: Vec2::ZERO,
            render_requests: 0,
            disposed: false,
        }
    }

    pub fn add(&mut self, shape: Shape) -> ObjectId {
        let id = shape.id();
        self.z_order.retain(|&other| other != id);
        self.z_order.push(id);
        self.objects.insert(id, shape);
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<Shape> {
        self.z_order.retain(|&other| other != id);
        self.selected.retain(|&other| other != id);
        if self.editing == Some(id) {
            self.editing = None;
        }
        self.objects.remove(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Shape> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Shape> {
        self.objects.get_mut(&id)
    }

    /// Objects in paint order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.objects.get(id))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove every object; the background stays.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.z_order.clear();
        self.selected.clear();
        self.editing = None;
        self.stroke.clear();
    }

    pub fn background_color(&self) -> SerializableColor {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: SerializableColor) {
        self.background_color = color;
    }

    pub fn background_image(&self) -> Option<&BackgroundImage> {
        self.background_image.as_ref()
    }

    pub fn set_background_image(&mut self, image: BackgroundImage) {
        self.background_image = Some(image);
    }

    /// Serialize objects (in z-order) and background.
    pub fn snapshot(&self) -> SurfaceResult<Snapshot> {
        let state = SceneStateRef {
            objects: self.shapes_ordered().collect(),
            background_color: self.background_color,
            background_image: self.background_image.as_ref(),
        };
        serde_json::to_string(&state)
            .map(Snapshot::new)
            .map_err(|e| SurfaceError::Serialization(e.to_string()))
    }

    /// Replace objects and background from a snapshot. Selection and text
    /// editing are reset; the view is untouched.
    pub fn restore(&mut self, snapshot: &Snapshot) -> SurfaceResult<()> {
        let state: SceneState = serde_json::from_str(snapshot.as_str())
            .map_err(|e| SurfaceError::Serialization(e.to_string()))?;

        self.clear();
        for shape in state.objects {
            self.add(shape);
        }
        self.background_color = state.background_color;
        self.background_image = state.background_image;
        Ok(())
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Vec2) {
        self.translation = translation;
    }

    /// Map a device point to logical coordinates with the current view.
    pub fn to_logical(&self, point: Point) -> Point {
        let zoom = if self.zoom > 0.0 { self.zoom } else { 1.0 };
        ((point.to_vec2() - self.translation) / zoom).to_point()
    }

    pub fn selection_enabled(&self) -> bool {
        self.selection_enabled
    }

    /// Toggle selection; disabling drops the current selection.
    pub fn set_selection_enabled(&mut self, enabled: bool) {
        self.selection_enabled = enabled;
        if !enabled {
            self.selected.clear();
        }
    }

    pub fn selected(&self) -> &[ObjectId] {
        &self.selected
    }

    /// Add an object to the selection. Fails when selection is off.
    pub fn select(&mut self, id: ObjectId) -> bool {
        if !self.selection_enabled || !self.contains(id) {
            return false;
        }
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
        true
    }

    /// Select the topmost object under a logical point.
    pub fn select_at(&mut self, point: Point, tolerance: f64) -> Option<ObjectId> {
        if !self.selection_enabled {
            return None;
        }
        let hit = self
            .z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.objects.get(id).is_some_and(|s| s.hit_test(point, tolerance)))?;
        self.selected.clear();
        self.selected.push(hit);
        Some(hit)
    }

    pub fn is_free_drawing(&self) -> bool {
        self.free_drawing
    }

    /// Toggle freehand mode; turning it off drops an uncommitted stroke.
    pub fn set_free_drawing(&mut self, enabled: bool) {
        self.free_drawing = enabled;
        if !enabled {
            self.stroke.clear();
        }
    }

    pub fn set_free_drawing_brush(&mut self, color: SerializableColor, width: f64) {
        self.stroke_style = ShapeStyle::stroked(color, width);
    }

    pub fn free_drawing_sample(&mut self, point: Point) {
        if self.free_drawing {
            self.stroke.push(point);
        }
    }

    /// Points of the uncommitted stroke.
    pub fn pending_stroke(&self) -> &[Point] {
        &self.stroke
    }

    /// Commit the buffered stroke as a freehand object.
    pub fn finish_free_drawing(&mut self) -> Option<ObjectId> {
        if !self.free_drawing || self.stroke.is_empty() {
            self.stroke.clear();
            return None;
        }
        let points = std::mem::take(&mut self.stroke);
        let mut freehand = Freehand::from_points(points, self.stroke_style.clone());
        freehand.simplify(STROKE_SIMPLIFY_TOLERANCE);
        Some(self.add(Shape::Freehand(freehand)))
    }

    /// Start editing a text object. Non-text objects are refused.
    pub fn enter_text_editing(&mut self, id: ObjectId) -> bool {
        if self.objects.get(&id).and_then(Shape::as_text).is_none() {
            return false;
        }
        self.editing = Some(id);
        true
    }

    pub fn exit_text_editing(&mut self, id: ObjectId) {
        if self.editing == Some(id) {
            self.editing = None;
        }
    }

    pub fn editing(&self) -> Option<ObjectId> {
        self.editing
    }

    pub fn text_content(&self, id: ObjectId) -> Option<&str> {
        self.objects
            .get(&id)
            .and_then(Shape::as_text)
            .map(|t| t.content.as_str())
    }

    /// Replace the content of a text object, as typing into it would.
    pub fn set_text_content(&mut self, id: ObjectId, content: impl Into<String>) -> bool {
        match self.objects.get_mut(&id).and_then(Shape::as_text_mut) {
            Some(text) => {
                text.content = content.into();
                true
            }
            None => false,
        }
    }

    pub fn request_render(&mut self) {
        self.render_requests += 1;
    }

    /// How many renders have been requested so far.
    pub fn render_requests(&self) -> u64 {
        self.render_requests
    }

    pub fn dispose(&mut self) {
        self.clear();
        self.background_image = None;
        self.free_drawing = false;
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
