//! The drawing-surface engine.
//!
//! [`Drawboard`] turns pointer events into shape-construction calls on a
//! [`RenderSurface`]. It owns the mode, brush, view, undo history and the
//! custom-draw registry; the surface owns every object and the engine keeps
//! only [`ObjectId`] handles, checked with [`RenderSurface::contains`]
//! before use.

use crate::config::{BoardConfig, BoardHandlers};
use crate::custom::{CustomDraw, CustomDrawRegistry, CustomOutput, Trigger};
use crate::error::{DrawboardError, DrawboardResult};
use crate::history::History;
use crate::input::{Modifiers, PointerEvent};
use crate::shapes::{Circle, Line, ObjectId, Path, Rectangle, Shape, TextBox, TextOptions};
use crate::surface::{ExportOptions, Orientation, RenderSurface, Snapshot};
use crate::tools::{Brush, BrushUpdate, DrawMode};
use crate::transform::{ViewTransform, device_to_logical};
use crate::view::{DEFAULT_ZOOM, ViewController, wheel_target};
use kurbo::{Point, Vec2};
use log::{debug, trace, warn};
use std::fmt;

/// Callback receiving the image source.
pub type ImageCallback = Box<dyn FnOnce(&str)>;

/// Background image request.
#[derive(Default)]
pub struct BackgroundImageOptions {
    pub src: String,
    /// Rotation in degrees; one of 0, 90, 180, 270 or 360.
    pub angle: f64,
    /// Runs when the image cannot be loaded.
    pub on_error: Option<ImageCallback>,
    /// Runs after every attempt, successful or not.
    pub on_complete: Option<ImageCallback>,
}

impl BackgroundImageOptions {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn on_error(mut self, callback: impl FnOnce(&str) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce(&str) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for BackgroundImageOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundImageOptions")
            .field("src", &self.src)
            .field("angle", &self.angle)
            .finish_non_exhaustive()
    }
}

/// Pointer gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// Panning; `anchor` is the last device position seen.
    Dragging { anchor: Point },
    /// Pointer is down in a drawing mode.
    Drawing { stroke_started: bool },
}

/// Builder for [`Drawboard`].
pub struct DrawboardBuilder<S> {
    surface: Option<S>,
    config: BoardConfig,
    handlers: BoardHandlers,
}

impl<S: RenderSurface> Default for DrawboardBuilder<S> {
    fn default() -> Self {
        Self {
            surface: None,
            config: BoardConfig::default(),
            handlers: BoardHandlers::default(),
        }
    }
}

impl<S: RenderSurface> DrawboardBuilder<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendering surface to draw on. Required.
    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn handlers(mut self, handlers: BoardHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn on_undo(mut self, handler: impl FnMut(&[Snapshot]) + 'static) -> Self {
        self.handlers = self.handlers.on_undo(handler);
        self
    }

    pub fn on_zoom_change(mut self, handler: impl FnMut(f64) + 'static) -> Self {
        self.handlers = self.handlers.on_zoom_change(handler);
        self
    }

    pub fn on_drag_state_change(mut self, handler: impl FnMut(bool) + 'static) -> Self {
        self.handlers = self.handlers.on_drag_state_change(handler);
        self
    }

    pub fn build(self) -> DrawboardResult<Drawboard<S>> {
        let surface = self.surface.ok_or_else(|| {
            DrawboardError::Configuration("no rendering surface supplied".to_string())
        })?;
        self.config.validate()?;
        Ok(Drawboard::init(surface, self.config, self.handlers))
    }
}

/// Interactive drawing surface engine.
pub struct Drawboard<S: RenderSurface> {
    surface: S,
    window_scale: f64,
    mode: DrawMode,
    brush: Brush,
    view: ViewController,
    history: History,
    registry: CustomDrawRegistry,
    handlers: BoardHandlers,
    gesture: Gesture,
    /// Raw device position where the gesture started.
    from: Point,
    /// Latest raw device position.
    to: Point,
    /// Pointer moves seen; odd counts are skipped while idle.
    move_count: u64,
    pending: Option<ObjectId>,
    pending_text: Option<ObjectId>,
}

impl<S: RenderSurface> Drawboard<S> {
    pub fn builder() -> DrawboardBuilder<S> {
        DrawboardBuilder::new()
    }

    fn init(surface: S, config: BoardConfig, handlers: BoardHandlers) -> Self {
        let mut board = Self {
            surface,
            window_scale: config.window_scale,
            mode: config.initial_mode,
            brush: Brush {
                color: config.brush_color,
                width: config.brush_width,
                font_size: config.font_size,
            },
            view: ViewController::new(config.min_zoom, config.max_zoom),
            history: History::with_capacity_limit(config.max_history),
            registry: CustomDrawRegistry::new(),
            handlers,
            gesture: Gesture::Idle,
            from: Point::ZERO,
            to: Point::ZERO,
            move_count: 0,
            pending: None,
            pending_text: None,
        };

        board.surface.set_background_color(config.background_color);
        board
            .surface
            .set_free_drawing_brush(board.brush.color, board.brush.width);
        board.surface.set_zoom(board.view.zoom());
        board.set_mode(config.initial_mode);
        board
    }

    // --- Pointer entry points ---

    /// Dispatch a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> DrawboardResult<()> {
        trace!("Pointer event {:?}", event);
        match event {
            PointerEvent::Down {
                position,
                modifiers,
            } => self.pointer_down(position, modifiers),
            PointerEvent::Move { position, .. } => self.pointer_move(position),
            PointerEvent::Up { position, .. } => self.pointer_up(position),
            PointerEvent::Wheel {
                position,
                delta,
                modifiers,
            } => {
                self.wheel(position, delta, modifiers);
                Ok(())
            }
        }
    }

    /// Start a pan (pan modifier held) or a drawing gesture.
    pub fn pointer_down(&mut self, position: Point, modifiers: Modifiers) -> DrawboardResult<()> {
        if modifiers.pans() {
            self.surface.set_free_drawing(false);
            self.surface.set_selection_enabled(false);
            self.gesture = Gesture::Dragging { anchor: position };
            self.pending = None;
            self.handlers.drag_changed(true);
            self.exit_text_edit();
            debug!("Pan started at {:?}", position);
            return Ok(());
        }

        if matches!(self.gesture, Gesture::Dragging { .. }) {
            return Ok(());
        }

        self.from = position;
        self.to = position;
        self.gesture = Gesture::Drawing {
            stroke_started: false,
        };
        if let Err(e) = self.snapshot() {
            self.abort("pointer down", &e);
            return Err(e);
        }
        Ok(())
    }

    /// Pan, or rebuild the pending object for the current mode.
    pub fn pointer_move(&mut self, position: Point) -> DrawboardResult<()> {
        match self.gesture {
            Gesture::Dragging { anchor } => {
                let delta = position - anchor;
                let translation = self.surface.translation() + delta;
                self.surface.set_translation(translation);
                self.surface.request_render();
                self.gesture = Gesture::Dragging { anchor: position };
                Ok(())
            }
            Gesture::Idle => {
                if self.move_count % 2 == 0 {
                    self.to = position;
                }
                self.move_count = self.move_count.wrapping_add(1);
                Ok(())
            }
            Gesture::Drawing { .. } => {
                self.to = position;
                self.move_count = self.move_count.wrapping_add(1);
                self.draw_in_move().inspect_err(|e| self.abort("pointer move", e))
            }
        }
    }

    /// End a pan, or commit the gesture.
    pub fn pointer_up(&mut self, position: Point) -> DrawboardResult<()> {
        match self.gesture {
            Gesture::Dragging { .. } => {
                self.gesture = Gesture::Idle;
                self.surface
                    .set_selection_enabled(self.mode == DrawMode::Select);
                self.handlers.drag_changed(false);
                debug!("Pan ended");
                Ok(())
            }
            Gesture::Idle => Ok(()),
            Gesture::Drawing { .. } => {
                self.to = position;
                let result = self.draw_in_up();
                self.pending = None;
                self.gesture = Gesture::Idle;
                result.inspect_err(|e| self.abort("pointer up", e))
            }
        }
    }

    /// Zoom around the pointer when the pan modifier is held.
    pub fn wheel(&mut self, position: Point, delta: Vec2, modifiers: Modifiers) {
        if !modifiers.pans() {
            return;
        }
        let target = wheel_target(self.surface.zoom(), delta.y);
        let Some(zoom) = self.view.set_zoom(target) else {
            return;
        };
        self.handlers.zoom_changed(zoom);
        self.surface.zoom_to_point(position, zoom);
        self.surface.request_render();
        debug!("Wheel zoom to {} at {:?}", zoom, position);
    }

    fn abort(&mut self, stage: &str, error: &DrawboardError) {
        warn!("Abandoning gesture after {} failed: {}", stage, error);
        self.gesture = Gesture::Idle;
        self.pending = None;
    }

    fn draw_in_move(&mut self) -> DrawboardResult<()> {
        if let Some(id) = self.pending.take() {
            if self.surface.contains(id) {
                self.surface.remove(id);
            }
        }
        self.surface.set_free_drawing(self.mode == DrawMode::Pen);

        let (from, to) = self.logical_points();
        if self.mode.builds_on_move() {
            let shape = match self.mode {
                DrawMode::Rect => Shape::Rectangle(Rectangle::build(from, to, &self.brush)),
                DrawMode::Circle => Shape::Circle(Circle::build(from, to, &self.brush)),
                _ => Shape::Line(Line::build(from, to, &self.brush)),
            };
            self.pending = Some(self.surface.add(shape));
        } else {
            match self.mode {
                DrawMode::Pen => {
                    if let Gesture::Drawing { stroke_started } = &mut self.gesture {
                        if !*stroke_started {
                            self.surface.free_drawing_sample(from);
                            *stroke_started = true;
                        }
                    }
                    self.surface.free_drawing_sample(to);
                }
                DrawMode::Custom => self.invoke_custom(Trigger::Move)?,
                _ => {}
            }
        }
        self.surface.request_render();
        Ok(())
    }

    fn draw_in_up(&mut self) -> DrawboardResult<()> {
        match self.mode {
            DrawMode::Text => {
                let options = TextOptions {
                    edit: true,
                    ..TextOptions::default()
                };
                let id = self.place_text(&options);
                self.pending = Some(id);
            }
            DrawMode::Custom => self.invoke_custom(Trigger::Up)?,
            DrawMode::Pen => {
                if self.surface.is_free_drawing() {
                    let (_, to) = self.logical_points();
                    self.surface.free_drawing_sample(to);
                }
                if let Some(id) = self.surface.finish_free_drawing() {
                    debug!("Committed pen stroke {}", id);
                }
            }
            _ => {}
        }
        self.surface.request_render();
        Ok(())
    }

    fn invoke_custom(&mut self, trigger: Trigger) -> DrawboardResult<()> {
        let (from, to) = self.logical_points();
        let outputs = self.registry.generate(
            trigger,
            from,
            to,
            self.brush.width,
            self.brush.font_size,
            self.view.zoom(),
        );
        for output in outputs {
            let id = match output {
                CustomOutput::Path(options) => {
                    let path = Path::build(options, &self.brush)?;
                    self.surface.add(Shape::Path(path))
                }
                CustomOutput::Text(options) => self.place_text(&options),
            };
            self.pending = Some(id);
        }
        Ok(())
    }

    /// Replace the editable text box with a new one anchored at the gesture start.
    fn place_text(&mut self, options: &TextOptions) -> ObjectId {
        if let Some(previous) = self.pending_text.take() {
            if self.surface.contains(previous) {
                self.surface.exit_text_editing(previous);
                if self.surface.text_content(previous).is_none_or(str::is_empty) {
                    self.surface.remove(previous);
                }
            }
        }

        let (from, _) = self.logical_points();
        let text = TextBox::build(options, from, &self.brush);
        let id = self.surface.add(Shape::Text(text));
        self.pending_text = Some(id);
        if options.edit {
            self.surface.enter_text_editing(id);
        }
        id
    }

    fn exit_text_edit(&mut self) {
        if let Some(id) = self.pending_text.take() {
            if self.surface.contains(id) {
                self.surface.exit_text_editing(id);
            }
        }
    }

    fn view_transform(&self) -> ViewTransform {
        ViewTransform::new(self.view.zoom(), self.surface.translation())
    }

    fn logical_points(&self) -> (Point, Point) {
        let view = self.view_transform();
        (
            device_to_logical(self.from, self.window_scale, &view),
            device_to_logical(self.to, self.window_scale, &view),
        )
    }

    // --- History ---

    /// Push a snapshot of the whole surface.
    pub fn snapshot(&mut self) -> DrawboardResult<()> {
        let snapshot = self.surface.snapshot()?;
        self.history.push(snapshot);
        Ok(())
    }

    /// Restore the most recent snapshot. With no history this clears the
    /// surface instead.
    pub fn undo(&mut self) -> DrawboardResult<()> {
        self.handlers.undo(self.history.entries());

        let Some(snapshot) = self.history.pop() else {
            debug!("Undo with empty history, clearing");
            return self.clear(false);
        };
        self.exit_text_edit();
        self.pending = None;
        self.surface.restore(&snapshot)?;
        self.surface.request_render();
        debug!("Undo ({} snapshots left)", self.history.len());
        Ok(())
    }

    /// Remove every object. `keep_checkpoint` pushes a snapshot of the empty
    /// surface; otherwise the history is discarded.
    pub fn clear(&mut self, keep_checkpoint: bool) -> DrawboardResult<()> {
        self.surface.clear();
        self.pending = None;
        self.pending_text = None;
        if keep_checkpoint {
            self.snapshot()?;
        } else {
            self.history.clear();
        }
        self.surface.request_render();
        Ok(())
    }

    /// Clear and release the surface, handing it back.
    pub fn destroy(mut self) -> S {
        self.surface.clear();
        self.history.clear();
        self.pending = None;
        self.pending_text = None;
        self.surface.dispose();
        self.surface
    }

    // --- Mode and brush ---

    /// Switch mode. Cancels a drawing gesture, turns freehand off, enables
    /// selection only in select mode and leaves text editing.
    pub fn set_mode(&mut self, mode: DrawMode) {
        if matches!(self.gesture, Gesture::Drawing { .. }) {
            self.gesture = Gesture::Idle;
        }
        // Whatever the abandoned gesture drew stays on the surface.
        self.pending = None;
        self.surface.set_free_drawing(false);
        self.mode = mode;
        self.surface.set_selection_enabled(mode == DrawMode::Select);
        self.exit_text_edit();
        debug!("Mode set to {}", mode);
    }

    pub fn enable_select(&mut self) {
        self.set_mode(DrawMode::Select);
    }

    pub fn set_brush(&mut self, update: BrushUpdate) {
        self.brush.apply(update);
        self.surface
            .set_free_drawing_brush(self.brush.color, self.brush.width);
    }

    pub fn set_font_size(&mut self, size: f64) {
        if !size.is_finite() || size <= 0.0 {
            warn!("Ignoring invalid font size {}", size);
            return;
        }
        self.brush.font_size = size;
    }

    /// Remove the selected objects; returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let selected = self.surface.selected();
        let removed = selected
            .into_iter()
            .filter(|id| self.surface.remove(*id).is_some())
            .count();
        if removed > 0 {
            self.surface.request_render();
        }
        removed
    }

    // --- Text and background ---

    /// Place a text box; the gesture start point anchors it unless the
    /// options give a position.
    pub fn set_text(
        &mut self,
        options: TextOptions,
        checkpoint: bool,
    ) -> DrawboardResult<ObjectId> {
        let id = self.place_text(&options);
        self.surface.request_render();
        if checkpoint {
            self.snapshot()?;
        }
        Ok(id)
    }

    /// Load and install a background image. Failures go to `on_error`;
    /// `on_complete` runs either way.
    pub fn set_background_image(&mut self, options: BackgroundImageOptions, checkpoint: bool) {
        let BackgroundImageOptions {
            src,
            angle,
            on_error,
            on_complete,
        } = options;

        let orientation = Orientation::from_degrees(angle).unwrap_or_else(|| {
            warn!("Unsupported background angle {}, drawing upright", angle);
            Orientation::Upright
        });

        match self.surface.set_background_image(&src, orientation) {
            Ok(()) => {
                self.surface.request_render();
                if checkpoint {
                    if let Err(e) = self.snapshot() {
                        warn!("Background checkpoint failed: {}", e);
                    }
                }
                debug!("Background image set: {}", src);
            }
            Err(e) => {
                warn!("Background image {} failed to load: {}", src, e);
                if let Some(callback) = on_error {
                    callback(&src);
                }
            }
        }
        if let Some(callback) = on_complete {
            callback(&src);
        }
    }

    // --- Custom draws ---

    pub fn register_custom_draw(&mut self, draw: CustomDraw) -> DrawboardResult<()> {
        self.registry.register(draw)
    }

    /// Switch to custom mode and arm exactly the named draws.
    pub fn enable_custom_draws<N: AsRef<str>>(&mut self, names: &[N]) {
        self.set_mode(DrawMode::Custom);
        self.registry.set_enabled(names);
    }

    // --- View ---

    /// Clamp and apply a zoom. Returns the zoom in effect afterwards.
    pub fn set_zoom(&mut self, value: f64, suppress_notify: bool, reset_origin: bool) -> f64 {
        let Some(zoom) = self.view.set_zoom(value) else {
            return self.view.zoom();
        };
        if !suppress_notify {
            self.handlers.zoom_changed(zoom);
        }
        self.surface.set_zoom(zoom);
        if reset_origin {
            self.surface.set_translation(Vec2::ZERO);
        }
        self.surface.request_render();
        debug!("Zoom set to {}", zoom);
        zoom
    }

    pub fn set_min_zoom(&mut self, zoom: f64) {
        self.view.set_min_zoom(zoom);
    }

    pub fn set_max_zoom(&mut self, zoom: f64) {
        self.view.set_max_zoom(zoom);
    }

    /// Reset the view and export the surface as a JPEG data URI, rendered at
    /// `zoom` (default 1) clamped to the zoom bounds. The view keeps that zoom
    /// afterwards; observers are not notified.
    pub fn export_image(&mut self, zoom: Option<f64>) -> DrawboardResult<String> {
        let requested = zoom
            .filter(|z| z.is_finite() && *z > 0.0)
            .unwrap_or(DEFAULT_ZOOM);
        let render_zoom = self
            .view
            .set_zoom(requested)
            .unwrap_or_else(|| self.view.zoom());
        self.surface.set_zoom(render_zoom);
        self.surface.set_translation(Vec2::ZERO);
        debug!("Exporting image at zoom {}", render_zoom);
        Ok(self.surface.export_image(&ExportOptions::default())?)
    }

    // --- Accessors ---

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn zoom(&self) -> f64 {
        self.view.zoom()
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn window_scale(&self) -> f64 {
        self.window_scale
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn custom_draws(&self) -> &CustomDrawRegistry {
        &self.registry
    }

    /// Object under construction, if it is still on the surface.
    pub fn pending(&self) -> Option<ObjectId> {
        self.pending.filter(|id| self.surface.contains(*id))
    }

    /// Editable text box, if it is still on the surface.
    pub fn pending_text(&self) -> Option<ObjectId> {
        self.pending_text.filter(|id| self.surface.contains(*id))
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<S: RenderSurface + fmt::Debug> fmt::Debug for Drawboard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawboard")
            .field("surface", &self.surface)
            .field("mode", &self.mode)
            .field("brush", &self.brush)
            .field("view", &self.view)
            .field("history", &self.history.len())
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}
