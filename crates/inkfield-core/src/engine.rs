//! Pointer gesture dispatch.
//!
//! The engine owns every piece of canvas state and is the only path through
//! which it changes. Each gesture handler pairs its store mutation with the
//! matching history entry, so the log never refers to changes it did not
//! see.

use crate::brush::{BrushUpdate, SmoothingBrush};
use crate::canvas::CanvasDocument;
use crate::config::{ConfigResult, EngineConfig};
use crate::history::{Deleted, HistoryEntry, HistoryLog};
use crate::input::{Modifiers, PointerButton, PointerEvent};
use crate::shapes::{SerializableColor, Shape, ShapeId, ShapeKind, Stroke, StrokeWidth};
use crate::store::{ShapeStore, StrokeStore};
use crate::tools::{CursorIcon, ToolController, ToolKind};
use crate::viewport::Viewport;
use kurbo::Point;
use log::{debug, trace};

/// The gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
enum Gesture {
    #[default]
    Idle,
    /// Extending a freehand stroke through the smoothing brush.
    Drawing { stroke: Stroke },
    /// Sizing a provisional shape; `anchor` stays fixed.
    Creating { anchor: Point, draft: Shape },
    /// Moving an existing shape.
    Dragging {
        id: ShapeId,
        start_center: Point,
        last_screen: Point,
    },
    /// Moving the viewport.
    Panning { last_screen: Point },
}

/// Interactive canvas: document, viewport, tools and history.
#[derive(Debug, Clone)]
pub struct InteractionEngine {
    config: EngineConfig,
    document: CanvasDocument,
    viewport: Viewport,
    tools: ToolController,
    history: HistoryLog,
    brush: SmoothingBrush,
    gesture: Gesture,
    stroke_color: SerializableColor,
    stroke_width: f64,
    selected: Option<ShapeId>,
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }

    /// Create an engine from a configuration, rejecting out-of-range values.
    pub fn with_config(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        let mut viewport = Viewport::with_scale_bounds(config.min_scale, config.max_scale);
        viewport.set_size(config.viewport_width, config.viewport_height);

        Self {
            document: CanvasDocument::new(),
            viewport,
            tools: ToolController::new(),
            history: HistoryLog::new(),
            brush: SmoothingBrush::new(config.brush_radius),
            gesture: Gesture::Idle,
            stroke_color: config.stroke_color,
            stroke_width: config.stroke_width,
            selected: None,
            config,
        }
    }

    // --- Mode setters -----------------------------------------------------

    /// Choose a tool (re-choosing the active one deactivates it).
    pub fn set_active_tool(&mut self, tool: Option<ToolKind>) {
        self.tools.set_active_tool(tool);
        debug!("tool: {:?}", self.tools.active_tool());
    }

    /// Arm placement of a shape kind.
    pub fn place_shape(&mut self, kind: ShapeKind) {
        self.tools.place_shape(kind);
        debug!("tool: placing {kind:?}");
    }

    /// Color for strokes started from now on.
    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        self.stroke_color = color;
    }

    /// Width for strokes started from now on. Non-positive widths are ignored.
    pub fn set_stroke_width(&mut self, width: f64) {
        if width > 0.0 {
            self.stroke_width = width;
        }
    }

    /// Pick one of the preset pencil widths.
    pub fn set_stroke_width_preset(&mut self, preset: StrokeWidth) {
        self.set_stroke_width(preset.value());
    }

    /// The host's rendering surface changed size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.set_size(width, height);
    }

    // --- Pointer events ---------------------------------------------------

    /// Dispatch a pointer event to the matching handler.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => self.on_pointer_down(position, button, modifiers),
            PointerEvent::Move { position } => self.on_pointer_move(position),
            PointerEvent::Up { position, button } => self.on_pointer_up(position, button),
            PointerEvent::Leave { position } => self.on_pointer_leave(position),
            PointerEvent::Wheel { position, delta_y } => self.on_wheel(position, delta_y),
        }
    }

    /// Start a gesture.
    pub fn on_pointer_down(&mut self, screen: Point, button: PointerButton, modifiers: Modifiers) {
        if !matches!(self.gesture, Gesture::Idle) {
            trace!("pointer down ignored: gesture already active");
            return;
        }

        let world = self.viewport.screen_to_world(screen);

        if button == PointerButton::Middle {
            self.begin_pan(screen);
            return;
        }

        match self.tools.active_tool() {
            Some(ToolKind::Eraser) => {
                self.erase_at(world);
                return;
            }
            Some(ToolKind::Pencil) => {
                self.brush.update(world, BrushUpdate::snap());
                self.gesture = Gesture::Drawing {
                    stroke: Stroke::new(world, self.stroke_color, self.stroke_width),
                };
                debug!("gesture: draw from ({:.1}, {:.1})", world.x, world.y);
                return;
            }
            _ => {}
        }

        if let Some(kind) = self.tools.pending_shape() {
            self.gesture = Gesture::Creating {
                anchor: world,
                draft: Shape::provisional(kind, world),
            };
            debug!("gesture: create {kind:?} at ({:.1}, {:.1})", world.x, world.y);
            return;
        }

        if let Some(shape) = self.document.shapes.find_at(world) {
            let id = shape.id();
            self.gesture = Gesture::Dragging {
                id,
                start_center: shape.center,
                last_screen: screen,
            };
            self.selected = Some(id);
            debug!("gesture: drag shape {id}");
            return;
        }

        match self.tools.active_tool() {
            Some(ToolKind::Zoom) => {
                let zoom_in = !modifiers.shift;
                if !self.viewport.zoom_step(screen, zoom_in, self.config.zoom_step) {
                    trace!("zoom rejected at scale {}", self.viewport.scale);
                }
            }
            _ => self.begin_pan(screen),
        }
    }

    /// Route a move to the active gesture.
    pub fn on_pointer_move(&mut self, screen: Point) {
        let world = self.viewport.screen_to_world(screen);

        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Drawing { stroke } => {
                let update = BrushUpdate::with_friction(self.config.brush_friction);
                if self.brush.update(world, update) {
                    stroke.add_point(self.brush.brush());
                }
            }
            Gesture::Creating { anchor, draft } => {
                draft.resize_from_anchor(*anchor, world);
            }
            Gesture::Dragging {
                id, last_screen, ..
            } => {
                let delta = self.viewport.screen_delta_to_world(screen - *last_screen);
                *last_screen = screen;
                if let Some(center) = self.document.shapes.get(*id).map(|s| s.center) {
                    self.document.shapes.update_shape_position(*id, center + delta);
                }
            }
            Gesture::Panning { last_screen } => {
                let delta = screen - *last_screen;
                *last_screen = screen;
                self.viewport.pan_by(delta);
            }
        }
        trace!("pointer move ({:.1}, {:.1})", screen.x, screen.y);
    }

    /// Finish the active gesture.
    ///
    /// A middle-button release only ends a viewport pan.
    pub fn on_pointer_up(&mut self, _screen: Point, button: PointerButton) {
        if button == PointerButton::Middle {
            if matches!(self.gesture, Gesture::Panning { .. }) {
                self.gesture = Gesture::Idle;
            }
            return;
        }
        self.finish_gesture();
    }

    /// The pointer left the surface; behaves like a release.
    pub fn on_pointer_leave(&mut self, _screen: Point) {
        self.finish_gesture();
    }

    /// Wheel zoom anchored at the pointer. Negative deltas zoom in.
    pub fn on_wheel(&mut self, screen: Point, delta_y: f64) {
        if delta_y == 0.0 {
            return;
        }
        self.viewport.zoom_step(screen, delta_y < 0.0, self.config.zoom_step);
    }

    fn begin_pan(&mut self, screen: Point) {
        self.gesture = Gesture::Panning {
            last_screen: screen,
        };
        debug!("gesture: pan");
    }

    /// Delete at most one object: strokes take priority over shapes.
    fn erase_at(&mut self, world: Point) {
        if let Some(index) = self
            .document
            .strokes
            .find_at(world, self.config.eraser_threshold)
        {
            if let Some(stroke) = self.document.strokes.remove_stroke_at(index) {
                debug!("erase: stroke {index}");
                self.history
                    .record(HistoryEntry::Delete(Deleted::Stroke { stroke, index }));
            }
            return;
        }

        let Some(id) = self.document.shapes.find_at(world).map(Shape::id) else {
            return;
        };
        if let Some((index, shape)) = self.document.shapes.delete_shape(id) {
            debug!("erase: shape {id}");
            if self.selected == Some(id) {
                self.selected = None;
            }
            self.history
                .record(HistoryEntry::Delete(Deleted::Shape { shape, index }));
        }
    }

    fn finish_gesture(&mut self) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Panning { .. } => {}
            Gesture::Drawing { stroke } => {
                debug!("gesture: draw finished with {} points", stroke.len());
                self.document.strokes.add_stroke(stroke.clone());
                self.history.record(HistoryEntry::Draw(stroke));
            }
            Gesture::Creating { draft, .. } => {
                debug!(
                    "gesture: commit {:?} {:.1}x{:.1}",
                    draft.kind, draft.width, draft.height
                );
                self.selected = Some(draft.id());
                self.document.shapes.add_shape(draft.clone());
                self.history.record(HistoryEntry::Add(draft));
                self.tools.shape_placed();
            }
            Gesture::Dragging {
                id, start_center, ..
            } => {
                if let Some(new_center) = self.document.shapes.get(id).map(|s| s.center) {
                    debug!("gesture: drag finished for {id}");
                    self.history.record(HistoryEntry::Update {
                        id,
                        previous_center: start_center,
                        new_center,
                    });
                }
            }
        }
    }

    // --- History ----------------------------------------------------------

    /// Undo the last recorded mutation. Ignored while a gesture is active.
    pub fn undo(&mut self) -> bool {
        if self.is_gesture_active() {
            debug!("undo ignored during gesture");
            return false;
        }
        let changed = self.history.undo(&mut self.document);
        self.drop_stale_selection();
        changed
    }

    /// Redo the next mutation. Ignored while a gesture is active.
    pub fn redo(&mut self) -> bool {
        if self.is_gesture_active() {
            debug!("redo ignored during gesture");
            return false;
        }
        let changed = self.history.redo(&mut self.document);
        self.drop_stale_selection();
        changed
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = self.selected {
            if self.document.shapes.get(id).is_none() {
                self.selected = None;
            }
        }
    }

    // --- Read accessors ---------------------------------------------------

    /// Placed shapes, back to front.
    pub fn shapes(&self) -> &ShapeStore {
        &self.document.shapes
    }

    /// Finished strokes, in drawing order.
    pub fn strokes(&self) -> &StrokeStore {
        &self.document.strokes
    }

    /// Current pan and zoom.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Undo/redo log.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Active tool, if any.
    pub fn active_tool(&self) -> Option<ToolKind> {
        self.tools.active_tool()
    }

    /// Shape kind waiting to be placed, if any.
    pub fn pending_shape(&self) -> Option<ShapeKind> {
        self.tools.pending_shape()
    }

    /// Color applied to new strokes.
    pub fn stroke_color(&self) -> SerializableColor {
        self.stroke_color
    }

    /// Width applied to new strokes.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Shape last dragged or created, if it still exists.
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.document.shapes.get(id))
    }

    /// Stroke being drawn, not yet in the store.
    pub fn active_stroke(&self) -> Option<&Stroke> {
        match &self.gesture {
            Gesture::Drawing { stroke } => Some(stroke),
            _ => None,
        }
    }

    /// Shape being sized, not yet in the store.
    pub fn provisional_shape(&self) -> Option<&Shape> {
        match &self.gesture {
            Gesture::Creating { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Whether a pointer gesture is between press and release.
    pub fn is_gesture_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Whether the viewport is being dragged.
    pub fn is_panning(&self) -> bool {
        matches!(self.gesture, Gesture::Panning { .. })
    }

    /// Cursor hint for the host.
    pub fn cursor(&self) -> CursorIcon {
        self.tools.cursor(self.is_panning())
    }
}
