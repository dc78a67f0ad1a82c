//! Viewport module for pan/zoom transforms.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom scale.
pub const MIN_SCALE: f64 = 0.1;
/// Largest allowed zoom scale.
pub const MAX_SCALE: f64 = 3.0;
/// Multiplicative step for a single zoom-in action.
pub const ZOOM_STEP: f64 = 1.1;

/// Viewport manages the view transform for the canvas.
///
/// Screen space relates to world space through
/// `screen = world * scale + pan`. The pan offset is kept in screen units,
/// so panning never depends on the current zoom level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan) in screen units.
    pub pan: Vec2,
    /// Current zoom scale.
    pub scale: f64,
    /// Minimum allowed scale.
    pub min_scale: f64,
    /// Maximum allowed scale.
    pub max_scale: f64,
    /// Pixel size of the rendering surface, as reported by the host.
    pub size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            scale: 1.0,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            size: Size::new(800.0, 600.0),
        }
    }
}

impl Viewport {
    /// Create a new viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport with custom scale bounds.
    pub fn with_scale_bounds(min_scale: f64, max_scale: f64) -> Self {
        Self {
            min_scale,
            max_scale,
            ..Self::default()
        }
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.scale)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.pan)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.pan.x) / self.scale,
            (screen_point.y - self.pan.y) / self.scale,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        Point::new(
            world_point.x * self.scale + self.pan.x,
            world_point.y * self.scale + self.pan.y,
        )
    }

    /// Convert a screen-space delta into a world-space delta.
    pub fn screen_delta_to_world(&self, delta: Vec2) -> Vec2 {
        delta / self.scale
    }

    /// Pan the viewport by a delta in screen coordinates.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Zoom by `factor`, keeping the world point under `screen_point` fixed.
    ///
    /// Returns `false` and leaves the viewport untouched when the resulting
    /// scale would leave `[min_scale, max_scale]`.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) -> bool {
        let new_scale = self.scale * factor;
        if !(self.min_scale..=self.max_scale).contains(&new_scale) {
            return false;
        }

        let anchor = Vec2::new(screen_point.x - self.pan.x, screen_point.y - self.pan.y);
        self.pan -= anchor * ((new_scale - self.scale) / self.scale);
        self.scale = new_scale;
        true
    }

    /// One zoom step in or out at `screen_point`.
    pub fn zoom_step(&mut self, screen_point: Point, zoom_in: bool, step: f64) -> bool {
        let factor = if zoom_in { step } else { 1.0 / step };
        self.zoom_at(screen_point, factor)
    }

    /// Record the rendering surface size.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Size::new(width.max(0.0), height.max(0.0));
    }

    /// World-space rectangle currently visible on the surface.
    pub fn visible_world_rect(&self) -> kurbo::Rect {
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right = self.screen_to_world(Point::new(self.size.width, self.size.height));
        kurbo::Rect::from_points(top_left, bottom_right)
    }
}
