//! Shape and stroke definitions for the canvas.

mod ellipse;
mod rectangle;
mod stroke;

pub use stroke::{Stroke, StrokeWidth};

use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Kind of placeable shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Axis-aligned box.
    Square,
    /// Axis-aligned ellipse inscribed in the box.
    Circle,
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Common behaviour of everything that lives on the canvas.
pub trait CanvasItem {
    /// Bounding box in world coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in world coordinates) hits this item.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Path representation for rendering, in world coordinates.
    fn to_path(&self) -> BezPath;
}

/// A placed geometric shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Shape kind.
    pub kind: ShapeKind,
    /// Center of the bounding box.
    pub center: Point,
    /// Width of the bounding box.
    pub width: f64,
    /// Height of the bounding box.
    pub height: f64,
    /// Uniform scale applied on top of width/height.
    pub scale: f64,
}

impl Shape {
    /// Create a new shape with a fresh id.
    pub fn new(kind: ShapeKind, center: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            center,
            width: width.max(0.0),
            height: height.max(0.0),
            scale: 1.0,
        }
    }

    /// Start a provisional zero-size shape anchored at `anchor`.
    pub fn provisional(kind: ShapeKind, anchor: Point) -> Self {
        Self::new(kind, anchor, 0.0, 0.0)
    }

    /// Get the unique identifier.
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Half extents of the bounding box after scaling.
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * self.scale / 2.0, self.height * self.scale / 2.0)
    }

    /// Resize so that `anchor` stays fixed as one corner and `current` is
    /// the opposite corner.
    pub fn resize_from_anchor(&mut self, anchor: Point, current: Point) {
        let width = (current.x - anchor.x).abs();
        let height = (current.y - anchor.y).abs();

        let x = if current.x < anchor.x {
            anchor.x - width / 2.0
        } else {
            anchor.x + width / 2.0
        };
        let y = if current.y < anchor.y {
            anchor.y - height / 2.0
        } else {
            anchor.y + height / 2.0
        };

        self.width = width;
        self.height = height;
        self.center = Point::new(x, y);
    }

    /// Whether the shape has no area.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Exact containment test (no tolerance).
    pub fn contains(&self, point: Point) -> bool {
        let half = self.half_extents();
        match self.kind {
            ShapeKind::Square => rectangle::contains(self.center, half, point),
            ShapeKind::Circle => ellipse::contains(self.center, half, point),
        }
    }
}

impl CanvasItem for Shape {
    fn bounds(&self) -> Rect {
        let half = self.half_extents();
        Rect::new(
            self.center.x - half.x,
            self.center.y - half.y,
            self.center.x + half.x,
            self.center.y + half.y,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if tolerance <= 0.0 {
            return self.contains(point);
        }
        let half = self.half_extents() + Vec2::new(tolerance, tolerance);
        match self.kind {
            ShapeKind::Square => rectangle::contains(self.center, half, point),
            ShapeKind::Circle => ellipse::contains(self.center, half, point),
        }
    }

    fn to_path(&self) -> BezPath {
        let half = self.half_extents();
        match self.kind {
            ShapeKind::Square => rectangle::path(self.center, half),
            ShapeKind::Circle => ellipse::path(self.center, half),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Shape::new(ShapeKind::Square, Point::ZERO, 10.0, 10.0);
        let b = Shape::new(ShapeKind::Square, Point::ZERO, 10.0, 10.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_square_corner_is_inside() {
        let square = Shape::new(ShapeKind::Square, Point::new(100.0, 100.0), 50.0, 50.0);
        assert!(square.contains(Point::new(75.0, 75.0)));
        assert!(square.contains(Point::new(125.0, 125.0)));
        assert!(square.contains(Point::new(125.0, 75.0)));
    }

    #[test]
    fn test_square_beyond_edge_is_outside() {
        let square = Shape::new(ShapeKind::Square, Point::new(100.0, 100.0), 50.0, 50.0);
        assert!(!square.contains(Point::new(126.0, 100.0)));
        assert!(!square.contains(Point::new(74.0, 100.0)));
        assert!(!square.contains(Point::new(100.0, 126.0)));
        assert!(!square.contains(Point::new(100.0, 74.0)));
    }

    #[test]
    fn test_circle_boundary_is_inside() {
        let circle = Shape::new(ShapeKind::Circle, Point::new(0.0, 0.0), 40.0, 20.0);
        assert!(circle.contains(Point::new(20.0, 0.0)));
        assert!(circle.contains(Point::new(0.0, -10.0)));
        // Corner of the bounding box is outside the ellipse.
        assert!(!circle.contains(Point::new(20.0, 10.0)));
        assert!(!circle.contains(Point::new(21.0, 0.0)));
    }

    #[test]
    fn test_hit_test_tolerance_expands() {
        let square = Shape::new(ShapeKind::Square, Point::ZERO, 10.0, 10.0);
        assert!(!square.hit_test(Point::new(7.0, 0.0), 0.0));
        assert!(square.hit_test(Point::new(7.0, 0.0), 2.0));
    }

    #[test]
    fn test_resize_from_anchor_both_directions() {
        let anchor = Point::new(100.0, 100.0);
        let mut shape = Shape::provisional(ShapeKind::Square, anchor);

        shape.resize_from_anchor(anchor, Point::new(150.0, 150.0));
        assert_eq!(shape.center, Point::new(125.0, 125.0));
        assert!((shape.width - 50.0).abs() < f64::EPSILON);
        assert!((shape.height - 50.0).abs() < f64::EPSILON);

        shape.resize_from_anchor(anchor, Point::new(80.0, 160.0));
        assert_eq!(shape.center, Point::new(90.0, 130.0));
        assert!((shape.width - 20.0).abs() < f64::EPSILON);
        assert!((shape.height - 60.0).abs() < f64::EPSILON);

        // Anchor stays on the bounding box.
        let bounds = shape.bounds();
        assert!((bounds.x1 - anchor.x).abs() < 1e-10);
        assert!((bounds.y0 - anchor.y).abs() < 1e-10);
    }

    #[test]
    fn test_bounds() {
        let shape = Shape::new(ShapeKind::Circle, Point::new(50.0, 50.0), 60.0, 40.0);
        let bounds = shape.bounds();
        assert!((bounds.x0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 80.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_point_to_segment_dist() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-12);
        assert!((point_to_segment_dist(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-12);
        assert!((point_to_segment_dist(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_color_conversion() {
        let color = SerializableColor::new(76, 0, 255, 128);
        let peniko_color: Color = color.into();
        assert_eq!(SerializableColor::from(peniko_color), color);
    }
}
