//! Freehand stroke (series of smoothed points).

use super::{CanvasItem, SerializableColor, point_to_segment_dist};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Preset pencil widths offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeWidth {
    #[default]
    Small,
    Medium,
    Big,
}

impl StrokeWidth {
    /// Width in world units.
    pub fn value(self) -> f64 {
        match self {
            StrokeWidth::Small => 2.0,
            StrokeWidth::Medium => 5.0,
            StrokeWidth::Big => 10.0,
        }
    }
}

/// A freehand drawing.
///
/// Points are only appended while the draw gesture is active; afterwards
/// the stroke is treated as immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Points in the stroke, in drawing order.
    pub points: Vec<Point>,
    /// Stroke color.
    pub color: SerializableColor,
    /// Stroke width.
    pub width: f64,
}

impl Stroke {
    /// Start a stroke at `origin`.
    pub fn new(origin: Point, color: SerializableColor, width: f64) -> Self {
        Self {
            points: vec![origin],
            color,
            width,
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, color: SerializableColor, width: f64) -> Self {
        Self { points, color, width }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Minimum distance from `point` to the polyline, skipping segments
    /// whose `threshold`-inflated bounding box does not contain the point.
    ///
    /// Returns `None` when no segment is within reach.
    pub fn distance_within(&self, point: Point, threshold: f64) -> Option<f64> {
        if let [only] = self.points.as_slice() {
            let dist = only.distance(point);
            return (dist <= threshold).then_some(dist);
        }

        self.points
            .windows(2)
            .filter(|w| {
                Rect::from_points(w[0], w[1])
                    .inflate(threshold, threshold)
                    .contains_inclusive(point)
            })
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .filter(|dist| *dist <= threshold)
            .reduce(f64::min)
    }
}

/// Inclusive containment; `Rect::contains` excludes the far edges.
trait ContainsInclusive {
    fn contains_inclusive(&self, point: Point) -> bool;
}

impl ContainsInclusive for Rect {
    fn contains_inclusive(&self, point: Point) -> bool {
        point.x >= self.x0 && point.x <= self.x1 && point.y >= self.y0 && point.y <= self.y1
    }
}

impl CanvasItem for Stroke {
    fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.distance_within(point, tolerance).is_some()
    }

    /// Quadratic curve through the midpoints of consecutive samples, which
    /// rounds off the corners of the raw polyline.
    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let points = &self.points;
        let n = points.len();
        if n < 2 {
            return path;
        }

        path.move_to(points[0]);
        for i in 1..n.saturating_sub(2) {
            let mid = points[i].midpoint(points[i + 1]);
            path.quad_to(points[i], mid);
        }
        path.quad_to(points[n - 2], points[n - 1]);

        path
    }
}
