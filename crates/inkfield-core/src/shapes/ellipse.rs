//! Circle (axis-aligned ellipse inscribed in the box) geometry.

use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Shape as KurboShape, Vec2};

/// Normalized-ellipse containment, inclusive of the boundary.
///
/// A collapsed ellipse (zero radius on either axis) degrades to box
/// containment so it can still be hit and erased.
pub(super) fn contains(center: Point, half: Vec2, point: Point) -> bool {
    if half.x <= 0.0 || half.y <= 0.0 {
        return super::rectangle::contains(center, half, point);
    }
    let dx = (point.x - center.x) / half.x;
    let dy = (point.y - center.y) / half.y;
    dx * dx + dy * dy <= 1.0
}

pub(super) fn path(center: Point, half: Vec2) -> BezPath {
    KurboEllipse::new(center, (half.x, half.y), 0.0).to_path(0.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_inside() {
        assert!(contains(Point::new(5.0, 5.0), Vec2::new(3.0, 2.0), Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_collapsed_ellipse() {
        let center = Point::new(1.0, 1.0);
        assert!(contains(center, Vec2::new(0.0, 4.0), Point::new(1.0, 3.0)));
        assert!(!contains(center, Vec2::new(0.0, 4.0), Point::new(1.5, 1.0)));
    }
}
