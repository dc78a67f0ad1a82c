//! Square (axis-aligned box) geometry.

use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};

/// Box containment with inclusive edges.
pub(super) fn contains(center: Point, half: Vec2, point: Point) -> bool {
    let left = center.x - half.x;
    let right = center.x + half.x;
    let top = center.y - half.y;
    let bottom = center.y + half.y;

    point.x >= left && point.x <= right && point.y >= top && point.y <= bottom
}

pub(super) fn path(center: Point, half: Vec2) -> BezPath {
    Rect::from_center_size(center, (half.x * 2.0, half.y * 2.0)).to_path(0.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_contains_only_center() {
        let center = Point::new(3.0, 4.0);
        assert!(contains(center, Vec2::ZERO, center));
        assert!(!contains(center, Vec2::ZERO, Point::new(3.0, 4.5)));
    }

    #[test]
    fn test_path_is_closed_box() {
        let path = path(Point::new(10.0, 10.0), Vec2::new(5.0, 2.0));
        let bbox = path.bounding_box();
        assert!((bbox.x0 - 5.0).abs() < 1e-10);
        assert!((bbox.y0 - 8.0).abs() < 1e-10);
        assert!((bbox.x1 - 15.0).abs() < 1e-10);
        assert!((bbox.y1 - 12.0).abs() < 1e-10);
    }
}
