//! Lazy-brush smoothing for freehand strokes.
//!
//! The brush trails the raw pointer on an invisible string of length
//! `radius`. While the pointer stays within the radius the brush does not
//! move; once the string is taut the brush is pulled toward the pointer by
//! the slack, damped by an eased friction term. The result lags behind fast
//! motion and catches up asymptotically, which gives strokes a hand-drawn
//! feel instead of faithfully reproducing input jitter.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default lazy radius in world units.
pub const DEFAULT_RADIUS: f64 = 3.0;
/// Default friction applied while a stroke is being extended.
pub const DEFAULT_FRICTION: f64 = 0.30;

/// Easing curve applied to the friction complement.
fn smooth_ease(x: f64) -> f64 {
    1.0 - (1.0 - x * x).sqrt()
}

/// Options for a single brush update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrushUpdate {
    /// Move pointer and brush together (stroke start).
    pub both: bool,
    /// Friction in `(0, 1)`; values outside that range disable damping.
    pub friction: Option<f64>,
}

impl BrushUpdate {
    /// Snap both tracked points to the sample.
    pub fn snap() -> Self {
        Self {
            both: true,
            friction: None,
        }
    }

    /// Regular smoothed update with the given friction.
    pub fn with_friction(friction: f64) -> Self {
        Self {
            both: false,
            friction: Some(friction),
        }
    }
}

/// Stateful smoothing filter turning raw pointer samples into brush points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingBrush {
    /// Lazy radius; the brush only moves once the pointer is farther away.
    pub radius: f64,
    pointer: Point,
    brush: Point,
    angle: f64,
}

impl Default for SmoothingBrush {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS)
    }
}

impl SmoothingBrush {
    /// Create a brush with the given lazy radius, starting at the origin.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            pointer: Point::ZERO,
            brush: Point::ZERO,
            angle: 0.0,
        }
    }

    /// Feed a raw pointer sample.
    ///
    /// Returns `true` when the brush position changed, in which case the
    /// caller should append [`brush`](Self::brush) to the active stroke.
    pub fn update(&mut self, sample: Point, options: BrushUpdate) -> bool {
        if self.pointer == sample && !options.both && options.friction.is_none() {
            return false;
        }

        self.pointer = sample;

        if options.both {
            self.brush = sample;
            return true;
        }

        let dx = self.pointer.x - self.brush.x;
        let dy = self.pointer.y - self.brush.y;
        let distance = dx.hypot(dy);
        self.angle = dy.atan2(dx);

        // Slack below a tenth of a unit counts as "inside" the radius.
        let slack = ((distance - self.radius) * 10.0).round() / 10.0;
        if slack <= 0.0 {
            return false;
        }

        let friction = options.friction.filter(|f| *f > 0.0 && *f < 1.0);
        self.move_brush(distance - self.radius, friction);
        true
    }

    fn move_brush(&mut self, step: f64, friction: Option<f64>) {
        let step = match friction {
            Some(f) => step * smooth_ease(1.0 - f),
            None => step,
        };
        self.brush.x += self.angle.cos() * step;
        self.brush.y += self.angle.sin() * step;
    }

    /// Current (smoothed) brush position.
    pub fn brush(&self) -> Point {
        self.brush
    }

    /// Last raw pointer sample.
    pub fn pointer(&self) -> Point {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn between(value: f64, a: f64, b: f64) -> bool {
        value > a.min(b) && value < a.max(b)
    }

    #[test]
    fn test_snap_moves_both_points() {
        let mut brush = SmoothingBrush::default();
        assert!(brush.update(Point::new(10.0, 20.0), BrushUpdate::snap()));
        assert_eq!(brush.brush(), Point::new(10.0, 20.0));
        assert_eq!(brush.pointer(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_large_jump_lags_behind() {
        let mut brush = SmoothingBrush::default();
        brush.update(Point::new(0.0, 0.0), BrushUpdate::snap());

        let moved = brush.update(
            Point::new(100.0, 0.0),
            BrushUpdate::with_friction(DEFAULT_FRICTION),
        );
        assert!(moved);

        let pos = brush.brush();
        assert!(between(pos.x, 0.0, 100.0));
        assert!(pos.y.abs() < 1e-9);

        // (100 - 3) * (1 - sqrt(1 - 0.7^2))
        let expected = 97.0 * smooth_ease(0.7);
        assert!((pos.x - expected).abs() < 1e-9);
    }

    #[test]
    fn test_diagonal_jump_follows_angle() {
        let mut brush = SmoothingBrush::default();
        brush.update(Point::new(5.0, 5.0), BrushUpdate::snap());
        brush.update(
            Point::new(45.0, 35.0),
            BrushUpdate::with_friction(DEFAULT_FRICTION),
        );

        let pos = brush.brush();
        assert!(between(pos.x, 5.0, 45.0));
        assert!(between(pos.y, 5.0, 35.0));
        // Stays on the segment from start to pointer.
        let slope = (pos.y - 5.0) / (pos.x - 5.0);
        assert!((slope - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_inside_radius_does_not_move() {
        let mut brush = SmoothingBrush::default();
        brush.update(Point::new(0.0, 0.0), BrushUpdate::snap());

        let moved = brush.update(
            Point::new(2.0, 1.0),
            BrushUpdate::with_friction(DEFAULT_FRICTION),
        );
        assert!(!moved);
        assert_eq!(brush.brush(), Point::ZERO);
    }

    #[test]
    fn test_repeated_samples_converge() {
        let mut brush = SmoothingBrush::default();
        brush.update(Point::ZERO, BrushUpdate::snap());

        let target = Point::new(60.0, 0.0);
        let mut last = 0.0;
        for _ in 0..50 {
            brush.update(target, BrushUpdate::with_friction(DEFAULT_FRICTION));
            let x = brush.brush().x;
            assert!(x >= last);
            last = x;
        }
        // Catches up to within the radius (plus the rounding band).
        assert!(target.x - last <= DEFAULT_RADIUS + 0.05 + 1e-9);
    }

    #[test]
    fn test_without_friction_takes_full_slack() {
        let mut brush = SmoothingBrush::default();
        brush.update(Point::ZERO, BrushUpdate::snap());
        brush.update(Point::new(0.0, 10.0), BrushUpdate::default());
        assert!((brush.brush().y - 7.0).abs() < 1e-9);
    }
}
