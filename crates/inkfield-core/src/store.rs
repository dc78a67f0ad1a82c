//! Ordered collections of shapes and strokes.
//!
//! Storage order doubles as z-order: later entries are drawn on top.

use crate::shapes::{Shape, ShapeId, Stroke};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Ordered collection of placed shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of all others.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Insert a shape at a z-position, clamped to the end.
    pub(crate) fn insert_shape(&mut self, index: usize, shape: Shape) {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
    }

    /// Move a shape's center. Unknown ids are ignored.
    pub fn update_shape_position(&mut self, id: ShapeId, new_center: Point) -> bool {
        match self.get_mut(id) {
            Some(shape) => {
                shape.center = new_center;
                true
            }
            None => false,
        }
    }

    /// Remove a shape, returning it with its former z-position.
    pub fn delete_shape(&mut self, id: ShapeId) -> Option<(usize, Shape)> {
        let index = self.position(id)?;
        Some((index, self.shapes.remove(index)))
    }

    /// Topmost shape containing `point`.
    pub fn find_at(&self, point: Point) -> Option<&Shape> {
        self.shapes.iter().rev().find(|shape| shape.contains(point))
    }

    /// Get a shape by id.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id() == id)
    }

    /// Z-position of a shape.
    pub fn position(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id() == id)
    }

    /// Shapes back to front.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Shapes as a slice, back to front.
    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Ordered collection of finished strokes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
}

impl StrokeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished stroke.
    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Insert a stroke at a position, clamped to the end.
    pub(crate) fn insert_stroke(&mut self, index: usize, stroke: Stroke) {
        let index = index.min(self.strokes.len());
        self.strokes.insert(index, stroke);
    }

    /// Remove the stroke at `index`, if any.
    pub fn remove_stroke_at(&mut self, index: usize) -> Option<Stroke> {
        (index < self.strokes.len()).then(|| self.strokes.remove(index))
    }

    /// Remove the most recently added stroke.
    pub(crate) fn pop_stroke(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    /// Index of the earliest stroke passing within `threshold` of `point`.
    pub fn find_at(&self, point: Point, threshold: f64) -> Option<usize> {
        self.strokes
            .iter()
            .position(|stroke| stroke.distance_within(point, threshold).is_some())
    }

    pub fn get(&self, index: usize) -> Option<&Stroke> {
        self.strokes.get(index)
    }

    /// Strokes in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter()
    }

    pub fn as_slice(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
