//! Canvas document: the shapes and strokes of one session.

use crate::store::{ShapeStore, StrokeStore};
use serde::{Deserialize, Serialize};

/// All committed content of a canvas.
///
/// Fields are only mutable inside the crate so that every change goes
/// through a gesture handler or a history replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    pub(crate) shapes: ShapeStore,
    pub(crate) strokes: StrokeStore,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }
}
