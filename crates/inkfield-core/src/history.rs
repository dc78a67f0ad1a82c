//! Command-based undo/redo history.
//!
//! Each entry carries enough data to replay or reverse its mutation without
//! reading live state, since by undo time the affected object may have
//! moved or been removed. All per-kind replay logic lives in
//! [`HistoryEntry::apply_forward`] and [`HistoryEntry::apply_inverse`].

use crate::canvas::CanvasDocument;
use crate::shapes::{Shape, ShapeId, Stroke};
use kurbo::Point;
use log::debug;
use serde::{Deserialize, Serialize};

/// An object removed by the eraser, with its former position in its store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Deleted {
    Shape { shape: Shape, index: usize },
    Stroke { stroke: Stroke, index: usize },
}

/// One undoable mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryEntry {
    /// A shape was committed to the store.
    Add(Shape),
    /// A shape or stroke was erased.
    Delete(Deleted),
    /// A shape was dragged.
    Update {
        id: ShapeId,
        previous_center: Point,
        new_center: Point,
    },
    /// A stroke was drawn.
    Draw(Stroke),
}

impl HistoryEntry {
    /// Re-apply the mutation.
    pub fn apply_forward(&self, doc: &mut CanvasDocument) {
        match self {
            HistoryEntry::Add(shape) => doc.shapes.add_shape(shape.clone()),
            HistoryEntry::Delete(Deleted::Shape { shape, .. }) => {
                doc.shapes.delete_shape(shape.id());
            }
            HistoryEntry::Delete(Deleted::Stroke { index, .. }) => {
                doc.strokes.remove_stroke_at(*index);
            }
            HistoryEntry::Update { id, new_center, .. } => {
                doc.shapes.update_shape_position(*id, *new_center);
            }
            HistoryEntry::Draw(stroke) => doc.strokes.add_stroke(stroke.clone()),
        }
    }

    /// Reverse the mutation.
    pub fn apply_inverse(&self, doc: &mut CanvasDocument) {
        match self {
            HistoryEntry::Add(shape) => {
                doc.shapes.delete_shape(shape.id());
            }
            HistoryEntry::Delete(Deleted::Shape { shape, index }) => {
                doc.shapes.insert_shape(*index, shape.clone());
            }
            HistoryEntry::Delete(Deleted::Stroke { stroke, index }) => {
                doc.strokes.insert_stroke(*index, stroke.clone());
            }
            HistoryEntry::Update {
                id,
                previous_center,
                ..
            } => {
                doc.shapes.update_shape_position(*id, *previous_center);
            }
            HistoryEntry::Draw(_) => {
                doc.strokes.pop_stroke();
            }
        }
    }

    /// Short label for logging and UI.
    pub fn label(&self) -> &'static str {
        match self {
            HistoryEntry::Add(_) => "add",
            HistoryEntry::Delete(_) => "delete",
            HistoryEntry::Update { .. } => "update",
            HistoryEntry::Draw(_) => "draw",
        }
    }
}

/// Append-only command log with a movable cursor.
///
/// Entries before the cursor are applied; entries after it are redoable
/// until a new entry is recorded, which discards them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    /// Number of applied entries (cursor + 1).
    applied: usize,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mutation that has already been applied.
    pub fn record(&mut self, entry: HistoryEntry) {
        let discarded = self.entries.len() - self.applied;
        if discarded > 0 {
            debug!("history: discarding {discarded} redoable entries");
        }
        self.entries.truncate(self.applied);
        debug!("history: record {}", entry.label());
        self.entries.push(entry);
        self.applied = self.entries.len();
    }

    /// Reverse the entry under the cursor. Returns false if nothing to undo.
    pub fn undo(&mut self, doc: &mut CanvasDocument) -> bool {
        if self.applied == 0 {
            return false;
        }
        let entry = &self.entries[self.applied - 1];
        debug!("history: undo {}", entry.label());
        entry.apply_inverse(doc);
        self.applied -= 1;
        true
    }

    /// Re-apply the entry after the cursor. Returns false if nothing to redo.
    pub fn redo(&mut self, doc: &mut CanvasDocument) -> bool {
        let Some(entry) = self.entries.get(self.applied) else {
            return false;
        };
        debug!("history: redo {}", entry.label());
        entry.apply_forward(doc);
        self.applied += 1;
        true
    }

    /// Index of the last applied entry; `None` is "before the first entry".
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.entries.len()
    }

    /// All recorded entries, including the redoable tail.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
