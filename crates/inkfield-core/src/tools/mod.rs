//! Tool selection state machine.
//!
//! The active tool and the pending shape kind are mutually exclusive mode
//! setters driven by the UI; the controller never transitions on its own.

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Select,
    Pencil,
    Eraser,
    Pan,
    Zoom,
}

/// Pointer cursor hint for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorIcon {
    #[default]
    Default,
    Crosshair,
    ZoomIn,
    Grab,
    Grabbing,
    NotAllowed,
}

/// Tracks the active tool and the shape kind waiting to be placed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolController {
    active_tool: Option<ToolKind>,
    pending_shape: Option<ShapeKind>,
}

impl ToolController {
    /// Create a controller with no tool and nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a tool, or `None` to deactivate.
    ///
    /// Choosing the active tool again deactivates it. Any pending shape
    /// kind is cleared.
    pub fn set_active_tool(&mut self, tool: Option<ToolKind>) {
        self.active_tool = match tool {
            Some(tool) if self.active_tool == Some(tool) => None,
            other => other,
        };
        self.pending_shape = None;
    }

    /// Arm placement of a shape kind; clears the active tool.
    pub fn place_shape(&mut self, kind: ShapeKind) {
        self.pending_shape = Some(kind);
        self.active_tool = None;
    }

    /// Called once a pending shape has been committed.
    pub(crate) fn shape_placed(&mut self) {
        self.pending_shape = None;
    }

    pub fn active_tool(&self) -> Option<ToolKind> {
        self.active_tool
    }

    pub fn pending_shape(&self) -> Option<ShapeKind> {
        self.pending_shape
    }

    /// Whether `tool` is the active tool (for menu highlighting).
    pub fn is_active(&self, tool: ToolKind) -> bool {
        self.active_tool == Some(tool)
    }

    /// Cursor for the current mode; `panning` overrides everything.
    pub fn cursor(&self, panning: bool) -> CursorIcon {
        if panning {
            return CursorIcon::Grabbing;
        }
        if self.pending_shape.is_some() {
            return CursorIcon::Crosshair;
        }
        match self.active_tool {
            Some(ToolKind::Pencil) => CursorIcon::Crosshair,
            Some(ToolKind::Zoom) => CursorIcon::ZoomIn,
            Some(ToolKind::Pan) => CursorIcon::Grab,
            Some(ToolKind::Eraser) => CursorIcon::NotAllowed,
            Some(ToolKind::Select) | None => CursorIcon::Default,
        }
    }
}
