//! Inkfield Core Library
//!
//! Platform-agnostic interaction engine for the Inkfield infinite canvas:
//! viewport math, shapes and strokes, hit-testing, stroke smoothing and
//! undo/redo history.

pub mod brush;
pub mod canvas;
pub mod config;
pub mod engine;
pub mod history;
pub mod input;
pub mod render;
pub mod shapes;
pub mod store;
pub mod tools;
pub mod viewport;

pub use brush::{BrushUpdate, SmoothingBrush};
pub use canvas::CanvasDocument;
pub use config::{ConfigError, ConfigResult, EngineConfig};
pub use engine::InteractionEngine;
pub use history::{Deleted, HistoryEntry, HistoryLog};
pub use input::{Modifiers, PointerButton, PointerEvent};
pub use render::{DrawCommand, RenderList, RenderStyle};
pub use shapes::{CanvasItem, SerializableColor, Shape, ShapeId, ShapeKind, Stroke, StrokeWidth};
pub use store::{ShapeStore, StrokeStore};
pub use tools::{CursorIcon, ToolController, ToolKind};
pub use viewport::Viewport;
