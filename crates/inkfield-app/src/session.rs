//! Recorded host sessions.
//!
//! A session is a JSON array of host events, replayed in order against an
//! [`InteractionEngine`]:
//!
//! ```json
//! [
//!   { "type": "place_shape", "kind": "square" },
//!   { "type": "pointer_down", "x": 100, "y": 100 },
//!   { "type": "pointer_move", "x": 150, "y": 150 },
//!   { "type": "pointer_up", "x": 150, "y": 150 },
//!   { "type": "stroke_width", "width": "big" },
//!   { "type": "key", "key": "z", "ctrl": true }
//! ]
//! ```

use crate::shortcuts::{Command, ShortcutRegistry};
use inkfield_core::{
    InteractionEngine, Modifiers, PointerButton, PointerEvent, SerializableColor, ShapeKind,
    StrokeWidth, ToolKind,
};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Session loading errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

fn opaque() -> u8 {
    255
}

/// Pencil width: one of the named presets or an explicit value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidthSetting {
    Preset(StrokeWidth),
    Value(f64),
}

/// One recorded host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
        #[serde(default)]
        shift: bool,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    PointerLeave {
        x: f64,
        y: f64,
    },
    Wheel {
        x: f64,
        y: f64,
        delta_y: f64,
    },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
        #[serde(default)]
        meta: bool,
    },
    SetTool {
        #[serde(default)]
        tool: Option<ToolKind>,
    },
    PlaceShape {
        kind: ShapeKind,
    },
    Resize {
        width: f64,
        height: f64,
    },
    StrokeColor {
        r: u8,
        g: u8,
        b: u8,
        #[serde(default = "opaque")]
        a: u8,
    },
    StrokeWidth {
        width: WidthSetting,
    },
}

impl SessionEvent {
    /// Deliver the event to the engine.
    pub fn apply(&self, engine: &mut InteractionEngine) {
        match self {
            SessionEvent::PointerDown {
                x,
                y,
                button,
                shift,
            } => engine.handle_pointer_event(PointerEvent::Down {
                position: Point::new(*x, *y),
                button: *button,
                modifiers: Modifiers {
                    shift: *shift,
                    ..Modifiers::NONE
                },
            }),
            SessionEvent::PointerMove { x, y } => engine.handle_pointer_event(PointerEvent::Move {
                position: Point::new(*x, *y),
            }),
            SessionEvent::PointerUp { x, y, button } => {
                engine.handle_pointer_event(PointerEvent::Up {
                    position: Point::new(*x, *y),
                    button: *button,
                })
            }
            SessionEvent::PointerLeave { x, y } => {
                engine.handle_pointer_event(PointerEvent::Leave {
                    position: Point::new(*x, *y),
                })
            }
            SessionEvent::Wheel { x, y, delta_y } => {
                engine.handle_pointer_event(PointerEvent::Wheel {
                    position: Point::new(*x, *y),
                    delta_y: *delta_y,
                })
            }
            SessionEvent::Key {
                key,
                ctrl,
                shift,
                alt,
                meta,
            } => {
                let modifiers = Modifiers {
                    shift: *shift,
                    ctrl: *ctrl,
                    alt: *alt,
                    meta: *meta,
                };
                match ShortcutRegistry::lookup(key, modifiers) {
                    Some(Command::Undo) => {
                        if engine.undo() {
                            log::info!("Undo performed");
                        } else {
                            log::info!("Nothing to undo");
                        }
                    }
                    Some(Command::Redo) => {
                        if engine.redo() {
                            log::info!("Redo performed");
                        } else {
                            log::info!("Nothing to redo");
                        }
                    }
                    None => log::debug!("Unbound key: {key}"),
                }
            }
            SessionEvent::SetTool { tool } => engine.set_active_tool(*tool),
            SessionEvent::PlaceShape { kind } => engine.place_shape(*kind),
            SessionEvent::Resize { width, height } => engine.set_viewport_size(*width, *height),
            SessionEvent::StrokeColor { r, g, b, a } => {
                engine.set_stroke_color(SerializableColor::new(*r, *g, *b, *a))
            }
            SessionEvent::StrokeWidth { width } => match width {
                WidthSetting::Preset(preset) => engine.set_stroke_width_preset(*preset),
                WidthSetting::Value(value) => engine.set_stroke_width(*value),
            },
        }
    }
}

/// An ordered list of recorded events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    pub events: Vec<SessionEvent>,
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Replay every event in order.
    pub fn replay(&self, engine: &mut InteractionEngine) -> SessionSummary {
        for (i, event) in self.events.iter().enumerate() {
            log::trace!("event {i}: {event:?}");
            event.apply(engine);
        }
        log::info!("Replayed {} events", self.events.len());
        SessionSummary::of(engine)
    }
}

/// Engine state after a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub shapes: usize,
    pub strokes: usize,
    pub history_len: usize,
    pub history_cursor: Option<usize>,
    pub scale: f64,
    pub pan: Vec2,
}

impl SessionSummary {
    pub fn of(engine: &InteractionEngine) -> Self {
        Self {
            shapes: engine.shapes().len(),
            strokes: engine.strokes().len(),
            history_len: engine.history().len(),
            history_cursor: engine.history().cursor(),
            scale: engine.viewport().scale,
            pan: engine.viewport().pan,
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "shapes:  {}", self.shapes)?;
        writeln!(f, "strokes: {}", self.strokes)?;
        match self.history_cursor {
            Some(cursor) => writeln!(
                f,
                "history: {} entries, cursor {}",
                self.history_len, cursor
            )?,
            None => writeln!(f, "history: {} entries, cursor none", self.history_len)?,
        }
        write!(
            f,
            "view:    scale {:.3}, pan ({:.1}, {:.1})",
            self.scale, self.pan.x, self.pan.y
        )
    }
}
