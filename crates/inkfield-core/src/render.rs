//! Backend-neutral render pass.
//!
//! [`build`] reads the engine and produces a [`RenderList`]: world-space draw
//! commands plus the view transform to apply to them. Any 2D backend can
//! consume the list; nothing here mutates engine state.

use crate::engine::InteractionEngine;
use crate::shapes::{CanvasItem, Shape, ShapeKind, Stroke};
use kurbo::{Affine, BezPath, Line, Rect};
use peniko::Color;

/// Grid line width in screen pixels.
const GRID_WIDTH: f64 = 1.0;
/// Axis line width in screen pixels.
const AXIS_WIDTH: f64 = 2.0;
/// Selection and preview outline width in screen pixels.
const OUTLINE_WIDTH: f64 = 2.0;

/// Colors used by the render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    pub background: Color,
    pub grid: Color,
    pub axis: Color,
    pub outline: Color,
    pub square_fill: Color,
    pub circle_fill: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::light()
    }
}

impl RenderStyle {
    pub fn light() -> Self {
        Self {
            background: Color::from_rgba8(255, 255, 255, 255),
            grid: Color::from_rgba8(221, 221, 221, 255),
            axis: Color::from_rgba8(170, 170, 170, 255),
            outline: Color::from_rgba8(0, 0, 0, 255),
            square_fill: Color::from_rgba8(76, 0, 255, 128),
            circle_fill: Color::from_rgba8(208, 255, 0, 64),
        }
    }

    fn fill_for(&self, kind: ShapeKind) -> Color {
        match kind {
            ShapeKind::Square => self.square_fill,
            ShapeKind::Circle => self.circle_fill,
        }
    }
}

/// A single drawing operation in world coordinates.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Grid or axis line.
    Line { line: Line, width: f64, color: Color },
    /// Filled closed path.
    Fill { path: BezPath, color: Color },
    /// Stroked path.
    Stroke {
        path: BezPath,
        width: f64,
        color: Color,
    },
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone)]
pub struct RenderList {
    /// World-to-screen transform.
    pub transform: Affine,
    pub background: Color,
    /// Commands in painting order.
    pub commands: Vec<DrawCommand>,
}

impl RenderList {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Build a frame with the default style.
pub fn build(engine: &InteractionEngine) -> RenderList {
    build_with_style(engine, &RenderStyle::default())
}

/// Build a frame: grid, shapes, strokes, active stroke, provisional shape.
pub fn build_with_style(engine: &InteractionEngine, style: &RenderStyle) -> RenderList {
    let viewport = engine.viewport();
    let scale = viewport.scale;
    let mut commands = Vec::new();

    push_grid(
        &mut commands,
        viewport.visible_world_rect(),
        engine.config().grid_size,
        scale,
        style,
    );

    let selected = engine.selected_shape().map(Shape::id);
    for shape in engine.shapes().iter() {
        commands.push(DrawCommand::Fill {
            path: shape.to_path(),
            color: style.fill_for(shape.kind),
        });
        if selected == Some(shape.id()) {
            commands.push(DrawCommand::Stroke {
                path: shape.to_path(),
                width: OUTLINE_WIDTH / scale,
                color: style.outline,
            });
        }
    }

    for stroke in engine.strokes().iter().chain(engine.active_stroke()) {
        push_stroke(&mut commands, stroke);
    }

    if let Some(draft) = engine.provisional_shape() {
        commands.push(DrawCommand::Stroke {
            path: draft.to_path(),
            width: OUTLINE_WIDTH / scale,
            color: style.outline,
        });
    }

    RenderList {
        transform: viewport.transform(),
        background: style.background,
        commands,
    }
}

fn push_stroke(commands: &mut Vec<DrawCommand>, stroke: &Stroke) {
    if stroke.len() < 2 {
        return;
    }
    commands.push(DrawCommand::Stroke {
        path: stroke.to_path(),
        width: stroke.width,
        color: stroke.color.into(),
    });
}

/// Grid lines over `visible`, extended by one cell on each side.
fn push_grid(
    commands: &mut Vec<DrawCommand>,
    visible: Rect,
    grid_size: f64,
    scale: f64,
    style: &RenderStyle,
) {
    if grid_size.is_nan() || grid_size <= 0.0 {
        return;
    }

    let start_x = (visible.x0 / grid_size).floor() * grid_size - grid_size;
    let start_y = (visible.y0 / grid_size).floor() * grid_size - grid_size;
    let end_x = (visible.x1 / grid_size).ceil() * grid_size + grid_size;
    let end_y = (visible.y1 / grid_size).ceil() * grid_size + grid_size;

    let line_style = |at: f64| {
        if at == 0.0 {
            (AXIS_WIDTH / scale, style.axis)
        } else {
            (GRID_WIDTH / scale, style.grid)
        }
    };

    // Vertical lines
    let mut i = 0.0;
    while start_x + i * grid_size <= end_x {
        let x = start_x + i * grid_size;
        let (width, color) = line_style(x);
        commands.push(DrawCommand::Line {
            line: Line::new((x, start_y), (x, end_y)),
            width,
            color,
        });
        i += 1.0;
    }

    // Horizontal lines
    let mut j = 0.0;
    while start_y + j * grid_size <= end_y {
        let y = start_y + j * grid_size;
        let (width, color) = line_style(y);
        commands.push(DrawCommand::Line {
            line: Line::new((start_x, y), (end_x, y)),
            width,
            color,
        });
        j += 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Modifiers, PointerButton};
    use crate::shapes::SerializableColor;
    use crate::tools::ToolKind;
    use kurbo::Point;

    fn non_grid(list: &RenderList) -> Vec<&DrawCommand> {
        list.commands
            .iter()
            .filter(|c| !matches!(c, DrawCommand::Line { .. }))
            .collect()
    }

    fn lines(list: &RenderList) -> impl Iterator<Item = (Line, f64)> + '_ {
        list.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { line, width, .. } => Some((*line, *width)),
            _ => None,
        })
    }

    #[test]
    fn test_empty_canvas_has_only_grid() {
        let engine = InteractionEngine::new();
        let list = build(&engine);

        assert!(!list.is_empty());
        assert!(non_grid(&list).is_empty());
        assert_eq!(list.transform, Affine::IDENTITY);
    }

    #[test]
    fn test_grid_covers_view_with_margin() {
        let engine = InteractionEngine::new();
        let list = build(&engine);

        // 800x600 at scale 1: x from -50 to 850, so 19 vertical lines.
        let vertical: Vec<_> = lines(&list).filter(|(l, _)| l.p0.x == l.p1.x).collect();
        assert_eq!(vertical.len(), 19);
        assert!((vertical[0].0.p0.x + 50.0).abs() < 1e-9);

        let axes: Vec<_> = lines(&list).filter(|(_, w)| (*w - 2.0).abs() < 1e-9).collect();
        assert_eq!(axes.len(), 2);
    }

    #[test]
    fn test_widths_follow_zoom() {
        let mut engine = InteractionEngine::new();
        engine.on_wheel(Point::ZERO, -1.0);
        let list = build(&engine);

        let scale = engine.viewport().scale;
        assert!(lines(&list).all(|(_, w)| {
            (w - GRID_WIDTH / scale).abs() < 1e-9 || (w - AXIS_WIDTH / scale).abs() < 1e-9
        }));
    }

    #[test]
    fn test_shapes_strokes_and_selection() {
        let mut engine = InteractionEngine::new();
        engine.place_shape(ShapeKind::Circle);
        engine.on_pointer_down(Point::new(10.0, 10.0), PointerButton::Left, Modifiers::NONE);
        engine.on_pointer_move(Point::new(50.0, 50.0));
        engine.on_pointer_up(Point::new(50.0, 50.0), PointerButton::Left);

        engine.set_active_tool(Some(ToolKind::Pencil));
        engine.set_stroke_color(SerializableColor::new(255, 0, 0, 255));
        engine.on_pointer_down(Point::new(100.0, 100.0), PointerButton::Left, Modifiers::NONE);
        engine.on_pointer_move(Point::new(200.0, 100.0));
        engine.on_pointer_move(Point::new(300.0, 100.0));

        let list = build(&engine);
        let drawn = non_grid(&list);
        // Fill, selection outline, active stroke.
        assert_eq!(drawn.len(), 3);
        match drawn[0] {
            DrawCommand::Fill { color, .. } => {
                assert_eq!(
                    SerializableColor::from(*color),
                    SerializableColor::new(208, 255, 0, 64)
                );
            }
            other => panic!("expected fill, got {other:?}"),
        }
        match drawn[2] {
            DrawCommand::Stroke { color, width, .. } => {
                assert_eq!(
                    SerializableColor::from(*color),
                    SerializableColor::new(255, 0, 0, 255)
                );
                assert!((width - 2.0).abs() < f64::EPSILON);
            }
            other => panic!("expected stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_single_point_stroke_renders_nothing() {
        let mut engine = InteractionEngine::new();
        engine.set_active_tool(Some(ToolKind::Pencil));
        engine.on_pointer_down(Point::new(5.0, 5.0), PointerButton::Left, Modifiers::NONE);
        engine.on_pointer_up(Point::new(5.0, 5.0), PointerButton::Left);

        assert_eq!(engine.strokes().len(), 1);
        assert!(non_grid(&build(&engine)).is_empty());
    }

    #[test]
    fn test_provisional_shape_outline() {
        let mut engine = InteractionEngine::new();
        engine.place_shape(ShapeKind::Square);
        engine.on_pointer_down(Point::new(0.0, 0.0), PointerButton::Left, Modifiers::NONE);
        engine.on_pointer_move(Point::new(20.0, 20.0));

        let list = build(&engine);
        let drawn = non_grid(&list);
        assert_eq!(drawn.len(), 1);
        assert!(matches!(drawn[0], DrawCommand::Stroke { .. }));
    }

    #[test]
    fn test_custom_style_colors() {
        let mut engine = InteractionEngine::new();
        engine.place_shape(ShapeKind::Square);
        engine.on_pointer_down(Point::new(0.0, 0.0), PointerButton::Left, Modifiers::NONE);
        engine.on_pointer_move(Point::new(20.0, 20.0));
        engine.on_pointer_up(Point::new(20.0, 20.0), PointerButton::Left);

        let style = RenderStyle {
            background: Color::from_rgba8(30, 30, 30, 255),
            square_fill: Color::from_rgba8(1, 2, 3, 255),
            ..RenderStyle::default()
        };
        let list = build_with_style(&engine, &style);

        assert_eq!(
            SerializableColor::from(list.background),
            SerializableColor::new(30, 30, 30, 255)
        );
        let fill = list.commands.iter().find_map(|c| match c {
            DrawCommand::Fill { color, .. } => Some(SerializableColor::from(*color)),
            _ => None,
        });
        assert_eq!(fill, Some(SerializableColor::new(1, 2, 3, 255)));
    }

    #[test]
    fn test_degenerate_grid_size_draws_no_grid() {
        let mut commands = Vec::new();
        let visible = Rect::new(0.0, 0.0, 100.0, 100.0);
        push_grid(&mut commands, visible, 0.0, 1.0, &RenderStyle::default());
        push_grid(&mut commands, visible, -10.0, 1.0, &RenderStyle::default());
        assert!(commands.is_empty());
    }
}
