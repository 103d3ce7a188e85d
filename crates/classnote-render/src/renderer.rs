//! Full-redraw scene renderer.
//!
//! Every frame walks the whole object sequence in z-order, then the
//! in-progress session preview, then the selection overlay. No dirty
//! rects; the board's dirty flag only gates whether a frame is drawn at
//! all. All emission is in screen coordinates.

use crate::surface::Surface;
use classnote_core::geometry::{LINE_HEIGHT_FACTOR, world_to_screen};
use classnote_core::{
    Board, DrawObject, KeyValueStore, Session, ShapeKind, StrokeMode, TextMeasurer,
};
use kurbo::{Point, Rect, Vec2};
use peniko::Color;

/// Board background.
pub const BACKGROUND: Color = Color::WHITE;
/// Selection chrome color.
pub const SELECTION_COLOR: Color = Color::from_rgb8(47, 111, 237);
/// Side length of a selection handle square, in screen units.
const HANDLE_SIZE: f64 = 8.0;
/// Gap between the selection box and the rotation dot.
const ROTATE_HANDLE_OFFSET: f64 = 24.0;
/// Breathing room between an object's bounds and its selection box.
const SELECTION_MARGIN: f64 = 4.0;
/// Shape previews are drawn translucent until committed.
const PREVIEW_ALPHA: f32 = 0.45;

struct SurfaceMeasurer<'a>(&'a dyn Surface);

impl TextMeasurer for SurfaceMeasurer<'_> {
    fn measure_line(&self, line: &str, font_size: f64) -> Option<f64> {
        self.0.measure_line(line, font_size)
    }
}

pub struct Renderer;

impl Renderer {
    /// Redraw the whole board onto `surface`.
    pub fn render<S: KeyValueStore>(board: &Board<S>, surface: &mut dyn Surface) {
        let pan = board.scene().view.pan;
        surface.clear(BACKGROUND);
        for object in &board.scene().objects {
            Self::draw_object(object, pan, surface);
        }
        Self::draw_session_preview(board, pan, surface);
        Self::draw_selection(board, pan, surface);
    }

    fn draw_object(object: &DrawObject, pan: Vec2, surface: &mut dyn Surface) {
        match object {
            DrawObject::Path(path) => {
                // Erase strokes paint opaque background color over whatever
                // sits below them.
                let color = match path.mode {
                    StrokeMode::Erase => BACKGROUND,
                    StrokeMode::Draw => path.color.into(),
                };
                Self::draw_polyline(&path.points, pan, color, path.width, surface);
            }
            DrawObject::Text(label) => {
                let origin = world_to_screen(label.anchor, pan);
                for (index, line) in label.content.split('\n').enumerate() {
                    let line_origin = Point::new(
                        origin.x,
                        origin.y + index as f64 * label.font_size * LINE_HEIGHT_FACTOR,
                    );
                    surface.draw_text(line_origin, line, label.font_size, label.color.into());
                }
            }
            DrawObject::Shape(shape) => {
                let rect = Self::screen_rect(shape.origin, shape.width, shape.height, pan);
                Self::draw_shape_outline(
                    rect,
                    shape.shape,
                    shape.color.into(),
                    shape.stroke_width,
                    false,
                    surface,
                );
            }
        }
    }

    fn draw_session_preview<S: KeyValueStore>(
        board: &Board<S>,
        pan: Vec2,
        surface: &mut dyn Surface,
    ) {
        let view = &board.scene().view;
        match board.session() {
            Session::Drawing(draw) => {
                let color = if draw.erase {
                    BACKGROUND
                } else {
                    view.color.into()
                };
                Self::draw_polyline(&draw.points, pan, color, view.stroke_width, surface);
            }
            Session::ShapeDrawing(shape) => {
                let world = shape.rect();
                let rect = Self::screen_rect(
                    Point::new(world.x0, world.y0),
                    world.width(),
                    world.height(),
                    pan,
                );
                let color = Color::from(view.color).with_alpha(PREVIEW_ALPHA);
                Self::draw_shape_outline(rect, shape.kind, color, view.stroke_width, true, surface);
            }
            _ => {}
        }
    }

    fn draw_selection<S: KeyValueStore>(board: &Board<S>, pan: Vec2, surface: &mut dyn Surface) {
        let Some(selected) = board.selection().and_then(|id| board.scene().get(id)) else {
            return;
        };
        if !selected.is_movable() {
            return;
        }
        let world = {
            let measurer = SurfaceMeasurer(&*surface);
            selected.bounds(Some(&measurer))
        };
        let origin = world_to_screen(Point::new(world.x0, world.y0), pan);
        let rect = Rect::new(
            origin.x - SELECTION_MARGIN,
            origin.y - SELECTION_MARGIN,
            origin.x + world.width() + SELECTION_MARGIN,
            origin.y + world.height() + SELECTION_MARGIN,
        );

        surface.stroke_rect(rect, SELECTION_COLOR, 1.0, true);
        for handle in Self::handle_points(rect) {
            let half = HANDLE_SIZE / 2.0;
            let square = Rect::new(
                handle.x - half,
                handle.y - half,
                handle.x + half,
                handle.y + half,
            );
            surface.fill_rect(square, Color::WHITE);
            surface.stroke_rect(square, SELECTION_COLOR, 1.0, false);
        }
        // Rotation affordance; decorative only, there is no rotate gesture.
        let rotate_center = Point::new(rect.center().x, rect.y0 - ROTATE_HANDLE_OFFSET);
        surface.fill_circle(rotate_center, HANDLE_SIZE / 2.0, SELECTION_COLOR);
    }

    /// Corner and edge-midpoint handle centers, clockwise from top-left.
    fn handle_points(rect: Rect) -> [Point; 8] {
        let cx = rect.center().x;
        let cy = rect.center().y;
        [
            Point::new(rect.x0, rect.y0),
            Point::new(cx, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, cy),
            Point::new(rect.x1, rect.y1),
            Point::new(cx, rect.y1),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x0, cy),
        ]
    }

    fn draw_polyline(
        points: &[Point],
        pan: Vec2,
        color: Color,
        width: f64,
        surface: &mut dyn Surface,
    ) {
        let screen: Vec<Point> = points.iter().map(|&p| world_to_screen(p, pan)).collect();
        match screen.as_slice() {
            [] => {}
            // A tap with no movement still leaves a visible dot.
            [single] => surface.fill_circle(*single, (width / 2.0).max(0.5), color),
            _ => surface.stroke_polyline(&screen, color, width),
        }
    }

    fn draw_shape_outline(
        rect: Rect,
        kind: ShapeKind,
        color: Color,
        width: f64,
        dashed: bool,
        surface: &mut dyn Surface,
    ) {
        match kind {
            ShapeKind::Rect => surface.stroke_rect(rect, color, width, dashed),
            ShapeKind::Circle => surface.stroke_ellipse(
                rect.center(),
                rect.width() / 2.0,
                rect.height() / 2.0,
                color,
                width,
                dashed,
            ),
        }
    }

    fn screen_rect(origin: Point, width: f64, height: f64, pan: Vec2) -> Rect {
        let top_left = world_to_screen(origin, pan);
        Rect::new(
            top_left.x,
            top_left.y,
            top_left.x + width,
            top_left.y + height,
        )
    }
}
