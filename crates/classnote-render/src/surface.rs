//! The 2D drawing surface boundary.
//!
//! The renderer emits primitives in screen coordinates through this trait;
//! hosts back it with whatever 2D context they have. `RecordingSurface`
//! captures the emitted primitives for tests and headless use.

use kurbo::{Point, Rect, Size};
use peniko::Color;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The backing surface has no raster export path.
    #[error("surface does not support raster export")]
    ExportUnsupported,
    #[error("surface error: {0}")]
    Backend(String),
}

/// Canvas-like drawing surface in screen coordinates.
pub trait Surface {
    fn size(&self) -> Size;
    fn clear(&mut self, color: Color);
    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f64);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64, dashed: bool);
    fn stroke_ellipse(
        &mut self,
        center: Point,
        rx: f64,
        ry: f64,
        color: Color,
        width: f64,
        dashed: bool,
    );
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
    /// Draw a single line of text with its top-left at `origin`.
    fn draw_text(&mut self, origin: Point, line: &str, font_size: f64, color: Color);
    /// Measured advance width of one line, if the backend can measure.
    fn measure_line(&self, line: &str, font_size: f64) -> Option<f64>;
    /// Encode the current contents as PNG. Hosts may decline.
    fn export_png(&mut self) -> Result<Vec<u8>, SurfaceError>;
}

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(Color),
    Polyline {
        points: Vec<Point>,
        color: Color,
        width: f64,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f64,
        dashed: bool,
    },
    StrokeEllipse {
        center: Point,
        rx: f64,
        ry: f64,
        color: Color,
        width: f64,
        dashed: bool,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Color,
    },
    Text {
        origin: Point,
        line: String,
        font_size: f64,
        color: Color,
    },
}

/// Surface that records primitives into a display list.
#[derive(Debug)]
pub struct RecordingSurface {
    size: Size,
    pub commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn count<F: Fn(&DrawCmd) -> bool>(&self, pred: F) -> usize {
        self.commands.iter().filter(|cmd| pred(cmd)).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCmd::Clear(color));
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f64) {
        self.commands.push(DrawCmd::Polyline {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64, dashed: bool) {
        self.commands.push(DrawCmd::StrokeRect {
            rect,
            color,
            width,
            dashed,
        });
    }

    fn stroke_ellipse(
        &mut self,
        center: Point,
        rx: f64,
        ry: f64,
        color: Color,
        width: f64,
        dashed: bool,
    ) {
        self.commands.push(DrawCmd::StrokeEllipse {
            center,
            rx,
            ry,
            color,
            width,
            dashed,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCmd::FillRect { rect, color });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, origin: Point, line: &str, font_size: f64, color: Color) {
        self.commands.push(DrawCmd::Text {
            origin,
            line: line.to_string(),
            font_size,
            color,
        });
    }

    fn measure_line(&self, _line: &str, _font_size: f64) -> Option<f64> {
        // No font stack; callers fall back to the width heuristic.
        None
    }

    fn export_png(&mut self) -> Result<Vec<u8>, SurfaceError> {
        Err(SurfaceError::ExportUnsupported)
    }
}
