//! Coordinate transforms, distances, and hit-test primitives.
//!
//! Objects are stored in world coordinates; screen coordinates are world
//! coordinates offset by the current pan. There is no zoom, so the two
//! transforms are exact inverses of each other.

use kurbo::{Point, Rect, Vec2};

/// Minimum world distance between recorded freehand points while drawing.
pub const DRAW_SAMPLE_DISTANCE: f64 = 0.4;
/// Minimum world distance between kept points when compacting a finished stroke.
pub const COMPACT_DISTANCE: f64 = 0.2;
/// Cumulative drag displacement at which a drag commits a history entry.
pub const DRAG_COMMIT_DISTANCE: f64 = 0.6;
/// Minimum width/height for a shape session to produce an object.
pub const MIN_SHAPE_SIZE: f64 = 4.0;
/// Hit-test padding for selecting shapes and text, in world units.
pub const HIT_PADDING: f64 = 8.0;

/// Line height multiplier for text layout.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;
/// Per-character width estimate used when no measurement surface is available.
pub const FALLBACK_CHAR_WIDTH_FACTOR: f64 = 0.58;

/// Convert a world point to screen coordinates under the given pan offset.
pub fn world_to_screen(p: Point, pan: Vec2) -> Point {
    Point::new(p.x + pan.x, p.y + pan.y)
}

/// Convert a screen point to world coordinates under the given pan offset.
pub fn screen_to_world(p: Point, pan: Vec2) -> Point {
    Point::new(p.x - pan.x, p.y - pan.y)
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Clamp a value to `[min, max]`, substituting `fallback` for NaN input.
pub fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback.clamp(min, max)
    } else {
        value.clamp(min, max)
    }
}

/// Measures the rendered width of a single line of text.
///
/// Implemented by the drawing surface; when absent, bounds fall back to a
/// character-count estimate.
pub trait TextMeasurer {
    /// Width of `line` rendered at `font_size`, or None if unmeasurable.
    fn measure_line(&self, line: &str, font_size: f64) -> Option<f64>;
}

/// Width of one text line, measured or estimated.
pub fn line_width(line: &str, font_size: f64, measurer: Option<&dyn TextMeasurer>) -> f64 {
    measurer
        .and_then(|m| m.measure_line(line, font_size))
        .unwrap_or_else(|| line.chars().count() as f64 * font_size * FALLBACK_CHAR_WIDTH_FACTOR)
}

/// Multi-line text bounds anchored at `anchor` (top-left), inflated by `padding`.
pub fn text_block_bounds(
    anchor: Point,
    content: &str,
    font_size: f64,
    padding: f64,
    measurer: Option<&dyn TextMeasurer>,
) -> Rect {
    let mut width: f64 = 0.0;
    let mut line_count = 0usize;
    for line in content.split('\n') {
        width = width.max(line_width(line, font_size, measurer));
        line_count += 1;
    }
    let height = (line_count.max(1) as f64 * font_size * LINE_HEIGHT_FACTOR)
        .max(font_size * LINE_HEIGHT_FACTOR);
    Rect::new(anchor.x, anchor.y, anchor.x + width, anchor.y + height)
        .inflate(padding, padding)
}

/// Axis-aligned rect inflated by `padding` on all sides.
pub fn inflated_rect(origin: Point, width: f64, height: f64, padding: f64) -> Rect {
    Rect::new(origin.x, origin.y, origin.x + width, origin.y + height).inflate(padding, padding)
}

/// Point-in-rectangle test.
pub fn point_in_rect(p: Point, rect: Rect) -> bool {
    rect.contains(p)
}

/// Point-in-ellipse test with independent radii and a padding allowance.
///
/// Uses the normalized-distance form: inside when
/// `(dx / (rx + pad))^2 + (dy / (ry + pad))^2 <= 1`.
pub fn point_in_ellipse(p: Point, center: Point, rx: f64, ry: f64, padding: f64) -> bool {
    let rx = rx + padding;
    let ry = ry + padding;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let nx = (p.x - center.x) / rx;
    let ny = (p.y - center.y) / ry;
    nx * nx + ny * ny <= 1.0
}
