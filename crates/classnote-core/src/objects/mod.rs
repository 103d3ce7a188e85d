//! Drawable object definitions for the note board.

mod path;
mod shape;
mod text;

pub use path::{PathStroke, StrokeMode};
pub use shape::{BoardShape, ShapeKind};
pub use text::{DEFAULT_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE, TextLabel};

use crate::geometry::TextMeasurer;
use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for drawable objects.
pub type ObjectId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Same color with the given alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Enum wrapper for all drawable object kinds.
///
/// Z-order is the position in the scene's object sequence; later objects
/// render on top. Only Text and Shape are movable — strokes are never
/// selected or dragged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawObject {
    Path(PathStroke),
    Text(TextLabel),
    Shape(BoardShape),
}

impl DrawObject {
    pub fn id(&self) -> ObjectId {
        match self {
            DrawObject::Path(p) => p.id,
            DrawObject::Text(t) => t.id,
            DrawObject::Shape(s) => s.id,
        }
    }

    /// Bounding box in world coordinates, without selection padding.
    pub fn bounds(&self, measurer: Option<&dyn TextMeasurer>) -> Rect {
        match self {
            DrawObject::Path(p) => p.bounds(),
            DrawObject::Text(t) => t.bounds(0.0, measurer),
            DrawObject::Shape(s) => s.bounds(0.0),
        }
    }

    /// Hit test at a world point, with the standard selection padding.
    pub fn hit_test(&self, point: Point, measurer: Option<&dyn TextMeasurer>) -> bool {
        match self {
            DrawObject::Path(p) => p.hit_test(point),
            DrawObject::Text(t) => t.hit_test(point, measurer),
            DrawObject::Shape(s) => s.hit_test(point),
        }
    }

    /// Anchor point of a movable object (text anchor or shape origin).
    pub fn anchor(&self) -> Option<Point> {
        match self {
            DrawObject::Path(_) => None,
            DrawObject::Text(t) => Some(t.anchor),
            DrawObject::Shape(s) => Some(s.origin),
        }
    }

    /// Set a movable object's anchor to an absolute position.
    pub fn set_anchor(&mut self, anchor: Point) {
        match self {
            DrawObject::Path(_) => {}
            DrawObject::Text(t) => t.anchor = anchor,
            DrawObject::Shape(s) => s.origin = anchor,
        }
    }

    /// Whether this object can be selected and dragged.
    pub fn is_movable(&self) -> bool {
        matches!(self, DrawObject::Text(_) | DrawObject::Shape(_))
    }

    /// Move a movable object's anchor by `delta`. No-op for strokes.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            DrawObject::Path(_) => {}
            DrawObject::Text(t) => t.anchor += delta,
            DrawObject::Shape(s) => s.origin += delta,
        }
    }
}
