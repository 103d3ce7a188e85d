//! Text label object.

use super::{ObjectId, Rgba};
use crate::geometry::{self, HIT_PADDING, TextMeasurer};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest allowed font size.
pub const MIN_FONT_SIZE: f64 = 10.0;
/// Largest allowed font size.
pub const MAX_FONT_SIZE: f64 = 120.0;
/// Font size used when the stored value is not a number.
pub const DEFAULT_FONT_SIZE: f64 = 24.0;

/// A block of text anchored at its top-left corner in world space.
///
/// Content may contain newlines; each line lays out at 1.2x the font size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLabel {
    pub(crate) id: ObjectId,
    /// Top-left anchor in world coordinates.
    pub anchor: Point,
    pub content: String,
    pub color: Rgba,
    /// Font size, clamped to `[10, 120]`.
    pub font_size: f64,
}

impl TextLabel {
    /// Create a new text label. The font size is clamped on the way in.
    pub fn new(anchor: Point, content: String, color: Rgba, font_size: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            content,
            color,
            font_size: Self::clamp_font_size(font_size),
        }
    }

    /// Clamp a font size into the allowed range, falling back on NaN.
    pub fn clamp_font_size(size: f64) -> f64 {
        geometry::clamp_or(size, MIN_FONT_SIZE, MAX_FONT_SIZE, DEFAULT_FONT_SIZE)
    }

    /// Replace content, color, and size in one edit.
    pub fn apply_edit(&mut self, content: String, color: Rgba, font_size: f64) {
        self.content = content;
        self.color = color;
        self.font_size = Self::clamp_font_size(font_size);
    }

    /// Multi-line bounds, measured when a surface is available.
    pub fn bounds(&self, padding: f64, measurer: Option<&dyn TextMeasurer>) -> Rect {
        geometry::text_block_bounds(self.anchor, &self.content, self.font_size, padding, measurer)
    }

    /// Point-in-text hit test with the standard selection padding.
    pub fn hit_test(&self, point: Point, measurer: Option<&dyn TextMeasurer>) -> bool {
        self.bounds(HIT_PADDING, measurer).contains(point)
    }
}
