//! Freehand stroke object.

use super::{ObjectId, Rgba};
use crate::geometry::{COMPACT_DISTANCE, HIT_PADDING, distance};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a stroke paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeMode {
    /// Normal ink in the stroke's color.
    #[default]
    Draw,
    /// Opaque white paint-over. Erasing is not a boolean subtraction; over a
    /// non-white background it leaves visible white patches.
    Erase,
}

/// A freehand stroke: an ordered sequence of world-space points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathStroke {
    pub(crate) id: ObjectId,
    /// Points along the stroke, at least one.
    pub points: Vec<Point>,
    pub color: Rgba,
    pub width: f64,
    pub mode: StrokeMode,
}

impl PathStroke {
    /// Create a stroke from recorded points.
    pub fn new(points: Vec<Point>, color: Rgba, width: f64, mode: StrokeMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            width,
            mode,
        }
    }

    /// Remove near-duplicate points closer than the compaction threshold.
    ///
    /// Keeps the first point, then each point at least [`COMPACT_DISTANCE`]
    /// from the last kept one.
    pub fn compact_points(points: &[Point]) -> Vec<Point> {
        let mut kept: Vec<Point> = Vec::with_capacity(points.len());
        for &p in points {
            match kept.last() {
                Some(&last) if distance(last, p) < COMPACT_DISTANCE => {}
                _ => kept.push(p),
            }
        }
        kept
    }

    pub fn bounds(&self) -> Rect {
        let mut iter = self.points.iter();
        let Some(first) = iter.next() else {
            return Rect::ZERO;
        };
        let mut rect = Rect::new(first.x, first.y, first.x, first.y);
        for p in iter {
            rect = rect.union_pt(*p);
        }
        rect
    }

    /// Distance-to-polyline hit test: within padding plus half the stroke width.
    pub fn hit_test(&self, point: Point) -> bool {
        let tolerance = HIT_PADDING + self.width / 2.0;
        if self.points.len() < 2 {
            return self
                .points
                .first()
                .is_some_and(|&p| distance(p, point) <= tolerance);
        }
        for window in self.points.windows(2) {
            if segment_distance(point, window[0], window[1]) <= tolerance {
                return true;
            }
        }
        false
    }
}

/// Distance from a point to a line segment.
fn segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    distance(point, proj)
}
