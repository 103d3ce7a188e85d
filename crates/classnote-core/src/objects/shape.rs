//! Rectangle and circle shape object.

use super::{ObjectId, Rgba};
use crate::geometry::{self, HIT_PADDING};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rect,
    /// Rendered as an ellipse inscribed in the bounding box.
    Circle,
}

/// An outlined shape anchored at its top-left corner in world space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardShape {
    pub(crate) id: ObjectId,
    /// Top-left corner in world coordinates.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub shape: ShapeKind,
    pub color: Rgba,
    pub stroke_width: f64,
}

impl BoardShape {
    /// Create a new shape. Width and height are clamped non-negative.
    pub fn new(
        origin: Point,
        width: f64,
        height: f64,
        shape: ShapeKind,
        color: Rgba,
        stroke_width: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            width: width.max(0.0),
            height: height.max(0.0),
            shape,
            color,
            stroke_width,
        }
    }

    /// Create a shape spanning two corner points, in any drag direction.
    pub fn from_corners(
        a: Point,
        b: Point,
        shape: ShapeKind,
        color: Rgba,
        stroke_width: f64,
    ) -> Self {
        let origin = Point::new(a.x.min(b.x), a.y.min(b.y));
        Self::new(
            origin,
            (b.x - a.x).abs(),
            (b.y - a.y).abs(),
            shape,
            color,
            stroke_width,
        )
    }

    /// Bounding box inflated by `padding`.
    pub fn bounds(&self, padding: f64) -> Rect {
        geometry::inflated_rect(self.origin, self.width, self.height, padding)
    }

    /// Hit test with the standard selection padding.
    ///
    /// Circles use the normalized-distance ellipse test; rects use the
    /// padded bounding box.
    pub fn hit_test(&self, point: Point) -> bool {
        match self.shape {
            ShapeKind::Rect => self.bounds(HIT_PADDING).contains(point),
            ShapeKind::Circle => {
                let center = Point::new(
                    self.origin.x + self.width / 2.0,
                    self.origin.y + self.height / 2.0,
                );
                geometry::point_in_ellipse(
                    point,
                    center,
                    self.width / 2.0,
                    self.height / 2.0,
                    HIT_PADDING,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_any_direction() {
        let a = Point::new(100.0, 50.0);
        let b = Point::new(20.0, 90.0);
        let shape = BoardShape::from_corners(a, b, ShapeKind::Rect, Rgba::black(), 2.0);
        assert_eq!(shape.origin, Point::new(20.0, 50.0));
        assert!((shape.width - 80.0).abs() < f64::EPSILON);
        assert!((shape.height - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rect_hit_test_with_padding() {
        let shape = BoardShape::new(Point::ZERO, 100.0, 100.0, ShapeKind::Rect, Rgba::black(), 2.0);
        assert!(shape.hit_test(Point::new(50.0, 50.0)));
        assert!(shape.hit_test(Point::new(105.0, 50.0)));
        assert!(!shape.hit_test(Point::new(120.0, 50.0)));
    }

    #[test]
    fn test_circle_hit_test() {
        let shape = BoardShape::new(Point::ZERO, 100.0, 60.0, ShapeKind::Circle, Rgba::black(), 2.0);
        // Center is inside, bounding-box corner is outside the ellipse
        assert!(shape.hit_test(Point::new(50.0, 30.0)));
        assert!(!shape.hit_test(Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_negative_size_clamped() {
        let shape = BoardShape::new(Point::ZERO, -5.0, -5.0, ShapeKind::Rect, Rgba::black(), 2.0);
        assert!(shape.width.abs() < f64::EPSILON);
        assert!(shape.height.abs() < f64::EPSILON);
    }
}
