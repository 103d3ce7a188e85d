//! Scene: the persisted object sequence plus view state.

use crate::geometry::TextMeasurer;
use crate::objects::{DrawObject, ObjectId, Rgba};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Rect,
    Circle,
    Text,
    Pan,
}

/// Persisted view state: the active tool/style and the pan offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub tool: Tool,
    pub color: Rgba,
    pub stroke_width: f64,
    pub pan: Vec2,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: Rgba::black(),
            stroke_width: 4.0,
            pan: Vec2::ZERO,
        }
    }
}

/// The scene: an ordered sequence of drawable objects plus view state.
///
/// Z-order is sequence order (later objects on top). Object ids are unique
/// within a scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub objects: Vec<DrawObject>,
    pub view: ViewState,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Append an object on top of the z-order.
    ///
    /// Returns false (and drops the object) if its id already exists.
    pub fn push(&mut self, object: DrawObject) -> bool {
        if self.contains(object.id()) {
            return false;
        }
        self.objects.push(object);
        true
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.id() == id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&DrawObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut DrawObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<DrawObject> {
        let idx = self.objects.iter().position(|o| o.id() == id)?;
        Some(self.objects.remove(idx))
    }

    /// Topmost object at a world point, front to back.
    pub fn object_at(&self, point: Point, measurer: Option<&dyn TextMeasurer>) -> Option<&DrawObject> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.hit_test(point, measurer))
    }

    /// Topmost movable (Text or Shape) object at a world point.
    pub fn movable_at(&self, point: Point, measurer: Option<&dyn TextMeasurer>) -> Option<&DrawObject> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.is_movable() && o.hit_test(point, measurer))
    }

    /// Topmost text object at a world point.
    pub fn text_at(&self, point: Point, measurer: Option<&dyn TextMeasurer>) -> Option<&DrawObject> {
        self.objects
            .iter()
            .rev()
            .find(|o| matches!(o, DrawObject::Text(_)) && o.hit_test(point, measurer))
    }
}
