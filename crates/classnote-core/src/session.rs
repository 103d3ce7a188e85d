//! Tool sessions: the in-progress user gesture state machine.
//!
//! At most one session is active at a time. A session is opened by a
//! pointer-down, updated in place by pointer-moves, and closed by
//! pointer-up/cancel (or, for text edits, by keyboard). Each session owns
//! the pointer id that opened it; events from other pointers are ignored
//! while it runs. Sessions are ephemeral and never persisted.

use crate::geometry::{DRAG_COMMIT_DISTANCE, DRAW_SAMPLE_DISTANCE, MIN_SHAPE_SIZE, distance};
use crate::input::PointerId;
use crate::objects::{ObjectId, PathStroke, Rgba, ShapeKind};
use kurbo::{Point, Rect, Vec2};

/// A freehand drawing gesture (pen or eraser).
#[derive(Debug, Clone)]
pub struct DrawSession {
    pub pointer: PointerId,
    pub erase: bool,
    /// Recorded points, seeded with the start point.
    pub points: Vec<Point>,
}

impl DrawSession {
    pub fn new(pointer: PointerId, erase: bool, start: Point) -> Self {
        Self {
            pointer,
            erase,
            points: vec![start],
        }
    }

    /// Record a move, sampled at the minimum draw distance.
    /// Returns true if the point was kept.
    pub fn record(&mut self, point: Point) -> bool {
        match self.points.last() {
            Some(&last) if distance(last, point) < DRAW_SAMPLE_DISTANCE => false,
            _ => {
                self.points.push(point);
                true
            }
        }
    }

    /// Compact the recorded points for commit. None if nothing remains.
    pub fn finish(self) -> Option<Vec<Point>> {
        let compacted = PathStroke::compact_points(&self.points);
        if compacted.is_empty() {
            None
        } else {
            Some(compacted)
        }
    }
}

/// A two-corner shape gesture (rect or circle).
#[derive(Debug, Clone)]
pub struct ShapeSession {
    pub pointer: PointerId,
    pub kind: ShapeKind,
    pub start: Point,
    pub current: Point,
}

impl ShapeSession {
    pub fn new(pointer: PointerId, kind: ShapeKind, start: Point) -> Self {
        Self {
            pointer,
            kind,
            start,
            current: start,
        }
    }

    /// Axis-aligned rect spanning the two corners, in any drag direction.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.current.x),
            self.start.y.min(self.current.y),
            self.start.x.max(self.current.x),
            self.start.y.max(self.current.y),
        )
    }

    /// Whether the gesture meets the minimum shape size.
    pub fn meets_minimum(&self) -> bool {
        let r = self.rect();
        r.width() >= MIN_SHAPE_SIZE && r.height() >= MIN_SHAPE_SIZE
    }
}

/// Dragging a movable object.
///
/// History is committed lazily: not on grab, but on the first move whose
/// cumulative displacement from the grab point reaches the commit threshold.
/// A click with no movement leaves no history entry and no change.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub pointer: PointerId,
    pub target: ObjectId,
    /// World point where the object was grabbed.
    pub grab: Point,
    /// The object's anchor at grab time.
    pub origin: Point,
    /// Whether the lazy history commit has happened.
    pub committed: bool,
}

impl DragSession {
    pub fn new(pointer: PointerId, target: ObjectId, grab: Point, origin: Point) -> Self {
        Self {
            pointer,
            target,
            grab,
            origin,
            committed: false,
        }
    }

    /// Displacement of `current` from the grab point.
    pub fn delta(&self, current: Point) -> Vec2 {
        Vec2::new(current.x - self.grab.x, current.y - self.grab.y)
    }

    /// Whether a move to `current` crosses the commit threshold.
    pub fn crosses_threshold(&self, current: Point) -> bool {
        distance(self.grab, current) >= DRAG_COMMIT_DISTANCE
    }
}

/// Panning the view. Updates only the pan offset, never an object.
#[derive(Debug, Clone)]
pub struct PanSession {
    pub pointer: PointerId,
    /// Last pointer position in screen coordinates.
    pub last_screen: Point,
}

/// Whether a text edit creates a new label or revises an existing one.
#[derive(Debug, Clone)]
pub enum TextEditMode {
    /// New label at the clicked world point.
    New { anchor: Point },
    /// Editing an existing label; `original` is its content at open time.
    Edit { target: ObjectId, original: String },
}

/// What committing a text edit should do to the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum TextCommit {
    /// Nothing to apply, no history entry.
    Discard,
    /// Append a new label with the trimmed content.
    Create { anchor: Point, content: String },
    /// Delete the edited label.
    Delete { target: ObjectId },
    /// Replace the edited label's content/color/size.
    Update { target: ObjectId, content: String },
}

/// An open text edit, backed by the host's overlay input.
#[derive(Debug, Clone)]
pub struct TextEditSession {
    pub pointer: PointerId,
    pub mode: TextEditMode,
    pub buffer: String,
    pub color: Rgba,
    pub font_size: f64,
}

impl TextEditSession {
    /// Evaluate the commit rules against the current buffer.
    pub fn commit(&self) -> TextCommit {
        let trimmed = self.buffer.trim();
        match &self.mode {
            TextEditMode::New { anchor } => {
                if trimmed.is_empty() {
                    TextCommit::Discard
                } else {
                    TextCommit::Create {
                        anchor: *anchor,
                        content: trimmed.to_string(),
                    }
                }
            }
            TextEditMode::Edit { target, original } => {
                if trimmed == original.trim() {
                    TextCommit::Discard
                } else if trimmed.is_empty() {
                    TextCommit::Delete { target: *target }
                } else {
                    TextCommit::Update {
                        target: *target,
                        content: trimmed.to_string(),
                    }
                }
            }
        }
    }
}

/// The session state machine: exactly one variant active at any instant.
#[derive(Debug, Clone, Default)]
pub enum Session {
    #[default]
    Idle,
    Drawing(DrawSession),
    ShapeDrawing(ShapeSession),
    Dragging(DragSession),
    Panning(PanSession),
    EditingText(TextEditSession),
}

impl Session {
    pub fn is_active(&self) -> bool {
        !matches!(self, Session::Idle)
    }

    /// The pointer id that owns this session, if any.
    pub fn owner(&self) -> Option<PointerId> {
        match self {
            Session::Idle => None,
            Session::Drawing(s) => Some(s.pointer),
            Session::ShapeDrawing(s) => Some(s.pointer),
            Session::Dragging(s) => Some(s.pointer),
            Session::Panning(s) => Some(s.pointer),
            Session::EditingText(s) => Some(s.pointer),
        }
    }
}
