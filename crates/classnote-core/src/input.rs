//! Normalized input events consumed by the board's dispatch entry point.
//!
//! The host translates platform pointer/keyboard callbacks into these values
//! and feeds them to [`crate::board::Board::handle_input`]; the core never
//! registers event listeners itself. Pointer capture (so moves and releases
//! outside the surface still arrive) is the host's responsibility; platforms
//! without capture simply deliver what they can.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Identifier of a pointing device, stable for the duration of a contact.
pub type PointerId = i64;

/// Kind of pointing device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// Phase of a pointer contact. Cancel is handled identically to Up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointerInput {
    pub id: PointerId,
    pub kind: PointerKind,
    /// Whether this is the primary pointer of its kind. Only primary
    /// pointers may open a session.
    pub primary: bool,
    pub phase: PointerPhase,
    pub position: Point,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// The platform action modifier: Ctrl, or Cmd on macOS hosts.
    pub fn action(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keys the board reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Enter,
    Delete,
    Backspace,
    Z,
}

/// A key-down event with modifiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

/// A normalized input event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum InputEvent {
    Pointer(PointerInput),
    Key(KeyInput),
}

impl PointerInput {
    /// Convenience constructor for a primary mouse event.
    pub fn mouse(id: PointerId, phase: PointerPhase, position: Point) -> Self {
        Self {
            id,
            kind: PointerKind::Mouse,
            primary: true,
            phase,
            position,
        }
    }
}
