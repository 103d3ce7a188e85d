//! ClassNote Core Library
//!
//! Platform-agnostic state and logic for the class-note drawing board:
//! the scene and object model, undo history, tool sessions, input
//! dispatch, and debounced persistence. Rendering lives in
//! `classnote-render` behind the `Surface` trait.

pub mod board;
pub mod geometry;
pub mod history;
pub mod input;
pub mod objects;
pub mod scene;
pub mod session;
pub mod status;
pub mod storage;

pub use board::{Board, MountError};
pub use geometry::TextMeasurer;
pub use history::History;
pub use input::{InputEvent, Key, KeyInput, Modifiers, PointerId, PointerInput, PointerKind, PointerPhase};
pub use objects::{BoardShape, DrawObject, ObjectId, PathStroke, Rgba, ShapeKind, StrokeMode, TextLabel};
pub use scene::{Scene, Tool, ViewState};
pub use session::Session;
pub use status::{Severity, StatusMessage};
pub use storage::{KeyValueStore, MemoryStore, StoreError};
