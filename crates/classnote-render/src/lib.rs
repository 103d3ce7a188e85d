//! ClassNote Render Library
//!
//! Turns a board's scene, in-progress session, and selection into 2D
//! primitives emitted through the [`Surface`] trait. Backend-agnostic;
//! hosts supply the surface, tests use [`RecordingSurface`].

pub mod renderer;
pub mod surface;

pub use renderer::{BACKGROUND, Renderer, SELECTION_COLOR};
pub use surface::{DrawCmd, RecordingSurface, Surface, SurfaceError};
