//! Rendering module
//!
//! `scene` turns the world into a display list; on the web `canvas` replays
//! it on a 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod commands;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use commands::{DrawCommand, Frame, Paint};
pub use scene::build_frame;
