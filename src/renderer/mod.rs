//! Board rendering
//!
//! The simulation hands a `BoardView` to whatever `Renderer` is attached.
//! On the web that is a Canvas2D renderer; tests and the native demo run
//! without one.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod layout;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use layout::CanvasLayout;

use std::fmt;

use crate::sim::BoardView;

/// A drawing surface failed; the game keeps running regardless
#[derive(Debug, Clone, PartialEq)]
pub struct RenderError(pub String);

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render failed: {}", self.0)
    }
}

impl std::error::Error for RenderError {}

/// Something that can draw the board
pub trait Renderer {
    fn draw(&mut self, board: &BoardView<'_>) -> Result<(), RenderError>;

    /// Viewport changed; recompute sizes before the next draw
    fn resize(&mut self, _viewport_w: f64, _viewport_h: f64, _fullscreen: bool) {}
}

/// Colors for game elements (CSS color strings)
pub mod colors {
    pub const BACKGROUND: &str = "#071029";
    pub const FOOD: &str = "#ff6666";
    pub const SNAKE_HEAD: &str = "#7ce3ff";
    pub const SNAKE_BODY: &str = "#2bb0d6";
}
