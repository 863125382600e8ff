//! Rendering adapter: renderer-agnostic interface for the terrain scene.
//!
//! # Invariants
//! - Renderers read the surface and the view; they never touch player state.
//! - The camera eye is the player's position, produced by the frame loop.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer, SceneStyle};

pub fn crate_info() -> &'static str {
    "terrawalk-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
