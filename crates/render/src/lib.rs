//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never mutate the camera or the scene.
//! - A [`RenderView`] is a snapshot taken after the frame's input was applied.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
