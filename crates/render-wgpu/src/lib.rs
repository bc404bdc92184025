//! wgpu render backend for the litcube demo.
//!
//! Draws the material-lit cube and the unlit lamp marker with a depth buffer.
//! Wireframe rendering is available when the adapter supports line polygons.
//! The scene pass is multisampled and resolved into the surface when the
//! adapter allows it.
//!
//! # Invariants
//! - Renderer never mutates the camera or the scene.
//! - All per-frame camera data arrives through a [`litcube_render::RenderView`].

mod context;
mod gpu;
mod shaders;

pub use context::{GpuContext, RenderInitError};
pub use gpu::WgpuRenderer;
