//! Developer Tooling: frame-rate counter and camera inspector.
//!
//! # Invariants
//! - Tools only read state; nothing here mutates the camera.

mod fps;
mod inspector;

pub use fps::FpsCounter;
pub use inspector::{CameraInspector, CameraSummary};
