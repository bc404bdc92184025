//! The demo scene: one material-lit cube and one light with a marker cube.
//!
//! # Invariants
//! - The scene never reads input; it advances only through [`Scene::step`].
//! - The lamp marker always sits at the light position.

mod light;
mod scene;

pub use light::{Light, Material};
pub use scene::Scene;
