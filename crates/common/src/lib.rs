//! Shared types and the configuration layer for the litcube workspace.
//!
//! # Invariants
//! - Every configuration field has a default; a missing file section never fails a load.
//! - Loaded configuration is validated before it reaches the camera or renderer.

pub mod config;
pub mod defaults;
pub mod types;

pub use config::{
    CameraSettings, Config, ConfigError, ConfigFormat, ProjectionSettings, WindowSettings,
};
pub use types::Transform;
