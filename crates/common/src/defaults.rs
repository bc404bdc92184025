//! Demo defaults shared by the configuration layer and the camera.

use glam::Vec3;

/// Starting camera position, three units back from the cube.
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 3.0);
/// Initial yaw in degrees. Faces world -Z.
pub const DEFAULT_YAW: f32 = -90.0;
/// Initial pitch in degrees. Level with the horizon.
pub const DEFAULT_PITCH: f32 = 0.0;
/// World units per second.
pub const DEFAULT_MOVEMENT_SPEED: f32 = 2.5;
/// Degrees per pointer unit.
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.05;
/// Vertical field of view in degrees.
pub const DEFAULT_ZOOM: f32 = 70.0;
/// Speed factor while boosting.
pub const DEFAULT_BOOST_MULTIPLIER: f32 = 2.0;
/// Largest pitch magnitude in degrees; keeps `front` off the world-up axis.
pub const DEFAULT_PITCH_LIMIT: f32 = 89.0;
/// Multisample count requested for the scene pass.
pub const DEFAULT_MSAA_SAMPLES: u32 = 4;
