//! Free-fly first-person camera.
//!
//! Turns discrete movement commands and pointer deltas into a position and a
//! yaw/pitch orientation, and answers with a view transform.
//!
//! # Invariants
//! - `front`, `right` and `up` are derived from yaw/pitch and never set directly.
//! - The basis is orthonormal after every operation.
//! - Pitch stays inside `[-pitch_limit, pitch_limit]` after construction and
//!   after every constrained look, so `front` never becomes parallel to world-up.
//! - The camera does no input bookkeeping (first pointer sample, held keys);
//!   that belongs to the frame loop.

mod camera;
mod movement;

pub use camera::Camera;
pub use litcube_common::defaults::{
    DEFAULT_BOOST_MULTIPLIER, DEFAULT_MOUSE_SENSITIVITY, DEFAULT_MOVEMENT_SPEED, DEFAULT_PITCH,
    DEFAULT_PITCH_LIMIT, DEFAULT_YAW, DEFAULT_ZOOM,
};
pub use movement::CameraMovement;
