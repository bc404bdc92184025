use serde::{Deserialize, Serialize};

/// Direction selector for [`Camera::process_movement`](crate::Camera::process_movement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CameraMovement {
    /// Along `front`.
    Forward,
    /// Against `front`.
    Backward,
    /// Against `right`.
    Left,
    /// Along `right`.
    Right,
    /// Along the camera's `up`.
    Up,
    /// Against the camera's `up`.
    Down,
}

impl CameraMovement {
    /// Every direction, in declaration order.
    pub const ALL: [CameraMovement; 6] = [
        CameraMovement::Forward,
        CameraMovement::Backward,
        CameraMovement::Left,
        CameraMovement::Right,
        CameraMovement::Up,
        CameraMovement::Down,
    ];
}
