use glam::Vec3;
use litcube_camera::Camera;

/// Read-only camera queries for the HUD and logs.
pub struct CameraInspector;

impl CameraInspector {
    pub fn summary(camera: &Camera) -> CameraSummary {
        CameraSummary {
            position: camera.position,
            front: camera.front(),
            yaw: camera.yaw(),
            pitch: camera.pitch(),
            fov: camera.zoom,
        }
    }
}

/// Snapshot of the camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSummary {
    pub position: Vec3,
    pub front: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
}

impl CameraSummary {
    /// Yaw folded into `[0, 360)` for display; the camera keeps it unbounded.
    pub fn heading(&self) -> f32 {
        self.yaw.rem_euclid(360.0)
    }
}

impl std::fmt::Display for CameraSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Camera: pos=({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} fov={:.0}",
            self.position.x,
            self.position.y,
            self.position.z,
            self.heading(),
            self.pitch,
            self.fov
        )
    }
}
