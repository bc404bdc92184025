use crate::movement::CameraMovement;
use glam::{Mat4, Vec3};
use litcube_common::CameraSettings;
use litcube_common::defaults::{
    DEFAULT_BOOST_MULTIPLIER, DEFAULT_MOUSE_SENSITIVITY, DEFAULT_MOVEMENT_SPEED, DEFAULT_PITCH,
    DEFAULT_PITCH_LIMIT, DEFAULT_YAW, DEFAULT_ZOOM,
};

/// Free-fly camera with a yaw/pitch orientation and a derived orthonormal basis.
///
/// Angles are stored in degrees. Yaw is unbounded; pitch is clamped on
/// construction and by [`Camera::look`]. Camera motion is frame-rate independent only through the
/// caller-supplied `delta_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
    pub boost_multiplier: f32,
    pub pitch_limit: f32,
    yaw: f32,
    pitch: f32,
    world_up: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
    }
}

impl Camera {
    /// Camera at `position` looking along yaw/pitch (degrees), with default tunables.
    ///
    /// `pitch` is clamped to the default pitch limit.
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
            boost_multiplier: DEFAULT_BOOST_MULTIPLIER,
            pitch_limit: DEFAULT_PITCH_LIMIT,
            yaw,
            pitch,
            world_up,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.clamp_pitch();
        camera.update_vectors();
        camera
    }

    /// Camera at `position` with the default orientation and world-up.
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
    }

    /// Build a camera from validated configuration. The starting pitch is
    /// clamped to the configured limit.
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let mut camera = Self::new(
            settings.position,
            settings.world_up,
            settings.yaw,
            settings.pitch,
        );
        camera.movement_speed = settings.movement_speed;
        camera.mouse_sensitivity = settings.mouse_sensitivity;
        camera.zoom = settings.zoom;
        camera.boost_multiplier = settings.boost_multiplier;
        camera.pitch_limit = settings.pitch_limit;
        camera.pitch = settings.pitch;
        camera.clamp_pitch();
        camera.update_vectors();
        camera
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Unit view direction.
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit vector to the camera's right, perpendicular to `front` and world-up.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit camera-space up, perpendicular to `front` and `right`.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Translate along one basis direction.
    ///
    /// Each call is independent: pressing Forward and Right in the same frame
    /// moves by the sum of both displacements, so diagonals are faster than
    /// straight lines.
    pub fn process_movement(&mut self, direction: CameraMovement, delta_time: f32, boosted: bool) {
        let mut velocity = self.movement_speed * delta_time;
        if boosted {
            velocity *= self.boost_multiplier;
        }

        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Up => self.position += self.up * velocity,
            CameraMovement::Down => self.position -= self.up * velocity,
        }
    }

    /// Rotate by a pointer delta. Positive `y_offset` looks up.
    pub fn process_look(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.clamp_pitch();
        }

        self.update_vectors();
    }

    /// [`Camera::process_look`] with pitch clamping enabled.
    pub fn look(&mut self, x_offset: f32, y_offset: f32) {
        self.process_look(x_offset, y_offset, true);
    }

    /// Right-handed look-at from `position` towards `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Right-handed perspective with the camera zoom as vertical fov, depth in [0, 1].
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, near, far)
    }

    pub fn view_projection(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        self.projection_matrix(aspect, near, far) * self.view_matrix()
    }

    fn clamp_pitch(&mut self) {
        let limit = self.pitch_limit.abs();
        let clamped = self.pitch.max(-limit).min(limit);
        if clamped != self.pitch {
            tracing::trace!(pitch = self.pitch, clamped, "pitch clamped");
        }
        self.pitch = clamped;
    }

    /// Recompute `front`, `right` and `up` from yaw, pitch and world-up.
    ///
    /// `right` and `up` are renormalized because `front x world_up` shrinks as
    /// `front` tilts towards the vertical.
    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn default_faces_negative_z() {
        let cam = Camera::default();
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
        assert!(approx(cam.front(), Vec3::NEG_Z));
        assert!(approx(cam.right(), Vec3::X));
        assert!(approx(cam.up(), Vec3::Y));
    }

    #[test]
    fn basis_is_orthonormal_across_orientations() {
        let mut yaw = 0.0_f32;
        while yaw < 360.0 {
            let mut pitch = -88.5_f32;
            while pitch < 89.0 {
                let cam = Camera::new(Vec3::ZERO, Vec3::Y, yaw, pitch);
                let (f, r, u) = (cam.front(), cam.right(), cam.up());
                assert!((f.length() - 1.0).abs() < EPS, "front yaw={yaw} pitch={pitch}");
                assert!((r.length() - 1.0).abs() < EPS, "right yaw={yaw} pitch={pitch}");
                assert!((u.length() - 1.0).abs() < EPS, "up yaw={yaw} pitch={pitch}");
                assert!(f.dot(r).abs() < EPS);
                assert!(f.dot(u).abs() < EPS);
                assert!(r.dot(u).abs() < EPS);
                pitch += 3.5;
            }
            yaw += 7.5;
        }
    }

    #[test]
    fn basis_stays_orthonormal_after_look() {
        let mut cam = Camera::default();
        for step in 0..200 {
            cam.look(37.0, if step % 2 == 0 { 450.0 } else { -90.0 });
            assert!(cam.front().dot(cam.right()).abs() < EPS);
            assert!(cam.front().dot(cam.up()).abs() < EPS);
            assert!(cam.right().dot(cam.up()).abs() < EPS);
            assert!((cam.right().length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn pitch_clamps_at_upper_limit() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y, DEFAULT_YAW, 85.0);
        for _ in 0..5 {
            // +10 degrees at the default sensitivity
            cam.look(0.0, 200.0);
            assert!(cam.pitch() <= 89.0);
        }
        assert_eq!(cam.pitch(), 89.0);
    }

    #[test]
    fn pitch_clamps_at_lower_limit() {
        let mut cam = Camera::default();
        cam.look(0.0, -2000.0);
        assert_eq!(cam.pitch(), -89.0);
    }

    #[test]
    fn unconstrained_look_can_exceed_limit() {
        let mut cam = Camera::default();
        cam.process_look(0.0, -2000.0, false);
        assert!((cam.pitch() + 100.0).abs() < 1e-3);
    }

    #[test]
    fn horizontal_look_scales_by_sensitivity() {
        let mut cam = Camera::default();
        cam.look(100.0, 0.0);
        assert!((cam.yaw() - (DEFAULT_YAW + 5.0)).abs() < EPS);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn yaw_is_not_wrapped() {
        let mut cam = Camera::default();
        for _ in 0..10 {
            cam.look(7200.0, 0.0);
        }
        assert!((cam.yaw() - (DEFAULT_YAW + 3600.0)).abs() < 1e-2);
        assert!((cam.front() - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn forward_then_backward_returns_home() {
        let mut cam = Camera::new(Vec3::new(1.0, -2.0, 3.0), Vec3::Y, 33.0, 21.0);
        let start = cam.position;
        cam.process_movement(CameraMovement::Forward, 0.016, false);
        assert_ne!(cam.position, start);
        cam.process_movement(CameraMovement::Backward, 0.016, false);
        assert!(approx(cam.position, start));
    }

    #[test]
    fn every_direction_is_undone_by_its_opposite() {
        use CameraMovement::*;
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y, 120.0, -40.0);
        for (dir, back) in [(Forward, Backward), (Left, Right), (Up, Down)] {
            cam.process_movement(dir, 0.25, true);
            assert!(!approx(cam.position, Vec3::ZERO), "{dir:?}");
            cam.process_movement(back, 0.25, true);
            assert!(approx(cam.position, Vec3::ZERO), "{dir:?}");
        }
    }

    #[test]
    fn boost_doubles_displacement() {
        let mut plain = Camera::default();
        let mut boosted = Camera::default();
        plain.process_movement(CameraMovement::Forward, 0.5, false);
        boosted.process_movement(CameraMovement::Forward, 0.5, true);
        assert!(approx(boosted.position, plain.position * DEFAULT_BOOST_MULTIPLIER));
        assert!((plain.position.length() - 1.25).abs() < EPS);
    }

    #[test]
    fn movement_follows_basis_vectors() {
        let mut cam = Camera::default();
        cam.process_movement(CameraMovement::Right, 1.0, false);
        assert!(approx(cam.position, Vec3::new(2.5, 0.0, 0.0)));
        cam.process_movement(CameraMovement::Up, 1.0, false);
        assert!(approx(cam.position, Vec3::new(2.5, 2.5, 0.0)));
        cam.process_movement(CameraMovement::Left, 1.0, false);
        cam.process_movement(CameraMovement::Down, 1.0, false);
        assert!(approx(cam.position, Vec3::ZERO));
    }

    #[test]
    fn up_movement_uses_camera_up_when_pitched() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y, DEFAULT_YAW, 45.0);
        cam.process_movement(CameraMovement::Up, 1.0, false);
        assert!(approx(cam.position, cam.up() * 2.5));
        assert!(cam.position.z > 0.0);
    }

    #[test]
    fn diagonal_movement_is_not_normalized() {
        let dt = 0.1;
        let mut straight = Camera::default();
        straight.process_movement(CameraMovement::Forward, dt, false);
        let single = straight.position.length();

        let mut diagonal = Camera::default();
        diagonal.process_movement(CameraMovement::Forward, dt, false);
        diagonal.process_movement(CameraMovement::Right, dt, false);

        let expected = (diagonal.front() + diagonal.right()) * DEFAULT_MOVEMENT_SPEED * dt;
        assert!(approx(diagonal.position, expected));
        assert!((diagonal.position.length() - single * 2.0_f32.sqrt()).abs() < EPS);
        assert!(diagonal.position.length() > single);
    }

    #[test]
    fn non_positive_delta_time() {
        let mut cam = Camera::default();
        cam.process_movement(CameraMovement::Forward, 0.0, true);
        assert_eq!(cam.position, Vec3::ZERO);
        cam.process_movement(CameraMovement::Forward, -1.0, false);
        assert!(approx(cam.position, Vec3::new(0.0, 0.0, 2.5)));
    }

    #[test]
    fn view_matrix_looks_down_negative_z() {
        let cam = Camera::at(Vec3::new(0.0, 0.0, 3.0));
        assert!(approx(cam.front(), Vec3::NEG_Z));
        let view = cam.view_matrix();
        let target = view.transform_point3(Vec3::new(0.0, 0.0, 2.0));
        assert!(approx(target, Vec3::new(0.0, 0.0, -1.0)));
        let eye = view.transform_point3(cam.position);
        assert!(approx(eye, Vec3::ZERO));
    }

    #[test]
    fn view_matrix_is_pure() {
        let cam = Camera::at(Vec3::new(4.0, 1.0, -2.0));
        let before = cam.clone();
        let a = cam.view_matrix();
        let b = cam.view_matrix();
        assert_eq!(a, b);
        assert_eq!(cam, before);
    }

    #[test]
    fn construction_clamps_starting_pitch() {
        let cam = Camera::new(Vec3::ZERO, Vec3::Y, DEFAULT_YAW, 120.0);
        assert_eq!(cam.pitch(), DEFAULT_PITCH_LIMIT);
        assert!(cam.front().z < 0.0);

        let settings = CameraSettings {
            pitch: -75.0,
            pitch_limit: 60.0,
            ..CameraSettings::default()
        };
        let mut cam = Camera::from_settings(&settings);
        assert_eq!(cam.pitch(), -60.0);
        assert!((cam.front().y - (-60f32).to_radians().sin()).abs() < EPS);

        // a small look from the limit does not jump
        cam.look(0.0, 20.0);
        assert!((cam.pitch() - (-59.0)).abs() < EPS);
    }

    #[test]
    fn default_settings_build_the_default_camera() {
        let from_config = Camera::from_settings(&CameraSettings::default());
        let direct = Camera::at(litcube_common::defaults::DEFAULT_POSITION);
        assert_eq!(from_config, direct);
    }

    #[test]
    fn from_settings_copies_tunables() {
        let settings = CameraSettings {
            movement_speed: 7.0,
            mouse_sensitivity: 0.1,
            zoom: 50.0,
            boost_multiplier: 3.0,
            pitch_limit: 60.0,
            ..CameraSettings::default()
        };
        let mut cam = Camera::from_settings(&settings);
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(cam.movement_speed, 7.0);
        assert_eq!(cam.zoom, 50.0);
        cam.look(0.0, 10_000.0);
        assert_eq!(cam.pitch(), 60.0);
        cam.process_movement(CameraMovement::Backward, 1.0, true);
        assert!(cam.position.z > 3.0);
    }

    #[test]
    fn projection_produces_finite_matrix() {
        let cam = Camera::at(Vec3::new(0.0, 0.0, 3.0));
        let vp = cam.view_projection(16.0 / 9.0, 0.1, 100.0);
        assert!(vp.is_finite());
        let clip = vp * Vec3::ZERO.extend(1.0);
        // Origin lies in front of the camera and inside the depth range.
        let ndc_z = clip.z / clip.w;
        assert!(clip.w > 0.0);
        assert!((0.0..=1.0).contains(&ndc_z));
    }
}
