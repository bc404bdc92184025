use crate::light::{Light, Material};
use glam::{Mat4, Quat, Vec3};
use litcube_common::Transform;

/// Scale of the lamp marker relative to the unit cube.
const LAMP_SCALE: f32 = 0.2;

/// Scene state advanced once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub cube: Transform,
    pub material: Material,
    pub light: Light,
    /// Cube spin around world Y, degrees per second.
    pub spin_degrees_per_second: f32,
    pub clear_color: [f64; 4],
    elapsed: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            cube: Transform::default(),
            material: Material::default(),
            light: Light::default(),
            spin_degrees_per_second: 30.0,
            clear_color: [0.1, 0.1, 0.1, 1.0],
            elapsed: 0.0,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds of scene time simulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance by `dt` seconds: spin the cube about Y.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            tracing::trace!(dt, "scene step skipped");
            return;
        }
        self.elapsed += dt;
        let spin = Quat::from_rotation_y((self.spin_degrees_per_second * dt).to_radians());
        self.cube.rotation = (spin * self.cube.rotation).normalize();
    }

    /// Current cube rotation about Y in degrees, in `(-180, 180]`.
    pub fn cube_yaw_degrees(&self) -> f32 {
        let (axis, angle) = self.cube.rotation.to_axis_angle();
        let signed = if axis.y < 0.0 { -angle } else { angle };
        let deg = signed.to_degrees();
        if deg > 180.0 { deg - 360.0 } else { deg }
    }

    pub fn cube_model(&self) -> Mat4 {
        self.cube.matrix()
    }

    /// The marker: a small cube at the light position.
    pub fn lamp_model(&self) -> Mat4 {
        Transform {
            scale: Vec3::splat(LAMP_SCALE),
            ..Transform::from_position(self.light.position)
        }
        .matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_spins_thirty_degrees_per_second() {
        let mut scene = Scene::new();
        for _ in 0..60 {
            scene.step(1.0 / 60.0);
        }
        assert!((scene.elapsed() - 1.0).abs() < 1e-4);
        assert!((scene.cube_yaw_degrees() - 30.0).abs() < 1e-2);
        let x = scene.cube_model().transform_vector3(Vec3::X);
        assert!((x - Vec3::new(30f32.to_radians().cos(), 0.0, -30f32.to_radians().sin())).length() < 1e-3);
    }

    #[test]
    fn zero_dt_leaves_cube_still() {
        let mut scene = Scene::new();
        scene.step(0.0);
        assert_eq!(scene.cube_model(), Mat4::IDENTITY);
    }

    #[test]
    fn lamp_sits_at_light_position() {
        let scene = Scene::new();
        let lamp = scene.lamp_model();
        let centre = lamp.transform_point3(Vec3::ZERO);
        assert!((centre - scene.light.position).length() < 1e-6);
        let corner = lamp.transform_point3(Vec3::splat(0.5));
        assert!((corner - scene.light.position - Vec3::splat(0.1)).length() < 1e-6);
    }
}
