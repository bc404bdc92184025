use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Phong material colours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    /// Coral.
    fn default() -> Self {
        Self {
            ambient: Vec3::new(1.0, 0.5, 0.31),
            diffuse: Vec3::new(1.0, 0.5, 0.31),
            specular: Vec3::splat(0.5),
            shininess: 32.0,
        }
    }
}

/// Scene light. Shading treats it as directional; `position` places the marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    /// Direction the light travels in, not normalized.
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.2, 1.0, 2.0),
            direction: Vec3::new(1.2, -1.0, -0.3),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.5),
            specular: Vec3::ONE,
        }
    }
}

impl Light {
    /// Unit vector from a lit surface towards the light.
    pub fn to_light(&self) -> Vec3 {
        (-self.direction).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_light_is_unit_and_reversed() {
        let light = Light::default();
        let l = light.to_light();
        assert!((l.length() - 1.0).abs() < 1e-6);
        assert!(l.dot(light.direction) < 0.0);
    }

    #[test]
    fn degenerate_direction_does_not_produce_nan() {
        let light = Light {
            direction: Vec3::ZERO,
            ..Light::default()
        };
        assert_eq!(light.to_light(), Vec3::ZERO);
    }
}
