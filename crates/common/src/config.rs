//! Configuration layer.
//!
//! A [`Config`] is read from YAML (`.yaml`, `.yml`) or JSON (`.json`), chosen by
//! file extension. Every section is optional and falls back to its defaults.

use crate::defaults::{
    DEFAULT_BOOST_MULTIPLIER, DEFAULT_MOUSE_SENSITIVITY, DEFAULT_MOVEMENT_SPEED,
    DEFAULT_MSAA_SAMPLES, DEFAULT_PITCH, DEFAULT_PITCH_LIMIT, DEFAULT_POSITION, DEFAULT_YAW,
    DEFAULT_ZOOM,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading, saving, or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0:?} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Serialization format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(ext)),
        }
    }
}

/// Initial state and tunables of the fly camera.
///
/// Speed and sensitivity are deliberately not range-checked; negative values
/// invert the controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Starting position in world space.
    pub position: Vec3,
    /// Fixed world-up reference vector. Must point along +Y or -Y, the axis the
    /// yaw/pitch basis is built around.
    pub world_up: Vec3,
    /// Starting yaw in degrees. -90 faces world -Z.
    pub yaw: f32,
    /// Starting pitch in degrees, within `[-pitch_limit, pitch_limit]`.
    pub pitch: f32,
    /// Movement speed in world units per second.
    pub movement_speed: f32,
    /// Degrees of rotation per pointer unit.
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
    /// Speed multiplier applied while boosting.
    pub boost_multiplier: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]` degrees.
    pub pitch_limit: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            world_up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
            boost_multiplier: DEFAULT_BOOST_MULTIPLIER,
            pitch_limit: DEFAULT_PITCH_LIMIT,
        }
    }
}

/// Clip planes for the perspective projection. Aspect comes from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Desktop window parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Requested multisample count for the scene pass: 1, 2, 4, 8 or 16.
    /// The renderer falls back to a lower count the device supports.
    pub msaa_samples: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "litcube".into(),
            width: 1920,
            height: 1080,
            vsync: true,
            msaa_samples: DEFAULT_MSAA_SAMPLES,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub camera: CameraSettings,
    pub projection: ProjectionSettings,
    pub window: WindowSettings,
}

impl Config {
    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        let config = Self::parse(&text, format)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config text in the given format.
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: Self = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(text)?,
            ConfigFormat::Json => serde_json::from_str(text)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise return the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Write the config, picking the format from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = self.to_string_as(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Serialize to text in the given format.
    pub fn to_string_as(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Reject values the camera or renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        finite("camera.position", cam.position.is_finite())?;
        finite("camera.world_up", cam.world_up.is_finite())?;
        finite("camera.yaw", cam.yaw.is_finite())?;
        finite("camera.pitch", cam.pitch.is_finite())?;
        finite("camera.movement_speed", cam.movement_speed.is_finite())?;
        finite("camera.mouse_sensitivity", cam.mouse_sensitivity.is_finite())?;
        finite("camera.boost_multiplier", cam.boost_multiplier.is_finite())?;

        if cam.world_up.length_squared() < f32::EPSILON {
            return Err(invalid("camera.world_up", "must be non-zero"));
        }
        let up = cam.world_up.normalize();
        if up.y.abs() < 1.0 - 1e-4 {
            return Err(invalid(
                "camera.world_up",
                format!("{} must point along the Y axis", cam.world_up),
            ));
        }
        if !(cam.pitch_limit > 0.0 && cam.pitch_limit < 90.0) {
            return Err(invalid(
                "camera.pitch_limit",
                format!("{} is outside (0, 90)", cam.pitch_limit),
            ));
        }
        if cam.pitch.abs() > cam.pitch_limit {
            return Err(invalid(
                "camera.pitch",
                format!("{} exceeds the pitch limit of {}", cam.pitch, cam.pitch_limit),
            ));
        }
        if !(cam.zoom > 0.0 && cam.zoom < 180.0) {
            return Err(invalid(
                "camera.zoom",
                format!("{} is outside (0, 180)", cam.zoom),
            ));
        }

        let proj = &self.projection;
        if !(proj.near > 0.0 && proj.far > proj.near && proj.far.is_finite()) {
            return Err(invalid(
                "projection",
                format!("need 0 < near < far, got near={} far={}", proj.near, proj.far),
            ));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window", "width and height must be non-zero"));
        }
        if !matches!(self.window.msaa_samples, 1 | 2 | 4 | 8 | 16) {
            return Err(invalid(
                "window.msaa_samples",
                format!("{} is not one of 1, 2, 4, 8, 16", self.window.msaa_samples),
            ));
        }
        Ok(())
    }
}

fn finite(field: &'static str, ok: bool) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
