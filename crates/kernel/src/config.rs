use std::path::{Path, PathBuf};

use cubegrid_camera::CameraTuning;
use cubegrid_input::KeyLayout;
use cubegrid_math::{MathError, Vector3};
use cubegrid_scene::{ChunkSettings, SceneError};
use serde::{Deserialize, Serialize};

use crate::SceneParams;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid chunk settings: {0}")]
    Scene(#[from] SceneError),
    #[error("invalid background color: {0}")]
    Color(#[from] MathError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Projection constants that sliders do not touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    pub z_near: f64,
    /// Initial surface size in pixels; sets the aspect ratio until resized.
    pub viewport: [u32; 2],
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            z_near: 1.0,
            viewport: [800, 600],
        }
    }
}

/// Everything the engine needs at startup. Every section is optional in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub chunk: ChunkSettings,
    pub camera: CameraTuning,
    pub camera_position: CameraStart,
    pub projection: ProjectionSettings,
    pub keys: KeyLayout,
    pub scene: SceneParams,
    /// Clear color as `#rrggbb`.
    pub background: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk: ChunkSettings::default(),
            camera: CameraTuning::default(),
            camera_position: CameraStart::default(),
            projection: ProjectionSettings::default(),
            keys: KeyLayout::default(),
            scene: SceneParams::default(),
            background: "#212121".to_string(),
        }
    }
}

/// Where the camera starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CameraStart(pub Vector3);

impl Default for CameraStart {
    fn default() -> Self {
        Self(Vector3::new(0.0, 200.0, 2000.0))
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn background_color(&self) -> Result<Vector3, ConfigError> {
        Ok(Vector3::from_hex_color(&self.background)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunk.validate()?;
        self.background_color()?;

        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        let p = &self.projection;
        if !(p.z_near.is_finite() && p.z_near > 0.0) {
            return invalid(format!("z_near must be positive, got {}", p.z_near));
        }
        if p.viewport.contains(&0) {
            return invalid(format!("viewport must be non-empty, got {:?}", p.viewport));
        }
        if self.scene.distance.is_nan() || self.scene.distance <= p.z_near {
            return invalid(format!(
                "view distance {} must exceed z_near {}",
                self.scene.distance, p.z_near
            ));
        }
        let t = &self.camera;
        if !(t.max_speed.is_finite() && t.max_speed > 0.0) {
            return invalid(format!("max_speed must be positive, got {}", t.max_speed));
        }
        if !(t.acceleration.is_finite() && t.acceleration >= 0.0) {
            return invalid(format!("acceleration must be non-negative, got {}", t.acceleration));
        }
        if !(0.0..=1.0).contains(&t.damping) {
            return invalid(format!("damping must be within [0, 1], got {}", t.damping));
        }
        if self.keys.is_empty() {
            return invalid("key layout binds no keys".to_string());
        }
        Ok(())
    }
}
