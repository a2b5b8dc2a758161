use std::ops::RangeInclusive;

use cubegrid_math::{Vector3, degrees_to_radians, radians_to_degrees};
use serde::{Deserialize, Serialize};

/// How the per-frame uniform matrix is composed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniformMode {
    /// `perspective · camera · scaling(size)`: the free-flight view.
    #[default]
    Camera,
    /// `perspective · translation · rotations · scaling(size)`: the chunk is
    /// posed in front of a fixed eye by the position and angle sliders.
    Object,
}

/// Slider-tunable scene values.
///
/// Angles are stored in radians; configuration files and sliders use degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    pub position: Vector3,
    #[serde(rename = "rotation_degrees", with = "degrees_vector")]
    rotations: Vector3,
    pub size: f64,
    #[serde(rename = "fov_degrees", with = "degrees")]
    fov: f64,
    /// Far clipping plane.
    pub distance: f64,
    pub mode: UniformMode,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, -400.0),
            rotations: Vector3::new(
                degrees_to_radians(-45.0),
                degrees_to_radians(45.0),
                0.0,
            ),
            size: 100.0,
            fov: degrees_to_radians(90.0),
            distance: 1000.0,
            mode: UniformMode::Camera,
        }
    }
}

impl SceneParams {
    pub const POSITION_X: RangeInclusive<f64> = -800.0..=800.0;
    pub const POSITION_Y: RangeInclusive<f64> = -600.0..=600.0;
    pub const POSITION_Z: RangeInclusive<f64> = -1000.0..=0.0;
    pub const ANGLE: RangeInclusive<f64> = -180.0..=180.0;
    pub const SIZE: RangeInclusive<f64> = 0.0..=400.0;
    pub const FOV: RangeInclusive<f64> = 1.0..=120.0;
    pub const DISTANCE: RangeInclusive<f64> = 1.0..=5000.0;

    /// Radians.
    pub fn rotations(&self) -> Vector3 {
        self.rotations
    }

    /// Radians.
    pub fn fov(&self) -> f64 {
        self.fov
    }

    pub fn rotation_degrees(&self) -> Vector3 {
        Vector3::new(
            radians_to_degrees(self.rotations.x),
            radians_to_degrees(self.rotations.y),
            radians_to_degrees(self.rotations.z),
        )
    }

    pub fn set_rotation_degrees(&mut self, degrees: Vector3) {
        self.rotations = Vector3::new(
            degrees_to_radians(degrees.x),
            degrees_to_radians(degrees.y),
            degrees_to_radians(degrees.z),
        );
    }

    pub fn fov_degrees(&self) -> f64 {
        radians_to_degrees(self.fov)
    }

    pub fn set_fov_degrees(&mut self, degrees: f64) {
        self.fov = degrees_to_radians(degrees);
    }

    pub fn size_vector(&self) -> Vector3 {
        Vector3::splat(self.size)
    }
}

mod degrees {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(rad: &f64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(cubegrid_math::radians_to_degrees(*rad))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        f64::deserialize(d).map(cubegrid_math::degrees_to_radians)
    }
}

mod degrees_vector {
    use cubegrid_math::Vector3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(rad: &Vector3, s: S) -> Result<S::Ok, S::Error> {
        let v = rad.to_array().map(cubegrid_math::radians_to_degrees);
        Vector3::from_array(v).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vector3, D::Error> {
        let v = Vector3::deserialize(d)?;
        Ok(Vector3::from_array(v.to_array().map(cubegrid_math::degrees_to_radians)))
    }
}
