use cubegrid_input::Movement;
use cubegrid_math::{Vector3, clamp};
use serde::{Deserialize, Serialize};

/// Camera movement constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Horizontal speed cap, in units per frame.
    pub max_speed: f64,
    pub acceleration: f64,
    /// Applied to a horizontal axis on frames with no input on it.
    pub damping: f64,
    /// Degrees of rotation per unit of mouse motion.
    pub look_sensitivity: f64,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            max_speed: 800.0,
            acceleration: 100.0,
            damping: 0.95,
            look_sensitivity: 1.0,
        }
    }
}

/// One frame of velocity integration.
///
/// Horizontal axes accelerate toward the held direction and are capped at
/// `max_speed`; an axis with no input decays by `damping`. The vertical axis
/// saturates at twice `max_speed` and never decays. `velocity.x` follows
/// `back - forward`, `velocity.y` follows `right - left`.
pub fn integrate_velocity(
    velocity: Vector3,
    movement: &Movement,
    dt_ms: f64,
    tuning: &CameraTuning,
) -> Vector3 {
    let (mx, my, mz) = movement.axes();
    let max = tuning.max_speed;
    let accel_factor = tuning.acceleration * (dt_ms / 1000.0) / 10.0;
    let horizontal = |v: f64, m: f64| {
        let damp = if m != 0.0 { 1.0 } else { tuning.damping };
        clamp(v + m * accel_factor, -max, max) * damp
    };

    Vector3::new(
        horizontal(velocity.x, mx),
        horizontal(velocity.y, my),
        clamp(velocity.z + mz * max * 1000.0, -2.0 * max, 2.0 * max),
    )
}

/// World-space displacement for one frame.
///
/// Velocity is rotated into the camera's heading by `yaw`. Vertical motion
/// uses the raw up/down flags, one unit per frame.
pub fn position_delta(velocity: Vector3, movement: &Movement, yaw: f64) -> Vector3 {
    let (sin, cos) = yaw.sin_cos();
    let side = cos * velocity.y - sin * velocity.x;
    let forward = cos * velocity.x + sin * velocity.y;
    let (_, _, mz) = movement.axes();
    Vector3::new(side, mz, forward)
}
