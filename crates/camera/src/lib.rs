//! Free-flight camera: keyboard acceleration, mouse look, view derivation.
//!
//! # Invariants
//! - Input that is not engaged never moves or turns the camera.
//! - Horizontal speed never exceeds `max_speed`.
//! - The camera matrix is the inverse of `translation · rotation_y · rotation_x`
//!   with yaw wrapped and pitch clamped to `[-π/2, π/2]`.

mod camera;
pub mod motion;

pub use camera::Camera;
pub use motion::{CameraTuning, integrate_velocity, position_delta};

pub fn crate_info() -> &'static str {
    "cubegrid-camera v0.1.0"
}
