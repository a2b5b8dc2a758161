//! Math Core: 3D vectors, row-major 4x4 matrices, canonical transforms.
//!
//! # Invariants
//! - Matrices are stored row-major and applied to row vectors (`v · M`).
//! - `a.multiply(b)` composes so that `b` is applied before `a`.
//! - Degenerate math (singular inverse, `z_near == z_far`) propagates NaN/inf
//!   rather than failing; only malformed input is rejected with an error.

pub mod angle;
pub mod color;
mod error;
pub mod matrix;
pub mod transform;
pub mod vector;

pub use angle::{clamp, degrees_to_radians, radians_to_degrees, wrap_angle};
pub use error::MathError;
pub use matrix::Matrix4;
pub use vector::Vector3;

pub fn crate_info() -> &'static str {
    "cubegrid-math v0.1.0"
}
