//! Scalar helpers for camera angles.

use std::f64::consts::TAU;

/// Restrict `value` to `[min, max]`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Drop whole turns from an angle while keeping its sign.
///
/// The magnitude is reduced by 2π until it is at most 2π, so `wrap_angle(2π)`
/// stays `2π`. Non-finite input is returned unchanged.
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let sign = if angle < 0.0 { -1.0 } else { 1.0 };
    let mut magnitude = angle.abs();
    if magnitude > TAU {
        // fmod is exact, so this matches repeated subtraction without looping.
        magnitude %= TAU;
        if magnitude == 0.0 {
            magnitude = TAU;
        }
    }
    magnitude * sign
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees / 360.0 * TAU
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians / TAU * 360.0
}
