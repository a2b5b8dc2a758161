use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A 3D vector of `f64` components.
///
/// All arithmetic returns a new value; nothing mutates through a shared
/// reference. Componentwise `divide` is unguarded: a zero divisor yields
/// ±inf or NaN in that component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis.
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    pub const fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Independent copy of this vector.
    pub fn copy(&self) -> Self {
        *self
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Componentwise product.
    pub fn multiply(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Componentwise quotient. Callers must keep divisors non-zero.
    pub fn divide(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y, self.z / other.z)
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
    }

    /// See [`crate::color::hex_to_vector`].
    pub fn from_hex_color(hex: &str) -> Result<Self, crate::MathError> {
        crate::color::hex_to_vector(hex)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(a: [f64; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::add(self, rhs)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::sub(self, rhs)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: f64) -> Vector3 {
        self.scale(rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_returns_new_value() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        let c = a.add(b);
        assert_eq!(c, Vector3::new(5.0, 7.0, 9.0));
        // operands untouched
        assert_eq!(a, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(a + b, c);
    }

    #[test]
    fn componentwise_multiply_and_divide() {
        let a = Vector3::new(2.0, 3.0, 4.0);
        let b = Vector3::new(2.0, 2.0, 2.0);
        assert_eq!(a.multiply(b), Vector3::new(4.0, 6.0, 8.0));
        assert_eq!(a.divide(b), Vector3::new(1.0, 1.5, 2.0));
    }

    #[test]
    fn divide_by_zero_is_unguarded() {
        let v = Vector3::new(1.0, -1.0, 0.0).divide(Vector3::ZERO);
        assert_eq!(v.x, f64::INFINITY);
        assert_eq!(v.y, f64::NEG_INFINITY);
        assert!(v.z.is_nan());
        assert!(!v.is_finite());
    }

    #[test]
    fn scale_and_operators() {
        let v = Vector3::new(1.0, -2.0, 0.5);
        assert_eq!(v.scale(2.0), Vector3::new(2.0, -4.0, 1.0));
        assert_eq!(v * 2.0, v.scale(2.0));
        assert_eq!(-v, Vector3::new(-1.0, 2.0, -0.5));
        assert_eq!(v - v, Vector3::ZERO);
    }

    #[test]
    fn array_round_trip_and_copy() {
        let v = Vector3::from_array([7.0, 8.0, 9.0]);
        assert_eq!(v.to_array(), [7.0, 8.0, 9.0]);
        let mut c = v.copy();
        c.x = 0.0;
        assert_eq!(v.x, 7.0);
    }

    #[test]
    fn display_is_comma_separated() {
        assert_eq!(Vector3::new(1.0, 2.5, -3.0).to_string(), "1,2.5,-3");
    }
}
