//! Canonical transform constructors in row-vector form.
//!
//! Every constructor returns a [`Matrix4`] meant to be applied as `v · M`,
//! so translations sit in the last row.

use crate::{Matrix4, Vector3};

#[rustfmt::skip]
pub fn rotation_x(angle: f64) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4::new([
        1.0, 0.0, 0.0, 0.0,
        0.0, c,   -s,  0.0,
        0.0, s,   c,   0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

#[rustfmt::skip]
pub fn rotation_y(angle: f64) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4::new([
        c,   0.0, s,   0.0,
        0.0, 1.0, 0.0, 0.0,
        -s,  0.0, c,   0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

#[rustfmt::skip]
pub fn rotation_z(angle: f64) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4::new([
        c,   -s,  0.0, 0.0,
        s,   c,   0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

#[rustfmt::skip]
pub fn translation(t: Vector3) -> Matrix4 {
    Matrix4::new([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        t.x, t.y, t.z, 1.0,
    ])
}

#[rustfmt::skip]
pub fn scaling(s: Vector3) -> Matrix4 {
    Matrix4::new([
        s.x, 0.0, 0.0, 0.0,
        0.0, s.y, 0.0, 0.0,
        0.0, 0.0, s.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Symmetric perspective projection with depth mapped to `[0, 1]`.
///
/// `z_near == z_far` divides by zero; the result is non-finite.
#[rustfmt::skip]
pub fn perspective(fov_y: f64, aspect: f64, z_near: f64, z_far: f64) -> Matrix4 {
    let f = (std::f64::consts::FRAC_PI_2 - 0.5 * fov_y).tan();
    let range_inv = 1.0 / (z_near - z_far);
    Matrix4::new([
        f / aspect, 0.0, 0.0,                          0.0,
        0.0,        f,   0.0,                          0.0,
        0.0,        0.0, z_far * range_inv,            -1.0,
        0.0,        0.0, z_near * z_far * range_inv,   0.0,
    ])
}

/// Orthographic box projection, depth mapped to `[0, 1]`.
#[rustfmt::skip]
pub fn orthographic(
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
    near: f64,
    far: f64,
) -> Matrix4 {
    Matrix4::new([
        2.0 / (right - left),            0.0,                             0.0,                 0.0,
        0.0,                             2.0 / (top - bottom),            0.0,                 0.0,
        0.0,                             0.0,                             1.0 / (near - far),  0.0,
        (right + left) / (left - right), (top + bottom) / (bottom - top), near / (near - far), 1.0,
    ])
}

/// Full placement of an object: scale, then rotate Z, Y, X, then translate,
/// then project.
pub fn object_matrix(
    projection: &Matrix4,
    position: Vector3,
    rotations: Vector3,
    size: Vector3,
) -> Matrix4 {
    projection
        .multiply(&translation(position))
        .multiply(&rotation_x(rotations.x))
        .multiply(&rotation_y(rotations.y))
        .multiply(&rotation_z(rotations.z))
        .multiply(&scaling(size))
}

/// Rotate a vector by Euler angles `(a, b, c)` without building a matrix.
pub fn rotate_euler(v: Vector3, angles: Vector3) -> Vector3 {
    let (sa, ca) = angles.x.sin_cos();
    let (sb, cb) = angles.y.sin_cos();
    let (sc, cc) = angles.z.sin_cos();
    let (i, j, k) = (v.x, v.y, v.z);

    Vector3::new(
        j * sa * sb * cc - k * ca * sb * cc + j * ca * sc + k * sa * sc + i * cb * cc,
        j * ca * cc + k * sa * cc - j * sa * sb * sc + k * ca * sb * sc - i * cb * sc,
        k * ca * cb - j * sa * cb + i * sb,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn zero_rotations_are_exact_identity() {
        assert_eq!(rotation_x(0.0), Matrix4::IDENTITY);
        assert_eq!(rotation_y(0.0), Matrix4::IDENTITY);
        assert_eq!(rotation_z(0.0), Matrix4::IDENTITY);
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let t = translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(t.transform_point(Vector3::ZERO, 1.0), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(t.transform_point(Vector3::ONE, 0.0), [1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn scaling_is_diagonal() {
        let s = scaling(Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(s.transform_point(Vector3::ONE, 1.0), [2.0, 3.0, 4.0, 1.0]);
        assert_eq!(s.get(0, 1), 0.0);
    }

    #[test]
    fn rotation_inverse_is_negative_angle() {
        for angle in [0.3, 1.0, -2.2] {
            for (r, r_neg) in [
                (rotation_x(angle), rotation_x(-angle)),
                (rotation_y(angle), rotation_y(-angle)),
                (rotation_z(angle), rotation_z(-angle)),
            ] {
                assert!(r.inverse().approx_eq(&r_neg, 1e-12));
            }
        }
    }

    #[test]
    fn perspective_layout() {
        let p = perspective(FRAC_PI_2, 2.0, 1.0, 1000.0);
        // fov 90 degrees gives f = 1
        assert!((p[5] - 1.0).abs() < 1e-12);
        assert!((p[0] - 0.5).abs() < 1e-12);
        assert!((p[10] - 1000.0 / (1.0 - 1000.0)).abs() < 1e-12);
        assert_eq!(p[11], -1.0);
        assert!((p[14] - 1000.0 / (1.0 - 1000.0)).abs() < 1e-12);
        assert_eq!(p[15], 0.0);
    }

    #[test]
    fn perspective_with_equal_planes_is_degenerate() {
        assert!(!perspective(FRAC_PI_2, 1.0, 5.0, 5.0).is_finite());
    }

    #[test]
    fn perspective_depth_range() {
        let p = perspective(FRAC_PI_2, 1.0, 1.0, 100.0);
        let near = p.transform_point(Vector3::new(0.0, 0.0, -1.0), 1.0);
        let far = p.transform_point(Vector3::new(0.0, 0.0, -100.0), 1.0);
        assert!((near[2] / near[3]).abs() < 1e-12);
        assert!((far[2] / far[3] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn orthographic_maps_box_corners() {
        let o = orthographic(-2.0, 2.0, -1.0, 1.0, 0.0, 10.0);
        let corner = o.transform_point(Vector3::new(2.0, 1.0, 0.0), 1.0);
        assert!((corner[0] - 1.0).abs() < 1e-12);
        assert!((corner[1] - 1.0).abs() < 1e-12);
        assert!(corner[2].abs() < 1e-12);
        let back = o.transform_point(Vector3::new(-2.0, -1.0, -10.0), 1.0);
        assert!((back[0] + 1.0).abs() < 1e-12);
        assert!((back[1] + 1.0).abs() < 1e-12);
        assert!((back[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn object_matrix_applies_scale_before_translation() {
        let m = object_matrix(
            &Matrix4::IDENTITY,
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::ZERO,
            Vector3::splat(2.0),
        );
        let p = m.transform_point(Vector3::new(1.0, 1.0, 1.0), 1.0);
        assert_eq!(p, [12.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn object_matrix_rotation_order() {
        let rot = Vector3::new(0.4, -1.1, 2.0);
        let m = object_matrix(&Matrix4::IDENTITY, Vector3::ZERO, rot, Vector3::ONE);
        let v = Vector3::new(1.0, 2.0, 3.0);
        // z first, then y, then x
        let by_steps = [rotation_z(rot.z), rotation_y(rot.y), rotation_x(rot.x)]
            .iter()
            .fold([v.x, v.y, v.z], |p, r| {
                let q = r.transform_point(Vector3::new(p[0], p[1], p[2]), 1.0);
                [q[0], q[1], q[2]]
            });
        let direct = m.transform_point(v, 1.0);
        for i in 0..3 {
            assert!((direct[i] - by_steps[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn rotate_euler_identity_and_quarter_turn() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert!(rotate_euler(v, Vector3::ZERO).approx_eq(v, 1e-12));
        let r = rotate_euler(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, FRAC_PI_2));
        assert!(r.approx_eq(Vector3::new(0.0, -1.0, 0.0), 1e-12));
    }

    #[test]
    fn rotate_euler_preserves_length() {
        let v = Vector3::new(1.0, -2.0, 0.5);
        let len = |v: Vector3| (v.x * v.x + v.y * v.y + v.z * v.z).sqrt();
        for angles in [
            Vector3::new(0.3, 0.2, 0.1),
            Vector3::new(PI, -1.0, 2.5),
            Vector3::new(-0.7, 1.4, -3.0),
        ] {
            assert!((len(rotate_euler(v, angles)) - len(v)).abs() < 1e-9);
        }
    }
}
