use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::{MathError, Vector3};

/// A 4x4 matrix stored as 16 row-major `f64` values.
///
/// Points are row vectors multiplied on the left (`v · M`), so translation
/// lives in the last row. Composition follows the chaining convention of
/// [`Matrix4::multiply`]: `p.multiply(v).multiply(s)` applies `s` first, then
/// `v`, then `p`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
    m: [f64; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub const fn new(m: [f64; 16]) -> Self {
        Self { m }
    }

    /// Build a matrix from untrusted data, rejecting anything but 16 values.
    pub fn try_from_slice(values: &[f64]) -> Result<Self, MathError> {
        let m: [f64; 16] = values
            .try_into()
            .map_err(|_| MathError::MatrixLength(values.len()))?;
        Ok(Self { m })
    }

    pub const fn to_array(&self) -> [f64; 16] {
        self.m
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.m
    }

    /// Narrow to `f32` for GPU upload, keeping row-major order.
    pub fn to_f32_array(&self) -> [f32; 16] {
        self.m.map(|v| v as f32)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row * 4 + col]
    }

    #[inline]
    pub fn row(&self, i: usize) -> [f64; 4] {
        [self.m[i * 4], self.m[i * 4 + 1], self.m[i * 4 + 2], self.m[i * 4 + 3]]
    }

    #[inline]
    pub fn column(&self, i: usize) -> [f64; 4] {
        [self.m[i], self.m[4 + i], self.m[8 + i], self.m[12 + i]]
    }

    pub fn rows(&self) -> [[f64; 4]; 4] {
        [self.row(0), self.row(1), self.row(2), self.row(3)]
    }

    pub fn columns(&self) -> [[f64; 4]; 4] {
        [self.column(0), self.column(1), self.column(2), self.column(3)]
    }

    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                out[c * 4 + r] = self.m[r * 4 + c];
            }
        }
        Self { m: out }
    }

    /// Compose `other` before `self`.
    ///
    /// Returns the standard product `other × self`, i.e.
    /// `C[r][c] = Σ other[r][k] · self[k][c]`. For row vectors,
    /// `v · C = (v · other) · self`.
    pub fn multiply(&self, other: &Matrix4) -> Matrix4 {
        let mut out = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                out[r * 4 + c] = (0..4).map(|k| other.get(r, k) * self.get(k, c)).sum();
            }
        }
        Self { m: out }
    }

    /// Apply the matrix to the row vector `(v, w)`.
    pub fn transform_point(&self, v: Vector3, w: f64) -> [f64; 4] {
        let p = [v.x, v.y, v.z, w];
        let mut out = [0.0; 4];
        for (c, slot) in out.iter_mut().enumerate() {
            *slot = (0..4).map(|k| p[k] * self.get(k, c)).sum();
        }
        out
    }

    pub fn determinant(&self) -> f64 {
        let (s, c) = self.minors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// 2x2 minors of the top two rows (`s`) and bottom two rows (`c`).
    fn minors(&self) -> ([f64; 6], [f64; 6]) {
        let a = &self.m;
        let s = [
            a[0] * a[5] - a[4] * a[1],
            a[0] * a[6] - a[4] * a[2],
            a[0] * a[7] - a[4] * a[3],
            a[1] * a[6] - a[5] * a[2],
            a[1] * a[7] - a[5] * a[3],
            a[2] * a[7] - a[6] * a[3],
        ];
        let c = [
            a[8] * a[13] - a[12] * a[9],
            a[8] * a[14] - a[12] * a[10],
            a[8] * a[15] - a[12] * a[11],
            a[9] * a[14] - a[13] * a[10],
            a[9] * a[15] - a[13] * a[11],
            a[10] * a[15] - a[14] * a[11],
        ];
        (s, c)
    }

    /// Closed-form inverse through the adjugate.
    ///
    /// A singular matrix yields non-finite values; there is no error path.
    pub fn inverse(&self) -> Matrix4 {
        let a = &self.m;
        let (s, c) = self.minors();
        let det = s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1]
            + s[5] * c[0];
        let inv = 1.0 / det;

        #[rustfmt::skip]
        let m = [
            ( a[5] * c[5] - a[6] * c[4] + a[7] * c[3]) * inv,
            (-a[1] * c[5] + a[2] * c[4] - a[3] * c[3]) * inv,
            ( a[13] * s[5] - a[14] * s[4] + a[15] * s[3]) * inv,
            (-a[9] * s[5] + a[10] * s[4] - a[11] * s[3]) * inv,

            (-a[4] * c[5] + a[6] * c[2] - a[7] * c[1]) * inv,
            ( a[0] * c[5] - a[2] * c[2] + a[3] * c[1]) * inv,
            (-a[12] * s[5] + a[14] * s[2] - a[15] * s[1]) * inv,
            ( a[8] * s[5] - a[10] * s[2] + a[11] * s[1]) * inv,

            ( a[4] * c[4] - a[5] * c[2] + a[7] * c[0]) * inv,
            (-a[0] * c[4] + a[1] * c[2] - a[3] * c[0]) * inv,
            ( a[12] * s[4] - a[13] * s[2] + a[15] * s[0]) * inv,
            (-a[8] * s[4] + a[9] * s[2] - a[11] * s[0]) * inv,

            (-a[4] * c[3] + a[5] * c[1] - a[6] * c[0]) * inv,
            ( a[0] * c[3] - a[1] * c[1] + a[2] * c[0]) * inv,
            (-a[12] * s[3] + a[13] * s[1] - a[14] * s[0]) * inv,
            ( a[8] * s[3] - a[9] * s[1] + a[10] * s[0]) * inv,
        ];
        Self { m }
    }

    /// Inverse by Gauss-Jordan elimination on the augmented matrix `[M | I]`.
    ///
    /// Uses partial pivoting. A column with no usable pivot divides by zero
    /// and the result degrades to NaN/inf, like [`Matrix4::inverse`].
    pub fn inverse_gauss_jordan(&self) -> Matrix4 {
        let mut aug = [[0.0f64; 8]; 4];
        for (i, row) in aug.iter_mut().enumerate() {
            row[..4].copy_from_slice(&self.row(i));
            row[4 + i] = 1.0;
        }

        for i in 0..4 {
            let pivot_row = (i..4)
                .max_by(|&x, &y| aug[x][i].abs().total_cmp(&aug[y][i].abs()))
                .unwrap_or(i);
            aug.swap(i, pivot_row);

            let pivot = aug[i][i];
            for v in aug[i].iter_mut() {
                *v /= pivot;
            }

            for j in 0..4 {
                if j == i {
                    continue;
                }
                let factor = aug[j][i];
                for k in 0..8 {
                    aug[j][k] -= factor * aug[i][k];
                }
            }
        }

        let mut m = [0.0; 16];
        for (i, row) in aug.iter().enumerate() {
            m[i * 4..i * 4 + 4].copy_from_slice(&row[4..]);
        }
        Self { m }
    }

    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|v| v.is_finite())
    }

    /// Elementwise comparison within an absolute tolerance.
    pub fn approx_eq(&self, other: &Matrix4, eps: f64) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl From<[f64; 16]> for Matrix4 {
    fn from(m: [f64; 16]) -> Self {
        Self::new(m)
    }
}

impl TryFrom<&[f64]> for Matrix4 {
    type Error = MathError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        Self::try_from_slice(values)
    }
}

impl Index<usize> for Matrix4 {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.m[i]
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            let row = self.row(r);
            writeln!(
                f,
                "[{:>12.6} {:>12.6} {:>12.6} {:>12.6}]",
                row[0], row[1], row[2], row[3]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKED: [f64; 16] = [
        4.0, 7.0, 2.0, 3.0, //
        0.0, 5.0, 9.0, 4.0, //
        6.0, 1.0, 3.0, 8.0, //
        5.0, 4.0, 7.0, 1.0,
    ];

    fn worked_inverse() -> Matrix4 {
        Matrix4::new([
            1.0 / 423.0,
            -6.0 / 47.0,
            19.0 / 423.0,
            61.0 / 423.0,
            23.0 / 141.0,
            7.0 / 282.0,
            -19.0 / 282.0,
            -7.0 / 141.0,
            -41.0 / 423.0,
            19.0 / 282.0,
            -7.0 / 846.0,
            37.0 / 423.0,
            2.0 / 141.0,
            19.0 / 282.0,
            29.0 / 282.0,
            -19.0 / 141.0,
        ])
    }

    fn counting() -> Matrix4 {
        Matrix4::new(std::array::from_fn(|i| (i + 1) as f64))
    }

    #[test]
    fn rows_and_columns() {
        let m = counting();
        assert_eq!(
            m.rows(),
            [
                [1.0, 2.0, 3.0, 4.0],
                [5.0, 6.0, 7.0, 8.0],
                [9.0, 10.0, 11.0, 12.0],
                [13.0, 14.0, 15.0, 16.0],
            ]
        );
        assert_eq!(m.column(0), [1.0, 5.0, 9.0, 13.0]);
        assert_eq!(m.column(3), [4.0, 8.0, 12.0, 16.0]);
        assert_eq!(m.get(2, 1), 10.0);
        assert_eq!(m[6], 7.0);
        assert_eq!(m.transpose().rows(), m.columns());
    }

    #[test]
    fn multiply_composes_right_operand_first() {
        let a = counting();
        let b = Matrix4::new(std::array::from_fn(|i| (16 - i) as f64));
        assert_eq!(
            a.multiply(&b).to_array(),
            [
                386.0, 444.0, 502.0, 560.0, //
                274.0, 316.0, 358.0, 400.0, //
                162.0, 188.0, 214.0, 240.0, //
                50.0, 60.0, 70.0, 80.0,
            ]
        );
    }

    #[test]
    fn multiply_by_identity() {
        let m = Matrix4::new(WORKED);
        assert_eq!(m.multiply(&Matrix4::IDENTITY), m);
        assert_eq!(Matrix4::IDENTITY.multiply(&m), m);
    }

    #[test]
    fn cofactor_inverse_matches_worked_example() {
        let inv = Matrix4::new(WORKED).inverse();
        assert!(inv.approx_eq(&worked_inverse(), 1e-9), "{inv}");
    }

    #[test]
    fn gauss_jordan_inverse_matches_worked_example() {
        let inv = Matrix4::new(WORKED).inverse_gauss_jordan();
        assert!(inv.approx_eq(&worked_inverse(), 1e-9), "{inv}");
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let m = Matrix4::new(WORKED);
        assert!(m.multiply(&m.inverse()).approx_eq(&Matrix4::IDENTITY, 1e-9));
        assert!(m.inverse().multiply(&m).approx_eq(&Matrix4::IDENTITY, 1e-9));
    }

    #[test]
    fn gauss_jordan_handles_zero_leading_pivot() {
        // permutation matrix: the first pivot is zero
        let m = Matrix4::new([
            0.0, 1.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
            0.0, 0.0, 1.0, 0.0,
        ]);
        let inv = m.inverse_gauss_jordan();
        assert!(inv.approx_eq(&m.inverse(), 1e-12));
        assert!(m.multiply(&inv).approx_eq(&Matrix4::IDENTITY, 1e-12));
    }

    #[test]
    fn singular_inverse_is_not_finite() {
        let m = counting();
        assert!(m.determinant().abs() < 1e-9);
        assert!(!Matrix4::new([0.0; 16]).inverse().is_finite());
        assert!(!Matrix4::new([0.0; 16]).inverse_gauss_jordan().is_finite());
    }

    #[test]
    fn determinant_of_worked_example() {
        // cofactor(0,0) = -6 and inverse[0] = 1/423
        let det = Matrix4::new(WORKED).determinant();
        assert!((det + 2538.0).abs() < 1e-9, "det={det}");
    }

    #[test]
    fn try_from_slice_rejects_wrong_length() {
        let err = Matrix4::try_from_slice(&[1.0; 9]).unwrap_err();
        assert_eq!(err, MathError::MatrixLength(9));
        assert!(err.to_string().contains("16"));
        let ok = Matrix4::try_from(&WORKED[..]).unwrap();
        assert_eq!(ok.to_array(), WORKED);
    }

    #[test]
    fn transform_point_uses_row_vector() {
        let mut t = Matrix4::IDENTITY.to_array();
        t[12] = 1.0;
        t[13] = 2.0;
        t[14] = 3.0;
        let p = Matrix4::new(t).transform_point(Vector3::new(1.0, 1.0, 1.0), 1.0);
        assert_eq!(p, [2.0, 3.0, 4.0, 1.0]);
        let d = Matrix4::new(t).transform_point(Vector3::new(1.0, 1.0, 1.0), 0.0);
        assert_eq!(d, [1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn f32_narrowing_keeps_order() {
        let f = counting().to_f32_array();
        assert_eq!(f[0], 1.0);
        assert_eq!(f[15], 16.0);
    }
}
