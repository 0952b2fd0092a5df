/// 4x4 matrix algebra over a flat row-major array
///
/// `Mat4` stores 16 floats row by row and uses the column-vector convention
/// (`v' = M * v`, translation in the last column). The flat layout is the
/// interop contract: the array can be handed to a rendering boundary as a
/// uniform upload, transposing first where the API expects column-major.
use std::ops::Mul;

use thiserror::Error;

/// Errors from matrix operations that can fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// The matrix has a zero determinant and no inverse.
    #[error("matrix is singular (zero determinant)")]
    Singular,
}

/// A 4x4 transform matrix, flattened row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4(pub [f32; 16]);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// The flat row-major element array.
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.0
    }

    /// Standard 4x4 product: `c[i][j] = sum_k self[i][k] * other[k][j]`.
    pub fn multiply(&self, other: &Mat4) -> Mat4 {
        let a = &self.0;
        let b = &other.0;
        let mut c = [0.0f32; 16];
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a[i * 4 + k] * b[k * 4 + j];
                }
                c[i * 4 + j] = sum;
            }
        }
        Mat4(c)
    }

    pub fn transpose(&self) -> Mat4 {
        let m = &self.0;
        let mut t = [0.0f32; 16];
        for i in 0..4 {
            for j in 0..4 {
                t[j * 4 + i] = m[i * 4 + j];
            }
        }
        Mat4(t)
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, -s, 0.0, //
            0.0, s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4([
            c, 0.0, s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4([
            c, -s, 0.0, 0.0, //
            s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4([
            1.0, 0.0, 0.0, x, //
            0.0, 1.0, 0.0, y, //
            0.0, 0.0, 1.0, z, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn scale(sx: f32, sy: f32, sz: f32) -> Mat4 {
        Mat4([
            sx, 0.0, 0.0, 0.0, //
            0.0, sy, 0.0, 0.0, //
            0.0, 0.0, sz, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Determinant of the 3x3 minor obtained by deleting `row` and `col`.
    fn minor(&self, row: usize, col: usize) -> f32 {
        let m = &self.0;
        let mut sub = [0.0f32; 9];
        let mut k = 0;
        for i in 0..4 {
            if i == row {
                continue;
            }
            for j in 0..4 {
                if j == col {
                    continue;
                }
                sub[k] = m[i * 4 + j];
                k += 1;
            }
        }
        sub[0] * (sub[4] * sub[8] - sub[5] * sub[7])
            - sub[1] * (sub[3] * sub[8] - sub[5] * sub[6])
            + sub[2] * (sub[3] * sub[7] - sub[4] * sub[6])
    }

    fn cofactor(&self, row: usize, col: usize) -> f32 {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(row, col)
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        (0..4).map(|k| self.0[k] * self.cofactor(0, k)).sum()
    }

    /// General inverse via the adjugate (transposed cofactor matrix) divided
    /// by the determinant.
    ///
    /// Fails with [`MatrixError::Singular`] when the determinant is zero.
    /// Callers should treat a near-zero determinant as non-invertible too;
    /// this only rejects the exactly-degenerate case.
    pub fn inverse(&self) -> Result<Mat4, MatrixError> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(MatrixError::Singular);
        }
        let mut inv = [0.0f32; 16];
        for i in 0..4 {
            for j in 0..4 {
                // adjugate: cofactor of (i, j) lands at (j, i)
                inv[j * 4 + i] = self.cofactor(i, j) / det;
            }
        }
        Ok(Mat4(inv))
    }

    /// The transpose of the inverse, for transforming normal vectors
    /// correctly under non-uniform scale.
    pub fn inverse_transpose(&self) -> Result<Mat4, MatrixError> {
        Ok(self.inverse()?.transpose())
    }

    /// Transform a point (w = 1) and perform the perspective divide.
    ///
    /// Returns `None` when the resulting w is too close to zero to divide.
    pub fn transform_point(&self, p: [f32; 3]) -> Option<[f32; 3]> {
        let m = &self.0;
        let x = m[0] * p[0] + m[1] * p[1] + m[2] * p[2] + m[3];
        let y = m[4] * p[0] + m[5] * p[1] + m[6] * p[2] + m[7];
        let z = m[8] * p[0] + m[9] * p[1] + m[10] * p[2] + m[11];
        let w = m[12] * p[0] + m[13] * p[1] + m[14] * p[2] + m[15];
        if w.abs() < 1e-6 {
            return None;
        }
        Some([x / w, y / w, z / w])
    }

    /// Transform a direction (w = 0); no translation, no divide.
    pub fn transform_direction(&self, v: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        [
            m[0] * v[0] + m[1] * v[1] + m[2] * v[2],
            m[4] * v[0] + m[5] * v[1] + m[6] * v[2],
            m[8] * v[0] + m[9] * v[1] + m[10] * v[2],
        ]
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;

    fn approx_eq(a: &Mat4, b: &Mat4, eps: f32) -> bool {
        a.0.iter().zip(b.0.iter()).all(|(x, y)| (x - y).abs() < eps)
    }

    fn sample() -> Mat4 {
        // Non-uniform scale + rotation + translation, comfortably invertible
        Mat4::translation(1.5, -2.0, 3.0)
            * Mat4::rotation_y(0.7)
            * Mat4::rotation_x(-0.3)
            * Mat4::scale(2.0, 0.5, 1.25)
    }

    #[test]
    fn test_identity_laws() {
        let m = sample();
        assert!(approx_eq(&(Mat4::IDENTITY * m), &m, 1e-6));
        assert!(approx_eq(&(m * Mat4::IDENTITY), &m, 1e-6));
    }

    #[test]
    fn test_multiply_matches_nalgebra() {
        let a = sample();
        let b = Mat4::rotation_z(1.1) * Mat4::translation(-4.0, 0.25, 9.0);
        let c = a * b;

        let na = Matrix4::from_row_slice(a.as_slice());
        let nb = Matrix4::from_row_slice(b.as_slice());
        let nc = Matrix4::from_row_slice(c.as_slice());
        assert!((na * nb - nc).norm() < 1e-4);
    }

    #[test]
    fn test_inverse_matches_nalgebra() {
        let m = sample();
        let inv = m.inverse().unwrap();
        let ninv = Matrix4::from_row_slice(m.as_slice())
            .try_inverse()
            .unwrap();
        assert!((Matrix4::from_row_slice(inv.as_slice()) - ninv).norm() < 1e-4);
    }

    #[test]
    fn test_inverse_transpose_round_trip() {
        let m = sample();
        let round = m.inverse_transpose().unwrap().inverse_transpose().unwrap();
        assert!(approx_eq(&round, &m, 1e-3));
    }

    #[test]
    fn test_inverse_times_original_is_identity() {
        let m = sample();
        let product = m.inverse().unwrap() * m;
        assert!(approx_eq(&product, &Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn test_singular_matrix_is_rejected() {
        let zero = Mat4([0.0; 16]);
        assert_eq!(zero.inverse_transpose(), Err(MatrixError::Singular));

        // Rank-deficient: two identical rows
        let mut m = Mat4::IDENTITY;
        m.0[4..8].copy_from_slice(&[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(m.determinant(), 0.0);
        assert_eq!(m.inverse(), Err(MatrixError::Singular));
    }

    #[test]
    fn test_translation_moves_points() {
        let t = Mat4::translation(1.0, 2.0, 3.0);
        let p = t.transform_point([0.0, 0.0, 0.0]).unwrap();
        assert_eq!(p, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let r = Mat4::rotation_y(std::f32::consts::FRAC_PI_3);
        let product = r * r.transpose();
        assert!(approx_eq(&product, &Mat4::IDENTITY, 1e-6));
        assert!((r.determinant() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_direction_ignores_translation() {
        let t = Mat4::translation(5.0, 5.0, 5.0);
        assert_eq!(t.transform_direction([0.0, 0.0, 1.0]), [0.0, 0.0, 1.0]);
    }
}
