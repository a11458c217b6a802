//! 2x2 Matrix

use super::Vector2f;
use crate::math::Float;
use std::ops::{Index, Mul};

/// A 2x2 matrix containing Float values. Used as a paraxial ray-transfer
/// (ABCD) matrix acting on (height, reduced angle) column vectors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix2x2 {
    /// Stores a 2-D array of Float
    pub m: [[Float; 2]; 2],
}

/// Ientity matrix.
pub const IDENTITY_MATRIX2X2: Matrix2x2 = Matrix2x2 {
    m: [[1.0, 0.0], [0.0, 1.0]],
};

impl Matrix2x2 {
    /// Create a 2x2 matrix from its rows.
    ///
    /// * `a`, `b` - Row 1
    /// * `c`, `d` - Row 2
    pub fn new(a: Float, b: Float, c: Float, d: Float) -> Self {
        Self { m: [[a, b], [c, d]] }
    }

    /// Returns the ray-transfer matrix of a refracting surface with the
    /// given optical power.
    ///
    /// * `power` - Surface power `(n2 - n1) / R`.
    pub fn refraction(power: Float) -> Self {
        Self::new(1.0, 0.0, -power, 1.0)
    }

    /// Returns the ray-transfer matrix of a free-space gap.
    ///
    /// * `distance` - Axial distance.
    /// * `n`        - Refractive index of the medium filling the gap.
    pub fn transfer(distance: Float, n: Float) -> Self {
        Self::new(1.0, distance / n, 0.0, 1.0)
    }

    /// Returns the determinant.
    pub fn determinant(&self) -> Float {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }
}

impl Default for Matrix2x2 {
    /// Returns the identity matrix.
    fn default() -> Self {
        IDENTITY_MATRIX2X2
    }
}

impl Mul<Matrix2x2> for Matrix2x2 {
    type Output = Matrix2x2;

    /// Post-multiply the given matrix.
    ///
    /// * `other` - The other matrix
    fn mul(self, other: Matrix2x2) -> Self::Output {
        let mut m = [[0.0; 2]; 2];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = self.m[i][0] * other.m[0][j] + self.m[i][1] * other.m[1][j];
            }
        }
        Matrix2x2 { m }
    }
}

impl Mul<Vector2f> for Matrix2x2 {
    type Output = Vector2f;

    /// Transform a column vector.
    ///
    /// * `v` - The vector.
    fn mul(self, v: Vector2f) -> Self::Output {
        Vector2f::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y,
            self.m[1][0] * v.x + self.m[1][1] * v.y,
        )
    }
}

impl Index<usize> for Matrix2x2 {
    type Output = [Float; 2];

    /// Index the matrix row. The column can be further indexed from the
    /// returned row.
    ///
    /// * `row` - Row index.
    fn index(&self, row: usize) -> &Self::Output {
        &self.m[row]
    }
}
