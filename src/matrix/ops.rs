use std::ops::{Index, Mul, Neg};

use crate::{Matrix, Vector};

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            col < self.columns(),
            "column {col} out of bounds for {} columns",
            self.columns()
        );
        &self.data()[row * self.columns() + col]
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Self::Output {
        -&self
    }
}

/// Matrix * Scalar.
impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

/// Scalar * Matrix.
impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Self::Output {
        rhs.scale(self)
    }
}

impl TryFrom<&[Vector]> for Matrix {
    type Error = crate::Error;

    /// Interprets the vectors as columns.
    fn try_from(columns: &[Vector]) -> Result<Self, Self::Error> {
        Matrix::from_columns(columns)
    }
}
