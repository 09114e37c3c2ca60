//! Common geometric transformations, in standard coordinates.

use crate::{Error, LinearTransformation, Matrix, Result, Vector};

impl LinearTransformation {
    /// Creates the counter-clockwise rotation of the plane by `theta` radians.
    ///
    /// ```
    /// # use lintrans::*;
    /// # use approx::assert_abs_diff_eq;
    /// let quarter = LinearTransformation::rotation(std::f64::consts::FRAC_PI_2)?;
    /// let v = quarter.transform(&Vector::new([1.0, 0.0])?)?;
    /// assert_abs_diff_eq!(v, Vector::new([0.0, 1.0])?, epsilon = 1e-15);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn rotation(theta: f64) -> Result<Self> {
        let (sin, cos) = theta.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix::from_rows([
            [cos, -sin],
            [sin, cos],
        ])?;
        Self::new(matrix)
    }

    /// Creates the reflection about the line spanned by `w`.
    ///
    /// The matrix is `2 w wᵀ / (w · w) - I`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConstruction`] if `w` is the zero vector.
    ///
    /// ```
    /// # use lintrans::*;
    /// let mirror = LinearTransformation::reflection(&Vector::new([1.0, 1.0])?)?;
    /// assert_eq!(mirror.transform(&Vector::new([5.0, -3.0])?)?, Vector::new([-3.0, 5.0])?);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn reflection(w: &Vector) -> Result<Self> {
        let matrix = outer_product_over_norm(w, "reflection", |i, j, x| {
            2.0 * x - if i == j { 1.0 } else { 0.0 }
        })?;
        Self::new(matrix)
    }

    /// Creates the orthogonal projection onto the line spanned by `w`.
    ///
    /// The matrix is `w wᵀ / (w · w)`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConstruction`] if `w` is the zero vector.
    pub fn orthogonal_projection(w: &Vector) -> Result<Self> {
        let matrix = outer_product_over_norm(w, "projection", |_, _, x| x)?;
        Self::new(matrix)
    }

    /// Creates a shear of the plane by factor `k`, along the x-axis if `horizontal` is set and
    /// along the y-axis otherwise.
    pub fn shear(horizontal: bool, k: f64) -> Result<Self> {
        let (kx, ky) = if horizontal { (k, 0.0) } else { (0.0, k) };
        #[rustfmt::skip]
        let matrix = Matrix::from_rows([
            [1.0, kx],
            [ky, 1.0],
        ])?;
        Self::new(matrix)
    }

    /// Creates the uniform scaling of `n`-space by factor `k`.
    pub fn scaling(n: usize, k: f64) -> Result<Self> {
        Self::new(Matrix::identity(n)?.scale(k))
    }
}

/// Builds the `n`x`n` matrix with elements `f(i, j, w_i w_j / (w · w))`.
fn outer_product_over_norm(
    w: &Vector,
    what: &str,
    f: impl Fn(usize, usize, f64) -> f64,
) -> Result<Matrix> {
    if w.is_zero() {
        return Err(Error::invalid(format!(
            "a {what} needs a non-zero direction vector"
        )));
    }
    let w = w.to_standard_basis();
    let norm = w.dot(&w)?;
    let n = w.dimension();
    Matrix::from_fn(n, n, |i, j| f(i, j, w[i] * w[j] / norm))
}
