use std::fmt;

use once_cell::unsync::OnceCell;

use crate::{Basis, Error, Matrix, Result, Vector, VectorSpace};

mod factory;

/// A linear map from a domain space to a target space, given by a matrix relative to a basis of
/// each.
///
/// The matrix maps the coordinates of a vector relative to the domain basis to the coordinates of
/// its image relative to the target basis, so it has as many columns as the domain space has
/// dimensions and as many rows as the target space. Both bases must span their whole space.
///
/// # Construction
///
/// - [`LinearTransformation::new`] uses the standard bases.
/// - [`LinearTransformation::with_basis`] uses the same basis for domain and target.
/// - [`LinearTransformation::with_bases`] takes both bases separately.
/// - The factories [`LinearTransformation::rotation`], [`LinearTransformation::reflection`],
///   [`LinearTransformation::orthogonal_projection`], [`LinearTransformation::shear`] and
///   [`LinearTransformation::scaling`] create common geometric maps in standard coordinates.
///
/// The inverse is computed on first use and cached, so this type is not [`Sync`].
#[derive(Clone)]
pub struct LinearTransformation {
    matrix: Matrix,
    domain: Basis,
    target: Basis,
    inverse: OnceCell<Option<Box<LinearTransformation>>>,
}

impl LinearTransformation {
    /// Creates a transformation between the standard bases of `matrix.columns()`-space and
    /// `matrix.rows()`-space.
    pub fn new(matrix: Matrix) -> Result<Self> {
        Self::with_bases(matrix, None, None)
    }

    /// Creates a transformation whose matrix is relative to `basis` on both sides.
    pub fn with_basis(matrix: Matrix, basis: Basis) -> Result<Self> {
        Self::with_bases(matrix, Some(basis.clone()), Some(basis))
    }

    /// Creates a transformation whose matrix is relative to `domain` and `target`.
    ///
    /// A missing basis defaults to the standard basis of the respective space.
    ///
    /// # Errors
    ///
    /// - [`Error::DimensionMismatch`] if `matrix` has not as many columns as `domain` has
    ///   dimensions, or not as many rows as `target`.
    /// - [`Error::InvalidConstruction`] if a basis does not span its whole space.
    pub fn with_bases(
        matrix: Matrix,
        domain: Option<Basis>,
        target: Option<Basis>,
    ) -> Result<Self> {
        let domain = match domain {
            Some(basis) => {
                Error::check_dimension(
                    "LinearTransformation::domain",
                    matrix.columns(),
                    basis.in_space(),
                )?;
                basis
            }
            None => Basis::standard(matrix.columns())?,
        };
        let target = match target {
            Some(basis) => {
                Error::check_dimension(
                    "LinearTransformation::target",
                    matrix.rows(),
                    basis.in_space(),
                )?;
                basis
            }
            None => Basis::standard(matrix.rows())?,
        };
        for (side, basis) in [("domain", &domain), ("target", &target)] {
            if !basis.spans_full_space() {
                return Err(Error::invalid(format!(
                    "{side} basis of {} vectors does not span {}-space",
                    basis.len(),
                    basis.in_space()
                )));
            }
        }

        Ok(Self {
            matrix,
            domain,
            target,
            inverse: OnceCell::new(),
        })
    }

    #[inline]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    #[inline]
    pub fn domain_basis(&self) -> &Basis {
        &self.domain
    }

    #[inline]
    pub fn target_basis(&self) -> &Basis {
        &self.target
    }

    pub fn domain_space(&self) -> VectorSpace {
        VectorSpace::new(self.domain.clone())
    }

    pub fn target_space(&self) -> VectorSpace {
        VectorSpace::new(self.target.clone())
    }

    /// Applies this transformation to `v`.
    ///
    /// `v` may be expressed in any basis; it is converted into the domain basis first. The result
    /// is expressed in the target basis.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DimensionMismatch`] if `v` does not live in the domain space.
    ///
    /// ```
    /// # use lintrans::*;
    /// let t = LinearTransformation::new(Matrix::from_rows([
    ///     [1.0, 1.0],
    ///     [0.0, 1.0],
    ///     [2.0, 0.0],
    /// ])?)?;
    /// assert_eq!(t.transform(&Vector::new([1.0, 2.0])?)?, Vector::new([3.0, 2.0, 2.0])?);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn transform(&self, v: &Vector) -> Result<Vector> {
        Error::check_dimension(
            "LinearTransformation::transform",
            self.domain.in_space(),
            v.dimension(),
        )?;
        let coordinates = v.to_basis(&self.domain)?;
        Vector::with_basis(self.matrix.apply(coordinates.components()), self.target.clone())
    }

    /// Returns the kernel, the subspace of the domain that is mapped to zero.
    ///
    /// ```
    /// # use lintrans::*;
    /// let t = LinearTransformation::new(Matrix::from_rows([[1.0, 1.0]])?)?;
    /// let kernel = t.kernel()?;
    /// assert_eq!(kernel.dimension(), 1);
    /// assert!(kernel.contains(&Vector::new([1.0, -1.0])?)?);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn kernel(&self) -> Result<VectorSpace> {
        let vectors = self
            .matrix
            .nullspace()
            .into_iter()
            .map(|coordinates| {
                Vector::with_basis(coordinates.into_components(), self.domain.clone())
            })
            .collect::<Result<Vec<_>>>()?;
        log::trace!("kernel spanned by {vectors:?}");
        Self::span(vectors, self.domain.in_space())
    }

    /// Returns the image, the subspace of the target spanned by the images of the domain.
    pub fn image(&self) -> Result<VectorSpace> {
        let columns = self
            .matrix
            .column_vectors()
            .into_iter()
            .map(|col| Vector::with_basis(col.into_components(), self.target.clone()))
            .collect::<Result<Vec<_>>>()?;
        let vectors = Vector::remove_redundant(&columns)?;
        Self::span(vectors, self.target.in_space())
    }

    fn span(independent: Vec<Vector>, in_space: usize) -> Result<VectorSpace> {
        let basis = if independent.is_empty() {
            Basis::zero_subspace(in_space)?
        } else {
            Basis::new(independent)?
        };
        Ok(VectorSpace::new(basis))
    }

    /// Returns whether this transformation is invertible.
    pub fn is_isomorphism(&self) -> bool {
        self.matrix.is_invertible()
    }

    /// Returns the inverse transformation, or [`None`] if this is not an isomorphism.
    ///
    /// The inverse maps from the target basis back to the domain basis. It is computed once and
    /// cached.
    pub fn inverse(&self) -> Option<&LinearTransformation> {
        self.inverse
            .get_or_init(|| {
                let matrix = self.matrix.inverse()?.clone();
                Some(Box::new(Self {
                    matrix,
                    domain: self.target.clone(),
                    target: self.domain.clone(),
                    inverse: OnceCell::new(),
                }))
            })
            .as_deref()
    }

    /// Re-expresses this transformation relative to `basis` (on both sides).
    ///
    /// The new matrix is `S_new⁻¹ · S · M · S⁻¹ · S_new`, where `S` and `S_new` are the
    /// change-of-basis matrices of the current and the new basis.
    ///
    /// # Errors
    ///
    /// - [`Error::BasisMismatch`] if the domain and target basis of `self` differ.
    /// - [`Error::DimensionMismatch`] if `basis` lives in a different space.
    /// - [`Error::InvalidConstruction`] if `basis` does not span its whole space.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lintrans::*;
    /// // the projection onto the x-axis...
    /// let t = LinearTransformation::new(Matrix::from_rows([[1.0, 0.0], [0.0, 0.0]])?)?;
    /// let basis = Basis::new([Vector::new([1.0, 1.0])?, Vector::new([0.0, 1.0])?])?;
    /// let u = t.to_basis(&basis)?;
    /// // ...maps (1, 1) to (1, 0) = 1 * (1, 1) - 1 * (0, 1)
    /// assert_eq!(u.matrix().column(0)?.components(), &[1.0, -1.0]);
    /// assert_eq!(u.transform(&Vector::new([1.0, 1.0])?)?, Vector::new([1.0, 0.0])?);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn to_basis(&self, basis: &Basis) -> Result<LinearTransformation> {
        if self.domain != self.target {
            return Err(Error::BasisMismatch);
        }
        Error::check_dimension(
            "LinearTransformation::to_basis",
            self.domain.in_space(),
            basis.in_space(),
        )?;
        if !basis.spans_full_space() {
            return Err(Error::invalid(format!(
                "cannot change to a basis of {} vectors in {}-space",
                basis.len(),
                basis.in_space()
            )));
        }
        if self.domain == *basis {
            return Ok(self.clone());
        }

        let (s, s_inv) = Self::change_of_basis(&self.domain)?;
        let (s_new, s_new_inv) = Self::change_of_basis(basis)?;
        let matrix = s_new_inv
            .multiply(&s)?
            .multiply(&self.matrix)?
            .multiply(&s_inv)?
            .multiply(&s_new)?;
        Self::with_basis(matrix, basis.clone())
    }

    /// Re-expresses this transformation relative to the standard basis.
    pub fn to_standard_basis(&self) -> Result<LinearTransformation> {
        self.to_basis(&Basis::standard(self.domain.in_space())?)
    }

    fn change_of_basis(basis: &Basis) -> Result<(Matrix, Matrix)> {
        let s = basis
            .as_matrix()
            .ok_or_else(|| Error::invalid("the zero subspace has no change-of-basis matrix"))?;
        Ok((s, basis.inverse_matrix()?))
    }
}

impl fmt::Debug for LinearTransformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearTransformation")
            .field("matrix", &self.matrix)
            .field("domain", &self.domain)
            .field("target", &self.target)
            .finish()
    }
}
