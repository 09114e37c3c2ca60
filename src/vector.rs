use std::fmt;

use itertools::Itertools;

use crate::{
    num::{self, DEFAULT_PRECISION},
    Basis, Error, Matrix, Result,
};

mod ops;

/// An `n`-component column vector of real numbers.
///
/// A [`Vector`] optionally carries the [`Basis`] its components are expressed in. A vector without
/// a basis is expressed in the standard basis of its space. Bases attached to a vector always span
/// the whole space, so the component count and the ambient dimension of the basis agree.
///
/// # Construction
///
/// - [`Vector::new`] creates a vector in standard coordinates.
/// - [`Vector::with_basis`] creates a vector whose components are coordinates relative to a basis.
/// - [`Vector::zero`] and [`Vector::standard`] create the zero vector and the standard basis
///   vectors of a space.
///
/// Vectors are immutable: every operation returns a new [`Vector`].
///
/// # Equality
///
/// Two vectors compare equal when they describe the same point, regardless of the bases they are
/// expressed in. The right-hand side is converted into the basis of the left-hand side before the
/// components are compared (exactly).
///
/// ```
/// # use lintrans::*;
/// let basis = Basis::new([Vector::new([1.0, 1.0])?, Vector::new([0.0, 1.0])?])?;
/// let v = Vector::with_basis([2.0, 1.0], basis)?;
/// assert_eq!(v, Vector::new([2.0, 3.0])?);
/// # Ok::<(), lintrans::Error>(())
/// ```
#[derive(Clone)]
pub struct Vector {
    components: Vec<f64>,
    basis: Option<Basis>,
}

impl Vector {
    /// Creates a vector in standard coordinates.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConstruction`] if `components` is empty.
    pub fn new<C: Into<Vec<f64>>>(components: C) -> Result<Self> {
        let components = components.into();
        if components.is_empty() {
            return Err(Error::invalid("a vector needs at least one component"));
        }
        Ok(Self {
            components,
            basis: None,
        })
    }

    /// Creates a vector whose components are coordinates relative to `basis`.
    ///
    /// If `basis` is the standard basis, the result is indistinguishable from [`Vector::new`].
    ///
    /// # Errors
    ///
    /// Fails if `components` is empty, if `basis` does not span its full ambient space, or if the
    /// number of components differs from the dimension of that space.
    pub fn with_basis<C: Into<Vec<f64>>>(components: C, basis: Basis) -> Result<Self> {
        let mut this = Self::new(components)?;
        Error::check_dimension("Vector::with_basis", basis.in_space(), this.dimension())?;
        if !basis.spans_full_space() {
            return Err(Error::invalid(format!(
                "a basis of {} vectors does not span {}-space",
                basis.len(),
                basis.in_space()
            )));
        }
        if !basis.is_standard_basis() {
            this.basis = Some(basis);
        }
        Ok(this)
    }

    /// Returns the zero vector of `n`-space.
    pub fn zero(n: usize) -> Result<Self> {
        Self::new(vec![0.0; n])
    }

    /// Returns the `i`-th (0-based) standard basis vector of `n`-space.
    ///
    /// ```
    /// # use lintrans::*;
    /// assert_eq!(Vector::standard(3, 1)?.components(), &[0.0, 1.0, 0.0]);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn standard(n: usize, i: usize) -> Result<Self> {
        if i >= n {
            return Err(Error::ComponentOutOfRange {
                index: i,
                components: n,
            });
        }
        let mut components = vec![0.0; n];
        components[i] = 1.0;
        Self::new(components)
    }

    /// Wraps components that are already known to be non-empty.
    pub(crate) fn from_parts(components: Vec<f64>, basis: Option<Basis>) -> Self {
        debug_assert!(!components.is_empty());
        Self { components, basis }
    }

    /// Returns the number of components (the dimension of the space this vector lives in).
    #[inline]
    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    /// Returns the components, expressed in [`Vector::basis`].
    #[inline]
    pub fn components(&self) -> &[f64] {
        &self.components
    }

    /// Returns the component at index `i`.
    pub fn component(&self, i: usize) -> Result<f64> {
        self.components
            .get(i)
            .copied()
            .ok_or(Error::ComponentOutOfRange {
                index: i,
                components: self.dimension(),
            })
    }

    /// Returns the basis the components are expressed in, or [`None`] for the standard basis.
    #[inline]
    pub fn basis(&self) -> Option<&Basis> {
        self.basis.as_ref()
    }

    pub fn into_components(self) -> Vec<f64> {
        self.components
    }

    /// Components of this vector in standard coordinates.
    pub(crate) fn standard_components(&self) -> Vec<f64> {
        match &self.basis {
            None => self.components.clone(),
            Some(basis) => basis.combine(&self.components),
        }
    }

    /// Re-expresses this vector in the coordinates of `basis`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DimensionMismatch`] if `basis` does not live in the same space as this
    /// vector, and with [`Error::InvalidConstruction`] if it does not span that space.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lintrans::*;
    /// let basis = Basis::new([Vector::new([2.0, 0.0])?, Vector::new([0.0, 4.0])?])?;
    /// let v = Vector::new([1.0, 1.0])?.to_basis(&basis)?;
    /// assert_eq!(v.components(), &[0.5, 0.25]);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn to_basis(&self, basis: &Basis) -> Result<Vector> {
        Error::check_dimension("Vector::to_basis", self.dimension(), basis.in_space())?;
        if !basis.spans_full_space() {
            return Err(Error::invalid(format!(
                "cannot express a vector in a basis of {} vectors in {}-space",
                basis.len(),
                basis.in_space()
            )));
        }
        if basis.is_standard_basis() {
            return Ok(self.to_standard_basis());
        }
        if self.basis.as_ref() == Some(basis) {
            return Ok(self.clone());
        }

        let standard = self.standard_components();
        let inverse = basis.inverse_matrix()?;
        Ok(Self::from_parts(inverse.apply(&standard), Some(basis.clone())))
    }

    /// Re-expresses this vector in standard coordinates.
    pub fn to_standard_basis(&self) -> Vector {
        Self::from_parts(self.standard_components(), None)
    }

    /// Expresses `self` in the same basis as `reference`.
    pub(crate) fn in_basis_of(&self, reference: &Vector) -> Result<Vector> {
        match &reference.basis {
            None => {
                Error::check_dimension(
                    "Vector::to_basis",
                    reference.dimension(),
                    self.dimension(),
                )?;
                Ok(self.to_standard_basis())
            }
            Some(basis) => self.to_basis(basis),
        }
    }

    /// Computes the dot product of `self` and `other` in standard coordinates.
    ///
    /// ```
    /// # use lintrans::*;
    /// let a = Vector::new([1.0, 3.0, -5.0])?;
    /// let b = Vector::new([4.0, -2.0, -1.0])?;
    /// assert_eq!(a.dot(&b)?, 3.0);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        Error::check_dimension("Vector::dot", self.dimension(), other.dimension())?;
        let a = self.standard_components();
        let b = other.standard_components();
        Ok(a.iter().zip(&b).fold(0.0, |acc, (a, b)| acc + a * b))
    }

    /// Computes `self + other`. The result is expressed in the basis of `self`.
    pub fn add(&self, other: &Vector) -> Result<Vector> {
        Error::check_dimension("Vector::add", self.dimension(), other.dimension())?;
        let other = other.in_basis_of(self)?;
        let components = self
            .components
            .iter()
            .zip(&other.components)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self::from_parts(components, self.basis.clone()))
    }

    /// Computes `self - other`. The result is expressed in the basis of `self`.
    pub fn subtract(&self, other: &Vector) -> Result<Vector> {
        Error::check_dimension("Vector::subtract", self.dimension(), other.dimension())?;
        self.add(&other.scale(-1.0))
    }

    /// Multiplies every component by `scalar`.
    pub fn scale(&self, scalar: f64) -> Vector {
        let components = self.components.iter().map(|c| c * scalar).collect();
        Self::from_parts(components, self.basis.clone())
    }

    /// Returns the (euclidean) length of this vector.
    pub fn length(&self) -> f64 {
        let standard = self.standard_components();
        standard.iter().fold(0.0, |acc, c| acc + c * c).sqrt()
    }

    /// Returns whether every component is zero.
    ///
    /// This does not depend on the basis: the zero vector has zero coordinates in every basis.
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|&c| num::is_zero(c))
    }

    /// Returns whether `other` is a scalar multiple of `self` (that is, whether they are parallel
    /// or antiparallel).
    ///
    /// The zero vector is only a multiple of itself. Vectors of different dimension are never
    /// multiples of each other.
    pub fn is_scalar_multiple_of(&self, other: &Vector) -> bool {
        if self.dimension() != other.dimension() {
            return false;
        }
        let Ok(other) = other.in_basis_of(self) else {
            return false;
        };
        if self.is_zero() {
            return other.is_zero();
        }

        let multiplier = self
            .components
            .iter()
            .zip(&other.components)
            .find(|(a, _)| !num::is_zero(**a))
            .map_or(0.0, |(a, b)| b / a);
        self.components
            .iter()
            .zip(&other.components)
            .all(|(a, b)| num::same(a * multiplier, *b))
    }

    /// Returns whether the dot product of `self` and `other` is zero.
    pub fn is_orthogonal_to(&self, other: &Vector) -> Result<bool> {
        Ok(num::is_zero(self.dot(other)?))
    }

    /// Returns whether `self` lies in the span of `vectors`.
    ///
    /// This holds iff the linear system whose coefficient columns are `vectors` (converted into the
    /// basis of `self`) and whose right-hand side is `self` is consistent. An empty set of vectors
    /// spans nothing, so the result is `false` for it.
    ///
    /// ```
    /// # use lintrans::*;
    /// let a = Vector::new([1.0, 1.0, 1.0])?;
    /// let b = Vector::new([1.0, 2.0, 3.0])?;
    /// assert!(Vector::new([3.0, 4.0, 5.0])?.is_linear_combination_of(&[a.clone(), b.clone()])?);
    /// assert!(!Vector::new([0.0, 0.0, 1.0])?.is_linear_combination_of(&[a, b])?);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn is_linear_combination_of(&self, vectors: &[Vector]) -> Result<bool> {
        if vectors.is_empty() {
            return Ok(false);
        }
        let columns = vectors
            .iter()
            .map(|v| v.in_basis_of(self))
            .collect::<Result<Vec<_>>>()?;
        Matrix::from_columns(&columns)?.is_consistent_with(self)
    }

    /// Returns whether this vector is a distribution (probability) vector.
    ///
    /// All components (in standard coordinates) must be non-negative, or strictly positive if
    /// `positive` is set, and they must sum to exactly 1.
    pub fn is_distribution_vector(&self, positive: bool) -> bool {
        let mut sum = 0.0;
        for c in self.standard_components() {
            if c < 0.0 || (positive && num::is_zero(c)) {
                return false;
            }
            sum += c;
        }
        num::same(sum, 1.0)
    }

    /// Returns whether `vectors` are linearly independent.
    ///
    /// This is the case iff the matrix whose columns are the vectors (in standard coordinates) has
    /// a trivial nullspace. The empty set is independent.
    ///
    /// # Errors
    ///
    /// Fails if the vectors do not all have the same dimension.
    pub fn are_linearly_independent(vectors: &[Vector]) -> Result<bool> {
        if vectors.is_empty() {
            return Ok(true);
        }
        let columns = vectors
            .iter()
            .map(Vector::to_standard_basis)
            .collect::<Vec<_>>();
        let matrix = Matrix::from_columns(&columns)?;
        Ok(matrix.rank() == matrix.columns())
    }

    /// Greedily selects a linearly independent subset of `vectors` with the same span.
    ///
    /// Vectors are scanned left to right; zero vectors and vectors that are linear combinations of
    /// the ones kept so far are dropped.
    ///
    /// ```
    /// # use lintrans::*;
    /// let vectors = [
    ///     Vector::new([1.0, 1.0, 1.0])?,
    ///     Vector::new([1.0, 2.0, 3.0])?,
    ///     Vector::new([3.0, 4.0, 5.0])?,
    /// ];
    /// assert_eq!(Vector::remove_redundant(&vectors)?, &vectors[..2]);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn remove_redundant(vectors: &[Vector]) -> Result<Vec<Vector>> {
        if let Some(first) = vectors.first() {
            for v in vectors {
                Error::check_dimension(
                    "Vector::remove_redundant",
                    first.dimension(),
                    v.dimension(),
                )?;
            }
        }

        let mut kept: Vec<Vector> = Vec::new();
        for v in vectors {
            if v.is_zero() || v.is_linear_combination_of(&kept)? {
                log::trace!("dropping redundant vector {v}");
                continue;
            }
            kept.push(v.clone());
        }
        Ok(kept)
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        if self.dimension() != other.dimension() {
            return false;
        }
        match other.in_basis_of(self) {
            Ok(other) => self
                .components
                .iter()
                .zip(&other.components)
                .all(|(a, b)| num::same(*a, *b)),
            Err(_) => false,
        }
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tup = f.debug_tuple("Vector");
        tup.field(&self.components);
        if let Some(basis) = &self.basis {
            tup.field(basis);
        }
        tup.finish()
    }
}

/// Renders the components as `<c0, c1, ...>`.
///
/// Integral components are printed without a fractional part, all others with 3 decimal places
/// unless a precision is given (`{:.5}`).
impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        write!(
            f,
            "<{}>",
            self.components
                .iter()
                .map(|&c| num::format_scalar(c, precision))
                .join(", ")
        )
    }
}
