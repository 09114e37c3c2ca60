use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use once_cell::sync::{Lazy, OnceCell};

use crate::{num, Error, Matrix, Result, Vector};

/// Standard bases handed out by [`Basis::standard`], keyed by dimension.
static STANDARD_BASES: Lazy<Mutex<HashMap<usize, Basis>>> = Lazy::new(Default::default);

/// An ordered set of linearly independent vectors spanning a subspace of `n`-space.
///
/// The vectors are stored in standard coordinates, whatever basis they were expressed in when the
/// [`Basis`] was created. A basis may be empty, in which case it spans the zero subspace (see
/// [`Basis::zero_subspace`]).
///
/// [`Basis`] is cheap to clone; clones share the same vectors.
///
/// # Equality
///
/// [`PartialEq`] compares the vectors literally, in order. Use [`Basis::same_subspace`] to check
/// whether two bases span the same subspace.
#[derive(Clone)]
pub struct Basis(Arc<Inner>);

struct Inner {
    vectors: Vec<Vector>,
    in_space: usize,
    /// Row-major elements of the inverse change-of-basis matrix, shared by all clones.
    inverse: OnceCell<Option<Vec<f64>>>,
}

impl Basis {
    /// Creates a basis from linearly independent vectors of the same dimension.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConstruction`] if `vectors` is empty or linearly dependent.
    /// - [`Error::DimensionMismatch`] if the vectors have different dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lintrans::*;
    /// let plane = Basis::new([Vector::new([1.0, 0.0, 0.0])?, Vector::new([0.0, 1.0, 1.0])?])?;
    /// assert_eq!((plane.len(), plane.in_space()), (2, 3));
    ///
    /// assert!(Basis::new([Vector::new([1.0, 2.0])?, Vector::new([2.0, 4.0])?]).is_err());
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn new(vectors: impl IntoIterator<Item = Vector>) -> Result<Self> {
        let vectors = vectors
            .into_iter()
            .map(|v| v.to_standard_basis())
            .collect::<Vec<_>>();
        let Some(first) = vectors.first() else {
            return Err(Error::invalid(
                "a basis needs at least one vector, use `Basis::zero_subspace` for {0}",
            ));
        };
        let in_space = first.dimension();
        for v in &vectors {
            Error::check_dimension("Basis::new", in_space, v.dimension())?;
        }
        if !Vector::are_linearly_independent(&vectors)? {
            log::debug!("rejecting dependent basis vectors {vectors:?}");
            return Err(Error::invalid("basis vectors must be linearly independent"));
        }
        Ok(Self::from_parts(vectors, in_space))
    }

    fn from_parts(vectors: Vec<Vector>, in_space: usize) -> Self {
        Self(Arc::new(Inner {
            vectors,
            in_space,
            inverse: OnceCell::new(),
        }))
    }

    /// Returns the empty basis of the zero subspace of `n`-space.
    pub fn zero_subspace(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::invalid("there is no 0-dimensional space"));
        }
        Ok(Self::from_parts(Vec::new(), n))
    }

    /// Returns the standard basis `e_0, ..., e_{n-1}` of `n`-space.
    ///
    /// Standard bases are created once per dimension and shared afterwards.
    ///
    /// ```
    /// # use lintrans::*;
    /// let e = Basis::standard(2)?;
    /// assert!(e.is_standard_basis());
    /// assert_eq!(e.vectors(), [Vector::new([1.0, 0.0])?, Vector::new([0.0, 1.0])?]);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn standard(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::invalid("there is no 0-dimensional space"));
        }
        let mut bases = STANDARD_BASES
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(basis) = bases.get(&n) {
            return Ok(basis.clone());
        }
        let vectors = (0..n)
            .map(|i| Vector::standard(n, i))
            .collect::<Result<Vec<_>>>()?;
        let basis = Self::from_parts(vectors, n);
        bases.insert(n, basis.clone());
        Ok(basis)
    }

    /// Returns the basis vectors, in standard coordinates.
    #[inline]
    pub fn vectors(&self) -> &[Vector] {
        &self.0.vectors
    }

    /// Returns the number of basis vectors (the dimension of the spanned subspace).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.vectors.is_empty()
    }

    /// Returns the dimension of the space the basis vectors live in.
    #[inline]
    pub fn in_space(&self) -> usize {
        self.0.in_space
    }

    /// Returns the matrix whose columns are the basis vectors, or [`None`] for an empty basis.
    ///
    /// For a basis spanning the full space, this is the change-of-basis matrix that maps
    /// coordinates relative to this basis to standard coordinates.
    pub fn as_matrix(&self) -> Option<Matrix> {
        Matrix::from_columns(self.vectors()).ok()
    }

    /// Returns the matrix mapping standard coordinates to coordinates relative to this basis.
    ///
    /// The inverse is computed on first use and memoized.
    pub(crate) fn inverse_matrix(&self) -> Result<Matrix> {
        let inverse = self.0.inverse.get_or_init(|| {
            let inverse = self
                .as_matrix()
                .as_ref()
                .and_then(Matrix::inverse)
                .map(|m| m.data().to_vec());
            log::trace!("change-of-basis inverse of {self:?}: {inverse:?}");
            inverse
        });
        match inverse {
            // only a basis spanning its full space has an inverse, so the matrix is square
            Some(data) => Ok(Matrix::from_raw(self.in_space(), self.in_space(), data.clone())),
            None => Err(Error::invalid(format!(
                "a basis of {} vectors in {}-space has no change-of-basis inverse",
                self.len(),
                self.in_space()
            ))),
        }
    }

    /// Computes the standard coordinates of the point with `coordinates` relative to this basis.
    pub(crate) fn combine(&self, coordinates: &[f64]) -> Vec<f64> {
        debug_assert_eq!(coordinates.len(), self.len());
        (0..self.in_space())
            .map(|i| {
                self.vectors()
                    .iter()
                    .zip(coordinates)
                    .fold(0.0, |acc, (b, c)| acc + c * b.components()[i])
            })
            .collect()
    }

    /// Returns whether the basis vectors span their whole ambient space.
    pub fn spans_full_space(&self) -> bool {
        self.len() == self.in_space()
    }

    /// Returns whether this is the standard basis `e_0, ..., e_{n-1}` (in that order).
    pub fn is_standard_basis(&self) -> bool {
        self.spans_full_space()
            && self.vectors().iter().enumerate().all(|(i, v)| {
                v.components()
                    .iter()
                    .enumerate()
                    .all(|(j, &c)| num::same(c, if i == j { 1.0 } else { 0.0 }))
            })
    }

    /// Returns whether `v` lies in the subspace spanned by this basis.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DimensionMismatch`] if `v` does not live in the ambient space.
    pub fn contains(&self, v: &Vector) -> Result<bool> {
        Error::check_dimension("Basis::contains", self.in_space(), v.dimension())?;
        if self.is_empty() {
            return Ok(v.is_zero());
        }
        v.is_linear_combination_of(self.vectors())
    }

    /// Returns whether `self` and `other` span the same subspace.
    ///
    /// Two bases span the same subspace iff the matrices having the basis vectors as rows have the
    /// same reduced row echelon form.
    ///
    /// ```
    /// # use lintrans::*;
    /// let a = Basis::new([Vector::new([1.0, 1.0, 0.0])?, Vector::new([0.0, 0.0, 1.0])?])?;
    /// let b = Basis::new([Vector::new([2.0, 2.0, 1.0])?, Vector::new([0.0, 0.0, 3.0])?])?;
    /// assert!(a.same_subspace(&b));
    /// assert!(!a.same_subspace(&Basis::new([Vector::new([1.0, 0.0, 0.0])?])?));
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn same_subspace(&self, other: &Basis) -> bool {
        if self.in_space() != other.in_space() || self.len() != other.len() {
            return false;
        }
        match (self.as_matrix(), other.as_matrix()) {
            (Some(a), Some(b)) => {
                let (a, b) = (a.transpose(), b.transpose());
                a.rref() == b.rref()
            }
            // both empty
            _ => true,
        }
    }
}

impl PartialEq for Basis {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.in_space() == other.in_space() && self.vectors() == other.vectors())
    }
}

impl fmt::Debug for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Basis").field(&self.0.vectors).finish()
    }
}

/// Renders the vectors as `{<a, b>, <c, d>}`, passing the precision on to each vector.
impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, v) in self.vectors().iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(v, f)?;
        }
        f.write_str("}")
    }
}
