use std::fmt;

use crate::{Basis, Result, Vector};

/// A subspace of `n`-space, described by one of its bases.
///
/// Two [`VectorSpace`]s are equal if their bases span the same subspace, even if the bases differ.
///
/// ```
/// # use lintrans::*;
/// let diagonal = VectorSpace::new(Basis::new([Vector::new([1.0, 1.0])?])?);
/// let also_diagonal = VectorSpace::new(Basis::new([Vector::new([-3.0, -3.0])?])?);
/// assert_eq!(diagonal, also_diagonal);
/// assert_eq!(diagonal.to_string(), "1 dimensional subspace of 2-space with basis: {<1, 1>}");
/// # Ok::<(), lintrans::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct VectorSpace {
    basis: Basis,
}

impl VectorSpace {
    pub fn new(basis: Basis) -> Self {
        Self { basis }
    }

    /// Returns `n`-space itself, spanned by its standard basis.
    pub fn real_space(n: usize) -> Result<Self> {
        Basis::standard(n).map(Self::new)
    }

    #[inline]
    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Returns the dimension of this subspace.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.basis.len()
    }

    /// Returns the dimension of the space this subspace lives in.
    #[inline]
    pub fn in_space(&self) -> usize {
        self.basis.in_space()
    }

    /// Returns whether `v` lies in this subspace. See [`Basis::contains`].
    pub fn contains(&self, v: &Vector) -> Result<bool> {
        self.basis.contains(v)
    }
}

impl PartialEq for VectorSpace {
    fn eq(&self, other: &Self) -> bool {
        self.basis == other.basis || self.basis.same_subspace(&other.basis)
    }
}

impl fmt::Display for VectorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} dimensional subspace of {}-space with basis: ",
            self.dimension(),
            self.in_space()
        )?;
        fmt::Display::fmt(&self.basis, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_space() {
        let r3 = VectorSpace::real_space(3).unwrap();
        assert_eq!(r3.dimension(), 3);
        assert_eq!(r3.in_space(), 3);
        assert!(r3.basis().is_standard_basis());
        assert_eq!(r3.contains(&Vector::new([4.0, -1.0, 2.0]).unwrap()), Ok(true));
        assert!(VectorSpace::real_space(0).is_err());
    }

    #[test]
    fn equality() {
        let r2 = VectorSpace::real_space(2).unwrap();
        let skew = VectorSpace::new(
            Basis::new([
                Vector::new([1.0, 2.0]).unwrap(),
                Vector::new([2.0, 1.0]).unwrap(),
            ])
            .unwrap(),
        );
        let line = VectorSpace::new(Basis::new([Vector::new([1.0, 2.0]).unwrap()]).unwrap());
        assert_eq!(r2, skew);
        assert_ne!(r2, line);
        assert_ne!(line, VectorSpace::real_space(1).unwrap());
    }

    #[test]
    fn fmt() {
        let zero = VectorSpace::new(Basis::zero_subspace(2).unwrap());
        assert_eq!(zero.to_string(), "0 dimensional subspace of 2-space with basis: {}");
        assert_eq!(
            VectorSpace::real_space(2).unwrap().to_string(),
            "2 dimensional subspace of 2-space with basis: {<1, 0>, <0, 1>}"
        );
    }
}
