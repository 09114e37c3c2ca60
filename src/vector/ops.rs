//! Implementations of `std::ops` and conversion traits.

use std::ops::{Index, Mul, Neg};

use crate::{Error, Vector};

impl Index<usize> for Vector {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.components()[index]
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        -&self
    }
}

/// Vector * Scalar.
impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Self::Output {
        &self * rhs
    }
}

/// Scalar * Vector.
impl Mul<&Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Self::Output {
        rhs.scale(self)
    }
}

impl TryFrom<Vec<f64>> for Vector {
    type Error = Error;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Vector::new(value)
    }
}

impl TryFrom<&[f64]> for Vector {
    type Error = Error;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        Vector::new(value)
    }
}

impl<const N: usize> TryFrom<[f64; N]> for Vector {
    type Error = Error;

    fn try_from(value: [f64; N]) -> Result<Self, Self::Error> {
        Vector::new(value)
    }
}

impl From<Vector> for Vec<f64> {
    #[inline]
    fn from(value: Vector) -> Self {
        value.into_components()
    }
}
