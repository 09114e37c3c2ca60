//! Error type shared by every fallible operation in this crate.
//!
//! Results that are *expected* to be absent (the inverse of a singular matrix, the unique solution
//! of a system that has none or infinitely many) are reported as [`None`] instead.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors reported by [`Vector`], [`Matrix`], [`Basis`] and [`LinearTransformation`].
///
/// All of these are raised before any state is modified, so a failed call never leaves a
/// half-updated value behind.
///
/// [`Vector`]: crate::Vector
/// [`Matrix`]: crate::Matrix
/// [`Basis`]: crate::Basis
/// [`LinearTransformation`]: crate::LinearTransformation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The operands of `op` have incompatible dimensions.
    #[error("dimension mismatch in `{op}`: expected {expected}, found {found}")]
    DimensionMismatch {
        op: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("row index {index} out of range for matrix with {rows} rows")]
    RowOutOfRange { index: usize, rows: usize },

    #[error("column index {index} out of range for matrix with {columns} columns")]
    ColumnOutOfRange { index: usize, columns: usize },

    #[error("component index {index} out of range for vector with {components} components")]
    ComponentOutOfRange { index: usize, components: usize },

    /// The arguments do not describe a valid value (ragged grid, linearly dependent basis, ...).
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),

    /// An elementary row operation attempted to divide a row by zero.
    #[error("cannot divide row {row} by zero")]
    DivisionByZero { row: usize },

    /// Change of basis was requested for a transformation whose domain and target bases differ.
    #[error("domain and target bases differ; change of basis is undefined")]
    BasisMismatch,
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConstruction(reason.into())
    }

    pub(crate) fn check_dimension(op: &'static str, expected: usize, found: usize) -> Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::DimensionMismatch {
                op,
                expected,
                found,
            })
        }
    }
}
