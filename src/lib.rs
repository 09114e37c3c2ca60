//! Exact linear algebra over real numbers: vectors, matrices, bases, subspaces and linear
//! transformations.
//!
//! # Motivation
//!
//! This library is meant for exploring the textbook algorithms of introductory linear algebra:
//! Gauss-Jordan elimination, solving linear systems, finding inverses, kernels and images, and
//! changing bases. It favors small, inspectable types over performance.
//!
//! # Goals & Non-Goals
//!
//! - Elements are [`f64`] and all comparisons are *exact*. There is no pivoting strategy and no
//!   tolerance: a pivot is any element that isn't exactly zero. Systems whose elements are small
//!   integers or simple fractions produce exact results, ill-conditioned ones may not.
//! - Only dynamically-sized, dense matrices and vectors are supported.
//! - No sparse matrices, decompositions (LU, QR, SVD), determinants or eigenvalues.
//!
//! # Bases and Coordinates
//!
//! A [`Vector`] stores its components relative to a [`Basis`], or to the standard basis if it has
//! none attached. A [`Basis`] always stores its vectors in standard coordinates. Operations on two
//! vectors express their result in the basis of the left-hand operand.
//!
//! # Caching and Threads
//!
//! [`Matrix`] caches its reduced row echelon form and its inverse, and [`LinearTransformation`]
//! caches its inverse. These caches live in the value itself, so neither type is [`Sync`]: a value
//! has a single owner that reads and writes its cache. Clone values to share them between threads.
//! Standard bases are created once per dimension and shared process-wide (see
//! [`Basis::standard`]).
//!
//! # Logging
//!
//! The library logs through the [`log`] crate. Elimination results are logged at *trace* level,
//! absent results (singular matrices, systems without a unique solution) at *debug* level.

use log::LevelFilter;

mod approx;
mod basis;
pub mod error;
mod matrix;
pub mod num;
mod space;
mod transformation;
mod vector;

pub use basis::Basis;
pub use error::{Error, Result};
pub use matrix::Matrix;
pub use space::VectorSpace;
pub use transformation::LinearTransformation;
pub use vector::Vector;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and this library will log at *trace*
/// level. Otherwise, they will log at *debug* level. `RUST_LOG` overrides both.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
