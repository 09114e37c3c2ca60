//! Approximate equality for [`Vector`] and [`Matrix`], via the [`approx`] crate.
//!
//! [`PartialEq`] compares exactly, which is rarely useful after trigonometry or repeated
//! elimination. These impls allow using [`approx::assert_abs_diff_eq!`] and
//! [`approx::assert_relative_eq!`] instead. Values of different shape are never approximately
//! equal. Vectors are compared in standard coordinates.

use ::approx::{AbsDiffEq, RelativeEq};

use crate::{Matrix, Vector};

fn all_abs_diff_eq(a: &[f64], b: &[f64], epsilon: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.abs_diff_eq(b, epsilon))
}

fn all_relative_eq(a: &[f64], b: &[f64], epsilon: f64, max_relative: f64) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
}

impl AbsDiffEq for Vector {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        all_abs_diff_eq(
            &self.standard_components(),
            &other.standard_components(),
            epsilon,
        )
    }
}

impl RelativeEq for Vector {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        all_relative_eq(
            &self.standard_components(),
            &other.standard_components(),
            epsilon,
            max_relative,
        )
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.rows() == other.rows() && all_abs_diff_eq(self.data(), other.data(), epsilon)
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.rows() == other.rows()
            && all_relative_eq(self.data(), other.data(), epsilon, max_relative)
    }
}
