//! Gauss-Jordan elimination.
//!
//! The row operations in here don't validate anything. [`Matrix`] exposes checked versions of them
//! and is the only other caller.

use crate::{num, Matrix};

pub(super) fn swap_rows(data: &mut [f64], columns: usize, a: usize, b: usize) {
    if a == b {
        return;
    }
    for col in 0..columns {
        data.swap(a * columns + col, b * columns + col);
    }
}

pub(super) fn divide_row(data: &mut [f64], columns: usize, row: usize, divisor: f64) {
    for elem in &mut data[row * columns..(row + 1) * columns] {
        *elem /= divisor;
    }
}

/// `target -= multiple * source`
pub(super) fn subtract_row(
    data: &mut [f64],
    columns: usize,
    target: usize,
    multiple: f64,
    source: usize,
) {
    for col in 0..columns {
        let delta = data[source * columns + col] * multiple;
        data[target * columns + col] -= delta;
    }
}

/// A scratch copy of a matrix that is brought into reduced row echelon form in place.
pub(super) struct RowReducer {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl RowReducer {
    pub(super) fn new(matrix: &Matrix) -> Self {
        Self {
            rows: matrix.rows(),
            columns: matrix.columns(),
            data: matrix.data().to_vec(),
        }
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.columns + col]
    }

    /// Runs Gauss-Jordan elimination.
    ///
    /// Rows are processed top to bottom while a pivot column cursor moves left to right. If the
    /// entry under the cursor is zero, the first row further down with a non-zero entry in that
    /// column is swapped in; if there is none, the cursor advances. Once a pivot is found, its row
    /// is divided by it and the pivot column is cleared in every other row.
    pub(super) fn reduce(mut self) -> Self {
        let mut col = 0;
        for row in 0..self.rows {
            while col < self.columns && num::is_zero(self.at(row, col)) {
                match (row + 1..self.rows).find(|&below| !num::is_zero(self.at(below, col))) {
                    Some(below) => swap_rows(&mut self.data, self.columns, row, below),
                    None => col += 1,
                }
            }
            if col == self.columns {
                // everything left is zero
                break;
            }

            let pivot = self.at(row, col);
            divide_row(&mut self.data, self.columns, row, pivot);
            for other in 0..self.rows {
                let factor = self.at(other, col);
                if other != row && !num::is_zero(factor) {
                    subtract_row(&mut self.data, self.columns, other, factor, row);
                }
            }
            col += 1;
        }
        self
    }

    pub(super) fn into_matrix(self) -> Matrix {
        Matrix::from_raw(self.rows, self.columns, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_operations() {
        #[rustfmt::skip]
        let mut data = vec![
            1.0, 2.0,
            3.0, 4.0,
        ];
        swap_rows(&mut data, 2, 0, 1);
        assert_eq!(data, [3.0, 4.0, 1.0, 2.0]);
        divide_row(&mut data, 2, 1, 2.0);
        assert_eq!(data, [3.0, 4.0, 0.5, 1.0]);
        subtract_row(&mut data, 2, 0, 6.0, 1);
        assert_eq!(data, [0.0, -2.0, 0.5, 1.0]);
        swap_rows(&mut data, 2, 1, 1);
        assert_eq!(data, [0.0, -2.0, 0.5, 1.0]);
    }

    #[test]
    fn reduce_skips_zero_columns() {
        #[rustfmt::skip]
        let m = Matrix::from_rows([
            [0.0, 0.0, 2.0],
            [0.0, 3.0, 3.0],
        ]).unwrap();
        let reduced = RowReducer::new(&m).reduce().into_matrix();
        #[rustfmt::skip]
        assert_eq!(reduced, Matrix::from_rows([
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ]).unwrap());
    }

    #[test]
    fn reduce_zero_matrix() {
        let m = Matrix::zeros(3, 2).unwrap();
        let reduced = RowReducer::new(&m).reduce().into_matrix();
        assert_eq!(reduced, m);
    }
}
