use std::fmt;

use itertools::Itertools;
use once_cell::unsync::OnceCell;

use crate::{
    num::{self, DEFAULT_PRECISION},
    Error, Result, Vector,
};

use self::elimination::RowReducer;

mod elimination;
mod ops;

/// A memoized matrix derived from another one.
///
/// `Itself` is stored when the derived matrix is equal to its source (an RREF matrix is its own
/// RREF, an involution is its own inverse), so that no cycle of owned values is needed.
#[derive(Clone)]
enum Derived {
    Itself,
    Other(Box<Matrix>),
}

impl Derived {
    fn new(source: &Matrix, derived: Matrix) -> Self {
        if derived == *source {
            Self::Itself
        } else {
            Self::Other(Box::new(derived))
        }
    }

    fn resolve<'a>(&'a self, source: &'a Matrix) -> &'a Matrix {
        match self {
            Self::Itself => source,
            Self::Other(m) => m,
        }
    }
}

/// A dense, row-major matrix of real numbers with at least one row and one column.
///
/// # Construction
///
/// - [`Matrix::from_rows`] creates a matrix from a rectangular grid of elements.
/// - [`Matrix::from_columns`] creates a matrix whose columns are the components of [`Vector`]s.
/// - [`Matrix::from_fn`] creates each element by invoking a closure with its row and column.
/// - [`Matrix::zeros`] and [`Matrix::identity`] create the zero and identity matrices.
///
/// # Element Access
///
/// [`Matrix`] implements [`Index`] for `(row, column)` tuples, which panics when out of bounds.
/// [`Matrix::get`] returns an [`Option`] and [`Matrix::value`] a [`Result`] instead. Indices are
/// 0-based.
///
/// ```
/// # use lintrans::*;
/// let mat = Matrix::from_rows([
///     [0.0, 1.0],
/// ])?;
/// assert_eq!(mat[(0, 1)], 1.0);
/// assert_eq!(mat.get(0, 2), None);
/// assert!(mat.value(1, 0).is_err());
/// # Ok::<(), lintrans::Error>(())
/// ```
///
/// # Derived Matrices
///
/// The reduced row echelon form ([`Matrix::rref`]) and the inverse ([`Matrix::inverse`]) are
/// computed on first use and kept until the matrix is modified. Because of that, a [`Matrix`] is
/// not [`Sync`]; clone it to hand it to another thread.
///
/// [`Index`]: std::ops::Index
#[derive(Clone)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
    rref: OnceCell<Derived>,
    inverse: OnceCell<Option<Derived>>,
}

impl Matrix {
    /// Wraps row-major `data` whose shape is already known to be valid.
    pub(crate) fn from_raw(rows: usize, columns: usize, data: Vec<f64>) -> Self {
        debug_assert!(rows > 0 && columns > 0);
        debug_assert_eq!(data.len(), rows * columns);
        Self {
            rows,
            columns,
            data,
            rref: OnceCell::new(),
            inverse: OnceCell::new(),
        }
    }

    fn check_shape(rows: usize, columns: usize) -> Result<()> {
        if rows == 0 || columns == 0 {
            return Err(Error::invalid(format!(
                "a matrix needs at least one row and one column, got {rows}x{columns}"
            )));
        }
        Ok(())
    }

    /// Creates a [`Matrix`] from a grid of rows.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConstruction`] if there are no rows, if the first row is empty,
    /// or if the rows differ in length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lintrans::*;
    /// let m = Matrix::from_rows([
    ///     [1.0, 2.0, 3.0],
    ///     [4.0, 5.0, 6.0],
    /// ])?;
    /// assert_eq!((m.rows(), m.columns()), (2, 3));
    /// assert!(Matrix::from_rows([vec![1.0], vec![1.0, 2.0]]).is_err());
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: impl IntoIterator<Item = R>) -> Result<Self> {
        let mut data = Vec::new();
        let mut row_count = 0;
        let mut columns = 0;
        for row in rows {
            let row = row.as_ref();
            if row_count == 0 {
                columns = row.len();
            } else if row.len() != columns {
                return Err(Error::invalid(format!(
                    "row {row_count} has {} elements, expected {columns}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
            row_count += 1;
        }
        Self::check_shape(row_count, columns)?;
        Ok(Self::from_raw(row_count, columns, data))
    }

    /// Creates a [`Matrix`] whose columns are the components of `columns`.
    ///
    /// The components are taken as stored, in whatever basis each vector uses.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConstruction`] if `columns` is empty or the vectors differ in
    /// dimension.
    pub fn from_columns(columns: &[Vector]) -> Result<Self> {
        let Some(first) = columns.first() else {
            return Err(Error::invalid("a matrix needs at least one column"));
        };
        let rows = first.dimension();
        if let Some(v) = columns.iter().find(|v| v.dimension() != rows) {
            return Err(Error::invalid(format!(
                "column vectors must share a dimension, found {} and {}",
                rows,
                v.dimension()
            )));
        }
        Ok(Self::from_fn_unchecked(rows, columns.len(), |row, col| {
            columns[col].components()[row]
        }))
    }

    /// Creates a [`Matrix`] by invoking a closure with the row and column of each element.
    ///
    /// ```
    /// # use lintrans::*;
    /// let m = Matrix::from_fn(2, 3, |row, col| (row * 3 + col) as f64)?;
    /// assert_eq!(m.row(1)?.components(), &[3.0, 4.0, 5.0]);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn from_fn<F>(rows: usize, columns: usize, cb: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        Self::check_shape(rows, columns)?;
        Ok(Self::from_fn_unchecked(rows, columns, cb))
    }

    fn from_fn_unchecked<F>(rows: usize, columns: usize, mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let data = (0..rows)
            .cartesian_product(0..columns)
            .map(|(row, col)| cb(row, col))
            .collect();
        Self::from_raw(rows, columns, data)
    }

    /// Creates a matrix with every element set to 0.
    pub fn zeros(rows: usize, columns: usize) -> Result<Self> {
        Self::from_fn(rows, columns, |_, _| 0.0)
    }

    /// Creates the `n`x`n` identity matrix.
    pub fn identity(n: usize) -> Result<Self> {
        Self::from_fn(n, n, |row, col| if row == col { 1.0 } else { 0.0 })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the elements in row-major order.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.columns + col]
    }

    #[inline]
    fn row_slice(&self, row: usize) -> &[f64] {
        &self.data[row * self.columns..(row + 1) * self.columns]
    }

    fn check_row(&self, index: usize) -> Result<()> {
        if index < self.rows {
            Ok(())
        } else {
            Err(Error::RowOutOfRange {
                index,
                rows: self.rows,
            })
        }
    }

    fn check_column(&self, index: usize) -> Result<()> {
        if index < self.columns {
            Ok(())
        } else {
            Err(Error::ColumnOutOfRange {
                index,
                columns: self.columns,
            })
        }
    }

    /// Returns a reference to the element at `row` and `col`, or [`None`] if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&f64> {
        if row < self.rows && col < self.columns {
            self.data.get(row * self.columns + col)
        } else {
            None
        }
    }

    /// Returns the element at `row` and `col`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::RowOutOfRange`] or [`Error::ColumnOutOfRange`].
    pub fn value(&self, row: usize, col: usize) -> Result<f64> {
        self.check_row(row)?;
        self.check_column(col)?;
        Ok(self.at(row, col))
    }

    /// Returns row `index` as a [`Vector`].
    pub fn row(&self, index: usize) -> Result<Vector> {
        self.check_row(index)?;
        Ok(Vector::from_parts(self.row_slice(index).to_vec(), None))
    }

    /// Returns column `index` as a [`Vector`].
    pub fn column(&self, index: usize) -> Result<Vector> {
        self.check_column(index)?;
        Ok(self.column_unchecked(index))
    }

    fn column_unchecked(&self, index: usize) -> Vector {
        let components = (0..self.rows).map(|row| self.at(row, index)).collect();
        Vector::from_parts(components, None)
    }

    pub fn row_vectors(&self) -> Vec<Vector> {
        (0..self.rows)
            .map(|row| Vector::from_parts(self.row_slice(row).to_vec(), None))
            .collect()
    }

    pub fn column_vectors(&self) -> Vec<Vector> {
        (0..self.columns)
            .map(|col| self.column_unchecked(col))
            .collect()
    }

    /// Returns a copy of the elements as a grid of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.columns).map(<[f64]>::to_vec).collect()
    }

    /// Returns the transpose of this matrix, flipping it along its diagonal.
    ///
    /// ```
    /// # use lintrans::*;
    /// let m = Matrix::from_rows([
    ///     [1.0, 2.0, 3.0],
    /// ])?;
    /// assert_eq!(m.transpose(), Matrix::from_rows([[1.0], [2.0], [3.0]])?);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn transpose(&self) -> Matrix {
        Self::from_fn_unchecked(self.columns, self.rows, |row, col| self.at(col, row))
    }

    /// Drops the memoized RREF and inverse. Must be called after every modification.
    fn invalidate(&mut self) {
        self.rref.take();
        self.inverse.take();
    }

    /// Overwrites a single element and returns the previous value.
    pub fn set_value(&mut self, row: usize, col: usize, value: f64) -> Result<f64> {
        self.check_row(row)?;
        self.check_column(col)?;
        self.invalidate();
        let index = row * self.columns + col;
        Ok(std::mem::replace(&mut self.data[index], value))
    }

    /// Overwrites row `index` with the components of `row` and returns the previous row.
    pub fn set_row(&mut self, index: usize, row: &Vector) -> Result<Vector> {
        self.check_row(index)?;
        Error::check_dimension("Matrix::set_row", self.columns, row.dimension())?;
        self.invalidate();
        let start = index * self.columns;
        let old = self.data[start..start + self.columns].to_vec();
        self.data[start..start + self.columns].copy_from_slice(row.components());
        Ok(Vector::from_parts(old, None))
    }

    /// Overwrites column `index` with the components of `column` and returns the previous column.
    pub fn set_column(&mut self, index: usize, column: &Vector) -> Result<Vector> {
        self.check_column(index)?;
        Error::check_dimension("Matrix::set_column", self.rows, column.dimension())?;
        self.invalidate();
        let old = self.column_unchecked(index);
        for (row, value) in column.components().iter().enumerate() {
            self.data[row * self.columns + index] = *value;
        }
        Ok(old)
    }

    /// Replaces all elements (and possibly the shape) of this matrix.
    ///
    /// The grid is validated like in [`Matrix::from_rows`]. On failure the matrix is unchanged.
    pub fn set_contents<R: AsRef<[f64]>>(
        &mut self,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<()> {
        *self = Self::from_rows(rows)?;
        Ok(())
    }

    /// Swaps rows `a` and `b`.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_row(a)?;
        self.check_row(b)?;
        self.invalidate();
        elimination::swap_rows(&mut self.data, self.columns, a, b);
        Ok(())
    }

    /// Divides every element of `row` by `divisor`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DivisionByZero`] if `divisor` is zero.
    pub fn divide_row(&mut self, row: usize, divisor: f64) -> Result<()> {
        self.check_row(row)?;
        if num::is_zero(divisor) {
            return Err(Error::DivisionByZero { row });
        }
        self.invalidate();
        elimination::divide_row(&mut self.data, self.columns, row, divisor);
        Ok(())
    }

    /// Subtracts `multiple` times row `source` from row `target`.
    pub fn subtract_row(&mut self, target: usize, multiple: f64, source: usize) -> Result<()> {
        self.check_row(target)?;
        self.check_row(source)?;
        self.invalidate();
        elimination::subtract_row(&mut self.data, self.columns, target, multiple, source);
        Ok(())
    }

    /// Returns the reduced row echelon form of this matrix.
    ///
    /// The result is computed by Gauss-Jordan elimination with exact comparisons and cached until
    /// the matrix is modified. If the matrix is already in RREF, `self` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lintrans::*;
    /// let m = Matrix::from_rows([
    ///     [1.0, 2.0, 3.0],
    ///     [2.0, 4.0, 7.0],
    /// ])?;
    /// assert_eq!(*m.rref(), Matrix::from_rows([
    ///     [1.0, 2.0, 0.0],
    ///     [0.0, 0.0, 1.0],
    /// ])?);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn rref(&self) -> &Matrix {
        self.rref
            .get_or_init(|| {
                let reduced = RowReducer::new(self).reduce().into_matrix();
                log::trace!("rref of {}x{} matrix:\n{reduced}", self.rows, self.columns);
                Derived::new(self, reduced)
            })
            .resolve(self)
    }

    /// Returns whether this matrix is in reduced row echelon form.
    pub fn is_rref(&self) -> bool {
        std::ptr::eq(self.rref(), self)
    }

    /// Returns the column of the leading non-zero element in `row`.
    fn leading_column(&self, row: usize) -> Option<usize> {
        self.row_slice(row).iter().position(|&x| !num::is_zero(x))
    }

    /// Returns the rank of this matrix, the number of pivot columns of its RREF.
    pub fn rank(&self) -> usize {
        self.rank_with(false)
    }

    /// Returns the rank, treating the last column as the right-hand side of a linear system if
    /// `augmented` is set.
    ///
    /// Pivots in the last column are not counted in that case, so the result is the rank of the
    /// coefficient matrix.
    pub fn rank_with(&self, augmented: bool) -> usize {
        let rref = self.rref();
        let limit = self.columns - usize::from(augmented);
        (0..rref.rows)
            .filter(|&row| rref.leading_column(row).map_or(false, |col| col < limit))
            .count()
    }

    /// Returns the inverse of this matrix, or [`None`] if it is not square or singular.
    ///
    /// The identity is appended to the matrix and the result brought into RREF; if the left half
    /// then is the identity, the right half is the inverse. The result is cached until the matrix
    /// is modified.
    ///
    /// ```
    /// # use lintrans::*;
    /// let m = Matrix::from_rows([
    ///     [2.0, 0.0],
    ///     [0.0, 4.0],
    /// ])?;
    /// assert_eq!(m.inverse(), Some(&Matrix::from_rows([[0.5, 0.0], [0.0, 0.25]])?));
    /// assert_eq!(Matrix::from_rows([[1.0, 2.0], [2.0, 4.0]])?.inverse(), None);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn inverse(&self) -> Option<&Matrix> {
        self.inverse
            .get_or_init(|| {
                if !self.is_square() {
                    return None;
                }
                let n = self.rows;
                let augmented = self.append(&Matrix::identity(n).ok()?).ok()?;
                let rref = augmented.rref();
                if !rref.splice(0, n).ok()?.is_identity() {
                    log::debug!("{n}x{n} matrix is singular");
                    return None;
                }
                Some(Derived::new(self, rref.splice_from(n).ok()?))
            })
            .as_ref()
            .map(|derived| derived.resolve(self))
    }

    /// Returns whether this matrix is square and has full rank.
    pub fn is_invertible(&self) -> bool {
        self.is_square() && self.rank() == self.rows
    }

    /// Solves the linear system described by this augmented matrix `[A | b]`.
    ///
    /// Returns the unique solution `x` of `A x = b`, or [`None`] if the system has no solution or
    /// infinitely many. Matrices with a single column have no coefficients and never yield a
    /// solution.
    ///
    /// ```
    /// # use lintrans::*;
    /// let system = Matrix::from_rows([
    ///     [1.0, 1.0, 3.0],
    ///     [1.0, -1.0, 1.0],
    /// ])?;
    /// assert_eq!(system.find_solution(), Some(Vector::new([2.0, 1.0])?));
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn find_solution(&self) -> Option<Vector> {
        if self.columns < 2 {
            return None;
        }
        let unknowns = self.columns - 1;
        if self.rank_with(true) != unknowns {
            log::debug!("system has no unique solution");
            return None;
        }
        if !self.is_consistent() {
            log::debug!("system is inconsistent");
            return None;
        }
        let rref = self.rref();
        let solution = (0..unknowns).map(|row| rref.at(row, unknowns)).collect();
        Some(Vector::from_parts(solution, None))
    }

    /// Solves `self * x = b`. See [`Matrix::find_solution`].
    pub fn find_solution_with(&self, b: &Vector) -> Result<Option<Vector>> {
        Ok(self.augment(b)?.find_solution())
    }

    /// Returns whether the linear system described by this augmented matrix `[A | b]` has at least
    /// one solution.
    ///
    /// The system is inconsistent iff its RREF has a row whose coefficients are all zero but whose
    /// last element is not. A matrix with a single column is always considered consistent.
    pub fn is_consistent(&self) -> bool {
        if self.columns == 1 {
            return true;
        }
        let rref = self.rref();
        let last = self.columns - 1;
        // zero coefficient rows are at the bottom of the RREF
        !(0..rref.rows)
            .rev()
            .take_while(|&row| rref.row_slice(row)[..last].iter().all(|&x| num::is_zero(x)))
            .any(|row| !num::is_zero(rref.at(row, last)))
    }

    /// Returns whether `self * x = b` has at least one solution.
    pub fn is_consistent_with(&self, b: &Vector) -> Result<bool> {
        Ok(self.augment(b)?.is_consistent())
    }

    /// Returns a basis of the nullspace (the solutions of `self * x = 0`).
    ///
    /// There is one vector per free (non-pivot) column of the RREF. It has a 1 at the free column,
    /// the negated RREF entries of that column at the pivot columns, and 0 everywhere else. The
    /// result is empty iff the columns are linearly independent.
    ///
    /// ```
    /// # use lintrans::*;
    /// let m = Matrix::from_rows([
    ///     [1.0, 2.0],
    ///     [2.0, 4.0],
    /// ])?;
    /// assert_eq!(m.nullspace(), [Vector::new([-2.0, 1.0])?]);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn nullspace(&self) -> Vec<Vector> {
        let rref = self.rref();
        let pivots = (0..rref.rows)
            .filter_map(|row| rref.leading_column(row).map(|col| (row, col)))
            .collect::<Vec<_>>();
        (0..self.columns)
            .filter(|col| !pivots.iter().any(|(_, pivot)| pivot == col))
            .map(|free| {
                let mut components = vec![0.0; self.columns];
                components[free] = 1.0;
                for &(row, pivot) in &pivots {
                    components[pivot] = 0.0 - rref.at(row, free);
                }
                Vector::from_parts(components, None)
            })
            .collect()
    }

    /// Computes `self + other`.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with("Matrix::add", other, |a, b| a + b)
    }

    /// Computes `self - other`.
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with("Matrix::subtract", other, |a, b| a - b)
    }

    fn zip_with(
        &self,
        op: &'static str,
        other: &Matrix,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Matrix> {
        Error::check_dimension(op, self.rows, other.rows)?;
        Error::check_dimension(op, self.columns, other.columns)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Self::from_raw(self.rows, self.columns, data))
    }

    /// Multiplies every element by `scalar`.
    pub fn scale(&self, scalar: f64) -> Matrix {
        let data = self.data.iter().map(|x| x * scalar).collect();
        Self::from_raw(self.rows, self.columns, data)
    }

    /// Computes the matrix-vector product of raw components. `x` must have `columns` elements.
    pub(crate) fn apply(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.columns);
        (0..self.rows)
            .map(|row| {
                self.row_slice(row)
                    .iter()
                    .zip(x)
                    .fold(0.0, |acc, (a, b)| acc + a * b)
            })
            .collect()
    }

    /// Computes `self * v`, using the components of `v` as stored.
    pub fn multiply_vector(&self, v: &Vector) -> Result<Vector> {
        Error::check_dimension("Matrix::multiply_vector", self.columns, v.dimension())?;
        Ok(Vector::from_parts(self.apply(v.components()), None))
    }

    /// Computes the matrix product `self * other`, one column of `other` at a time.
    ///
    /// ```
    /// # use lintrans::*;
    /// let a = Matrix::from_rows([[1.0, 2.0], [3.0, 4.0]])?;
    /// let b = Matrix::from_rows([[0.0, 1.0], [1.0, 0.0]])?;
    /// assert_eq!(a.multiply(&b)?, Matrix::from_rows([[2.0, 1.0], [4.0, 3.0]])?);
    /// # Ok::<(), lintrans::Error>(())
    /// ```
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        Error::check_dimension("Matrix::multiply", self.columns, other.rows)?;
        let columns = other
            .column_vectors()
            .iter()
            .map(|col| self.multiply_vector(col))
            .collect::<Result<Vec<_>>>()?;
        Matrix::from_columns(&columns)
    }

    /// Returns a copy of this matrix with `column` appended as a new last column.
    pub fn augment(&self, column: &Vector) -> Result<Matrix> {
        Error::check_dimension("Matrix::augment", self.rows, column.dimension())?;
        Ok(Self::from_fn_unchecked(self.rows, self.columns + 1, |row, col| {
            if col < self.columns {
                self.at(row, col)
            } else {
                column.components()[row]
            }
        }))
    }

    /// Returns the matrix `[self | other]`.
    pub fn append(&self, other: &Matrix) -> Result<Matrix> {
        Error::check_dimension("Matrix::append", self.rows, other.rows)?;
        Ok(Self::from_fn_unchecked(
            self.rows,
            self.columns + other.columns,
            |row, col| {
                if col < self.columns {
                    self.at(row, col)
                } else {
                    other.at(row, col - self.columns)
                }
            },
        ))
    }

    /// Returns the columns `start..end` as a new matrix.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ColumnOutOfRange`] unless `start < end <= self.columns()`.
    pub fn splice(&self, start: usize, end: usize) -> Result<Matrix> {
        if end > self.columns {
            return Err(Error::ColumnOutOfRange {
                index: end,
                columns: self.columns,
            });
        }
        if start >= end {
            return Err(Error::ColumnOutOfRange {
                index: start,
                columns: end,
            });
        }
        Ok(Self::from_fn_unchecked(self.rows, end - start, |row, col| {
            self.at(row, start + col)
        }))
    }

    /// Returns the columns from `start` to the end as a new matrix.
    pub fn splice_from(&self, start: usize) -> Result<Matrix> {
        self.splice(start, self.columns)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    fn all_elements(&self, mut f: impl FnMut(usize, usize, f64) -> bool) -> bool {
        (0..self.rows)
            .cartesian_product(0..self.columns)
            .all(|(row, col)| f(row, col, self.at(row, col)))
    }

    /// Returns whether this matrix is square and zero outside of its diagonal.
    pub fn is_diagonal(&self) -> bool {
        self.is_square() && self.all_elements(|row, col, x| row == col || num::is_zero(x))
    }

    /// Returns whether this matrix is square and zero below its diagonal.
    pub fn is_upper_triangular(&self) -> bool {
        self.is_square() && self.all_elements(|row, col, x| row <= col || num::is_zero(x))
    }

    /// Returns whether this matrix is square and zero above its diagonal.
    pub fn is_lower_triangular(&self) -> bool {
        self.is_square() && self.all_elements(|row, col, x| row >= col || num::is_zero(x))
    }

    pub fn is_identity(&self) -> bool {
        self.is_square()
            && self.all_elements(|row, col, x| num::same(x, if row == col { 1.0 } else { 0.0 }))
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&x| num::is_zero(x))
    }

    /// Returns whether every column of this matrix is a distribution vector.
    pub fn is_transition_matrix(&self) -> bool {
        self.is_transition(false)
    }

    /// Like [`Matrix::is_transition_matrix`], but every element must also be strictly positive.
    pub fn is_positive_transition_matrix(&self) -> bool {
        self.is_transition(true)
    }

    fn is_transition(&self, positive: bool) -> bool {
        self.column_vectors()
            .iter()
            .all(|col| col.is_distribution_vector(positive))
    }
}

/// Compares shape and elements. Memoized derived matrices are ignored.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| num::same(*a, *b))
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Matrix(")?;
        f.debug_list().entries(self.data.chunks(self.columns)).finish()?;
        f.write_str(")")
    }
}

/// Renders one line per row, with the elements right-aligned in their columns.
///
/// ```
/// # use lintrans::*;
/// let m = Matrix::from_rows([
///     [1.0, -2.0],
///     [1000.0, 0.5],
/// ])?;
/// assert_eq!(m.to_string(), "|     1    -2 |\n| 1,000 0.500 |");
/// assert_eq!(format!("{m:.1}"), "|     1  -2 |\n| 1,000 0.5 |");
/// # Ok::<(), lintrans::Error>(())
/// ```
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        let cells = self
            .data
            .iter()
            .map(|&x| num::group_thousands(&num::format_scalar(x, precision)))
            .collect::<Vec<_>>();
        let widths = (0..self.columns)
            .map(|col| {
                (0..self.rows)
                    .map(|row| cells[row * self.columns + col].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect::<Vec<_>>();

        for row in 0..self.rows {
            if row != 0 {
                f.write_str("\n")?;
            }
            f.write_str("|")?;
            for (col, &width) in widths.iter().enumerate() {
                write!(f, " {:>width$}", cells[row * self.columns + col])?;
            }
            f.write_str(" |")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v<const N: usize>(components: [f64; N]) -> Vector {
        Vector::new(components).unwrap()
    }

    fn m<const R: usize, const C: usize>(rows: [[f64; C]; R]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn construction() {
        assert!(Matrix::from_rows(Vec::<Vec<f64>>::new()).is_err());
        assert!(Matrix::from_rows([Vec::<f64>::new()]).is_err());
        assert!(Matrix::from_rows([vec![1.0, 2.0], vec![3.0]]).is_err());
        assert!(Matrix::zeros(0, 3).is_err());
        assert!(Matrix::from_columns(&[]).is_err());
        assert!(Matrix::from_columns(&[v([1.0]), v([1.0, 2.0])]).is_err());

        let cols = Matrix::from_columns(&[v([1.0, 2.0]), v([3.0, 4.0])]).unwrap();
        #[rustfmt::skip]
        assert_eq!(cols, m([
            [1.0, 3.0],
            [2.0, 4.0],
        ]));
        assert_eq!(cols.transpose(), m([[1.0, 2.0], [3.0, 4.0]]));
        assert!(Matrix::identity(3).unwrap().is_identity());
        assert!(Matrix::zeros(2, 3).unwrap().is_zero());
    }

    #[test]
    fn access() {
        let mut mat = m([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(mat.value(1, 2), Ok(6.0));
        assert_eq!(
            mat.value(2, 0),
            Err(Error::RowOutOfRange { index: 2, rows: 2 })
        );
        assert_eq!(
            mat.value(0, 3),
            Err(Error::ColumnOutOfRange {
                index: 3,
                columns: 3
            })
        );
        assert_eq!(mat.row(0).unwrap(), v([1.0, 2.0, 3.0]));
        assert_eq!(mat.column(1).unwrap(), v([2.0, 5.0]));
        assert_eq!(mat.row_vectors().len(), 2);
        assert_eq!(mat.column_vectors().len(), 3);
        assert_eq!(mat.to_rows(), vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);

        assert_eq!(mat.set_value(0, 0, 9.0), Ok(1.0));
        assert_eq!(mat[(0, 0)], 9.0);
        assert_eq!(mat.set_row(1, &v([0.0, 0.0, 0.0])), Ok(v([4.0, 5.0, 6.0])));
        assert_eq!(mat.set_column(2, &v([7.0, 8.0])), Ok(v([3.0, 0.0])));
        assert_eq!(mat, m([[9.0, 2.0, 7.0], [0.0, 0.0, 8.0]]));
        assert!(mat.set_row(0, &v([1.0])).is_err());
        assert!(mat.set_column(0, &v([1.0])).is_err());

        assert!(mat.set_contents([vec![1.0], vec![2.0, 3.0]]).is_err());
        assert_eq!(mat.rows(), 2);
        mat.set_contents([[1.0]]).unwrap();
        assert_eq!(mat, m([[1.0]]));
    }

    #[test]
    fn row_operations() {
        let mut mat = m([[2.0, 4.0], [1.0, 3.0]]);
        mat.swap_rows(0, 1).unwrap();
        assert_eq!(mat, m([[1.0, 3.0], [2.0, 4.0]]));
        mat.divide_row(1, 2.0).unwrap();
        assert_eq!(mat, m([[1.0, 3.0], [1.0, 2.0]]));
        mat.subtract_row(1, 1.0, 0).unwrap();
        assert_eq!(mat, m([[1.0, 3.0], [0.0, -1.0]]));

        assert_eq!(mat.divide_row(0, 0.0), Err(Error::DivisionByZero { row: 0 }));
        assert!(mat.swap_rows(0, 2).is_err());
        assert!(mat.subtract_row(2, 1.0, 0).is_err());
        assert_eq!(mat, m([[1.0, 3.0], [0.0, -1.0]]));
    }

    #[test]
    fn rref() {
        #[rustfmt::skip]
        let mat = m([
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 7.0],
        ]);
        #[rustfmt::skip]
        let expected = m([
            [1.0, 2.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        assert_eq!(*mat.rref(), expected);
        assert!(!mat.is_rref());
        assert!(mat.rref().is_rref());
        assert!(expected.is_rref());
        assert!(std::ptr::eq(expected.rref(), &expected));
        assert_eq!(mat.rank(), 2);
        assert_eq!(mat.rank_with(true), 1);
    }

    #[test]
    fn rref_needs_row_swap() {
        #[rustfmt::skip]
        let mat = m([
            [0.0, 1.0],
            [2.0, 0.0],
        ]);
        assert_eq!(*mat.rref(), Matrix::identity(2).unwrap());
    }

    #[test]
    fn modification_invalidates_cache() {
        let mut mat = m([[1.0, 2.0], [2.0, 4.0]]);
        assert_eq!(mat.rank(), 1);
        assert!(mat.inverse().is_none());
        mat.set_value(1, 1, 5.0).unwrap();
        assert_eq!(mat.rank(), 2);
        assert!(mat.inverse().is_some());
        mat.swap_rows(0, 1).unwrap();
        assert_eq!(mat.inverse().unwrap()[(0, 0)], -2.0);
    }

    #[test]
    fn inverse() {
        #[rustfmt::skip]
        let mat = m([
            [1.0, 2.0],
            [3.0, 4.0],
        ]);
        #[rustfmt::skip]
        assert_eq!(mat.inverse(), Some(&m([
            [-2.0, 1.0],
            [1.5, -0.5],
        ])));
        assert!(mat.is_invertible());

        // involutions are their own inverse
        let swap = m([[0.0, 1.0], [1.0, 0.0]]);
        assert!(std::ptr::eq(swap.inverse().unwrap(), &swap));

        assert_eq!(m([[1.0, 2.0, 3.0]]).inverse(), None);
        assert!(!m([[1.0, 2.0, 3.0]]).is_invertible());
        assert_eq!(m([[0.0]]).inverse(), None);
        assert!(!m([[1.0, 1.0], [1.0, 1.0]]).is_invertible());
    }

    #[test]
    fn solve_unique() {
        #[rustfmt::skip]
        let system = m([
            [1.0, 1.0, 3.0],
            [1.0, -1.0, 1.0],
        ]);
        assert!(system.is_consistent());
        assert_eq!(system.find_solution(), Some(v([2.0, 1.0])));

        let a = m([[2.0, 0.0], [0.0, 4.0]]);
        assert_eq!(a.find_solution_with(&v([1.0, 1.0])), Ok(Some(v([0.5, 0.25]))));
        assert!(a.find_solution_with(&v([1.0])).is_err());
    }

    #[test]
    fn solve_overdetermined() {
        // 3 equations, 2 unknowns, consistent
        #[rustfmt::skip]
        let system = m([
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 2.0],
            [1.0, 1.0, 3.0],
        ]);
        assert_eq!(system.find_solution(), Some(v([1.0, 2.0])));

        // same, but the third equation contradicts the others
        #[rustfmt::skip]
        let system = m([
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 2.0],
            [1.0, 1.0, 4.0],
        ]);
        assert!(!system.is_consistent());
        assert_eq!(system.find_solution(), None);
    }

    #[test]
    fn solve_underdetermined() {
        let system = m([[1.0, 1.0, 2.0]]);
        assert!(system.is_consistent());
        assert_eq!(system.rank_with(true), 1);
        assert_eq!(system.find_solution(), None);
    }

    #[test]
    fn single_column_systems() {
        assert_eq!(m([[0.0], [0.0]]).find_solution(), None);
        assert!(m([[0.0], [0.0]]).is_consistent());
        assert!(m([[0.0], [1.0]]).is_consistent());
        assert!(m([[1.0]]).is_consistent());
        assert_eq!(m([[1.0]]).find_solution(), None);
    }

    #[test]
    fn consistency_with() {
        let a = m([[1.0, 2.0], [2.0, 4.0]]);
        assert_eq!(a.is_consistent_with(&v([1.0, 2.0])), Ok(true));
        assert_eq!(a.is_consistent_with(&v([1.0, 3.0])), Ok(false));
        assert!(a.is_consistent_with(&v([1.0])).is_err());
    }

    #[test]
    fn nullspace() {
        #[rustfmt::skip]
        let mat = m([
            [1.0, 2.0, 0.0, 3.0],
            [0.0, 0.0, 1.0, 4.0],
        ]);
        let null = mat.nullspace();
        assert_eq!(null, [v([-2.0, 1.0, 0.0, 0.0]), v([-3.0, 0.0, -4.0, 1.0])]);
        for n in &null {
            assert!(mat.multiply_vector(n).unwrap().is_zero());
        }
        assert!(Matrix::identity(3).unwrap().nullspace().is_empty());
        assert_eq!(Matrix::zeros(1, 2).unwrap().nullspace().len(), 2);
    }

    #[test]
    fn arithmetic() {
        let a = m([[1.0, 2.0], [3.0, 4.0]]);
        let b = m([[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(a.add(&b).unwrap(), m([[1.0, 3.0], [4.0, 4.0]]));
        assert_eq!(a.subtract(&a).unwrap(), Matrix::zeros(2, 2).unwrap());
        assert_eq!(a.scale(2.0), m([[2.0, 4.0], [6.0, 8.0]]));
        assert_eq!(a.multiply(&b).unwrap(), m([[2.0, 1.0], [4.0, 3.0]]));
        assert_eq!(b.multiply(&a).unwrap(), m([[3.0, 4.0], [1.0, 2.0]]));
        assert_eq!(a.multiply_vector(&v([1.0, 1.0])).unwrap(), v([3.0, 7.0]));

        let wide = m([[1.0, 2.0, 3.0]]);
        assert!(a.add(&wide).is_err());
        assert!(a.multiply(&wide.transpose()).is_err());
        assert_eq!(
            wide.multiply(&wide.transpose()).unwrap(),
            m([[14.0]])
        );
        assert!(matches!(
            a.multiply_vector(&v([1.0])),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn augment_and_splice() {
        let a = m([[1.0, 2.0], [3.0, 4.0]]);
        let aug = a.augment(&v([5.0, 6.0])).unwrap();
        assert_eq!(aug, m([[1.0, 2.0, 5.0], [3.0, 4.0, 6.0]]));
        assert!(a.augment(&v([1.0])).is_err());

        let appended = a.append(&Matrix::identity(2).unwrap()).unwrap();
        assert_eq!(appended.columns(), 4);
        assert_eq!(appended.splice(0, 2).unwrap(), a);
        assert!(appended.splice_from(2).unwrap().is_identity());
        assert_eq!(aug.splice(1, 2).unwrap(), m([[2.0], [4.0]]));
        assert!(aug.splice(2, 2).is_err());
        assert!(aug.splice(0, 4).is_err());
        assert!(a.append(&m([[1.0]])).is_err());
    }

    #[test]
    fn predicates() {
        assert!(m([[1.0, 0.0], [0.0, 2.0]]).is_diagonal());
        assert!(!m([[1.0, 1.0], [0.0, 2.0]]).is_diagonal());
        assert!(m([[1.0, 1.0], [0.0, 2.0]]).is_upper_triangular());
        assert!(!m([[1.0, 1.0], [0.0, 2.0]]).is_lower_triangular());
        assert!(m([[1.0, 0.0], [5.0, 2.0]]).is_lower_triangular());
        assert!(!m([[1.0, 0.0, 0.0]]).is_diagonal());
        assert!(!m([[1.0, 0.0], [0.0, 2.0]]).is_identity());
        assert!(!m([[1.0, 0.0]]).is_identity());

        #[rustfmt::skip]
        let markov = m([
            [0.5, 0.25],
            [0.5, 0.75],
        ]);
        assert!(markov.is_transition_matrix());
        assert!(markov.is_positive_transition_matrix());
        let absorbing = m([[1.0, 0.5], [0.0, 0.5]]);
        assert!(absorbing.is_transition_matrix());
        assert!(!absorbing.is_positive_transition_matrix());
        assert!(!m([[0.5, 0.5]]).is_transition_matrix());

        // not square, but every column is a distribution vector
        #[rustfmt::skip]
        let tall = m([
            [0.5, 0.0],
            [0.5, 0.25],
            [0.0, 0.75],
        ]);
        assert!(tall.is_transition_matrix());
        assert!(!tall.is_positive_transition_matrix());
        assert!(m([[0.5], [0.5]]).is_positive_transition_matrix());
    }

    #[test]
    fn fmt() {
        #[rustfmt::skip]
        let mat = m([
            [1.0, -2.0],
            [1000.0, 0.5],
        ]);
        assert_eq!(mat.to_string(), "|     1    -2 |\n| 1,000 0.500 |");
        assert_eq!(format!("{mat:.1}"), "|     1  -2 |\n| 1,000 0.5 |");
        assert_eq!(m([[-0.0]]).to_string(), "| 0 |");
        assert_eq!(
            format!("{mat:?}"),
            "Matrix([[1.0, -2.0], [1000.0, 0.5]])"
        );
    }
}
