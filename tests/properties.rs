//! Randomized checks of algebraic properties, on small integer matrices.
//!
//! Every test uses a fixed seed, so failures are reproducible.

use approx::assert_abs_diff_eq;
use lintrans::{Basis, Matrix, Vector};

const ITERATIONS: usize = 200;

fn random_matrix(rng: &mut fastrand::Rng, rows: usize, columns: usize) -> Matrix {
    Matrix::from_fn(rows, columns, |_, _| rng.i32(-3..=3) as f64).unwrap()
}

fn random_vector(rng: &mut fastrand::Rng, n: usize) -> Vector {
    Vector::new((0..n).map(|_| rng.i32(-5..=5) as f64).collect::<Vec<_>>()).unwrap()
}

/// Returns a random `n`x`n` integer matrix with determinant ±1, so that its inverse exists and
/// has integer elements too.
fn random_unimodular(rng: &mut fastrand::Rng, n: usize) -> Matrix {
    let lower = Matrix::from_fn(n, n, |row, col| match row.cmp(&col) {
        std::cmp::Ordering::Less => 0.0,
        std::cmp::Ordering::Equal => 1.0,
        std::cmp::Ordering::Greater => rng.i32(-2..=2) as f64,
    })
    .unwrap();
    let upper = Matrix::from_fn(n, n, |row, col| match row.cmp(&col) {
        std::cmp::Ordering::Less => rng.i32(-2..=2) as f64,
        std::cmp::Ordering::Equal => {
            if rng.bool() {
                1.0
            } else {
                -1.0
            }
        }
        std::cmp::Ordering::Greater => 0.0,
    })
    .unwrap();
    lower.multiply(&upper).unwrap()
}

#[test]
fn rref_is_idempotent() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    for _ in 0..ITERATIONS {
        let (rows, columns) = (rng.usize(1..=5), rng.usize(1..=5));
        let m = random_matrix(&mut rng, rows, columns);
        let rref = m.rref();
        assert!(rref.is_rref(), "{m}\nreduced to\n{rref}");

        // fresh copy without the cached RREF
        let copy = Matrix::from_rows(rref.to_rows()).unwrap();
        assert_eq!(copy.rref(), rref);
        assert!(copy.is_rref());
    }
}

#[test]
fn rank_is_bounded() {
    let mut rng = fastrand::Rng::with_seed(1);
    for _ in 0..ITERATIONS {
        let (rows, columns) = (rng.usize(1..=5), rng.usize(1..=5));
        let m = random_matrix(&mut rng, rows, columns);
        let rank = m.rank();
        assert!(rank <= rows.min(columns), "rank {rank} of\n{m}");
        assert_eq!(m.rref().rank(), rank);
        assert_eq!(m.nullspace().len(), columns - rank);
        assert!(m.rank_with(true) <= rank);
    }
}

#[test]
fn inverse_exists_iff_invertible() {
    let mut rng = fastrand::Rng::with_seed(2);
    for _ in 0..ITERATIONS {
        let (rows, columns) = (rng.usize(1..=4), rng.usize(1..=4));
        let m = random_matrix(&mut rng, rows, columns);
        assert_eq!(m.inverse().is_some(), m.is_invertible(), "\n{m}");
        if rows != columns {
            assert!(m.inverse().is_none());
        }
    }
}

#[test]
fn inverse_is_inverse() {
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..ITERATIONS {
        let n = rng.usize(1..=4);
        let m = random_unimodular(&mut rng, n);
        let inv = m.inverse().unwrap_or_else(|| panic!("singular:\n{m}"));
        let identity = Matrix::identity(n).unwrap();
        assert_abs_diff_eq!(m.multiply(inv).unwrap(), identity, epsilon = 1e-9);
        assert_abs_diff_eq!(inv.multiply(&m).unwrap(), identity, epsilon = 1e-9);
    }
}

#[test]
fn solution_agrees_with_consistency() {
    let mut rng = fastrand::Rng::with_seed(4);
    for _ in 0..ITERATIONS {
        let (rows, columns) = (rng.usize(1..=4), rng.usize(1..=4));
        let a = random_matrix(&mut rng, rows, columns);
        let b = random_vector(&mut rng, rows);

        let consistent = a.is_consistent_with(&b).unwrap();
        let unique = a.augment(&b).unwrap().rank_with(true) == columns;
        let solution = a.find_solution_with(&b).unwrap();
        assert_eq!(solution.is_some(), consistent && unique, "\n{a}\nb = {b}");
    }
}

#[test]
fn unique_solutions_solve_the_system() {
    let mut rng = fastrand::Rng::with_seed(5);
    for _ in 0..ITERATIONS {
        let n = rng.usize(1..=4);
        let a = random_unimodular(&mut rng, n);
        let b = random_vector(&mut rng, n);
        let x = a
            .find_solution_with(&b)
            .unwrap()
            .unwrap_or_else(|| panic!("no solution for\n{a}\nb = {b}"));
        assert_abs_diff_eq!(a.multiply_vector(&x).unwrap(), b, epsilon = 1e-9);
    }
}

#[test]
fn basis_validity() {
    let mut rng = fastrand::Rng::with_seed(6);
    for _ in 0..ITERATIONS {
        let n = rng.usize(1..=4);
        let columns = random_unimodular(&mut rng, n).column_vectors();
        let len = rng.usize(1..=n);
        let basis = Basis::new(columns[..len].to_vec()).unwrap();
        assert_eq!(basis.spans_full_space(), basis.len() == basis.in_space());

        let mut dependent = columns[..len].to_vec();
        dependent.push(columns[0].scale(rng.i32(-3..=3) as f64));
        assert!(Basis::new(dependent).is_err());
    }
}

#[test]
fn basis_round_trip() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..ITERATIONS {
        let n = rng.usize(1..=4);
        let basis = Basis::new(random_unimodular(&mut rng, n).column_vectors()).unwrap();
        let v = random_vector(&mut rng, n);

        let there = v.to_basis(&basis).unwrap();
        assert_eq!(there.basis(), if basis.is_standard_basis() { None } else { Some(&basis) });
        let back = there.to_basis(&Basis::standard(n).unwrap()).unwrap();
        assert_eq!(back.basis(), None);
        assert_abs_diff_eq!(back, v.to_standard_basis(), epsilon = 1e-9);
    }
}
