//! Test helpers shared by the tests and benchmarks of the workspace.
use nalgebra::storage::Storage;
use nalgebra::{Dim, Matrix, RealField};

/// Poor man's approx assertion for matrices
#[macro_export]
macro_rules! assert_approx_matrix_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let diff = $x - $y;

        let max_absdiff = diff.abs().max();
        let approx_eq = max_absdiff <= $tol;

        if !approx_eq {
            println!("abstol: {:e}", $tol);
            println!("left: {}", $x);
            println!("right: {}", $y);
            println!("diff: {:e}", diff);
        }
        assert!(approx_eq);
    }};
}

/// Returns `n` evenly spaced points on the closed interval `[a, b]`.
///
/// # Panics
///
/// Panics if `n < 2`.
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    assert!(n >= 2, "Need at least two points to span an interval");
    let step = (b - a) / (n - 1) as f64;
    (0..n).map(|i| a + step * i as f64).collect()
}

/// Returns `true` if the matrix is square and equal to its transpose, entry by entry.
pub fn is_exactly_symmetric<T, R, C, S>(matrix: &Matrix<T, R, C, S>) -> bool
where
    T: RealField,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
{
    matrix.nrows() == matrix.ncols()
        && (0..matrix.nrows()).all(|i| (0..i).all(|j| matrix[(i, j)] == matrix[(j, i)]))
}
