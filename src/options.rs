use crate::Real;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Numerical tolerances used during assembly and solution.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Real + Deserialize<'de>"))]
pub struct SolverOptions<T> {
    /// Elements whose absolute length does not exceed this tolerance are rejected as degenerate.
    pub length_tolerance: T,
    /// The reduced stiffness matrix is considered singular if the smallest pivot of its LU
    /// factorization does not exceed this tolerance, scaled by the number of free degrees of
    /// freedom, relative to the largest pivot.
    ///
    /// Defaults to the machine epsilon of `f64`.
    pub pivot_tolerance: T,
}

impl<T> Default for SolverOptions<T>
where
    T: Real,
{
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn default() -> Self {
        Self {
            length_tolerance: 1e-8,
            pivot_tolerance: 2.220446049250313e-16,
        }
    }
}

impl<T: Real> SolverOptions<T> {
    pub fn with_length_tolerance(self, length_tolerance: T) -> Self {
        Self {
            length_tolerance,
            ..self
        }
    }

    pub fn with_pivot_tolerance(self, pivot_tolerance: T) -> Self {
        Self {
            pivot_tolerance,
            ..self
        }
    }
}
