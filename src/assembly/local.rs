//! Element matrices and vectors of two-node bar elements.
use crate::Real;
use nalgebra::{Matrix2, Vector2};
use numeric_literals::replace_float_literals;

/// Stiffness matrix of a bar element with signed length `h`.
///
/// The matrix is
/// <div>$$
/// \frac{A E}{h} \begin{bmatrix} 1 & -1 \\\\ -1 & 1 \end{bmatrix}.
/// $$</div>
///
/// The caller is responsible for ensuring that `h` is non-zero.
pub fn bar_element_stiffness<T: Real>(area: T, young_modulus: T, h: T) -> Matrix2<T> {
    let k = area * young_modulus / h;
    #[rustfmt::skip]
    let ke = Matrix2::new(
         k, -k,
        -k,  k);
    ke
}

/// Equivalent nodal forces of a constant load `q` per unit length over a bar element of
/// signed length `h`: half of the total load goes to each node.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn bar_element_load<T: Real>(q: T, h: T) -> Vector2<T> {
    Vector2::repeat(q * h / 2.0)
}

/// Axial strain of a bar element given its nodal displacements.
pub fn bar_element_strain<T: Real>(u_a: T, u_b: T, h: T) -> T {
    (u_b - u_a) / h
}
