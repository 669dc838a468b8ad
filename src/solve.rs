//! Elimination of prescribed degrees of freedom and solution of the reduced system.
//!
//! The global system $\vec K \vec u = \vec f$ is split into free ($f$) and prescribed ($p$)
//! degrees of freedom:
//! <div>$$
//! \begin{bmatrix} \vec K_{ff} & \vec K_{fp} \\\\ \vec K_{pf} & \vec K_{pp} \end{bmatrix}
//! \begin{bmatrix} \vec u_f \\\\ \vec u_p \end{bmatrix}
//! =
//! \begin{bmatrix} \vec f_f \\\\ \vec f_p \end{bmatrix}.
//! $$</div>
//! Since $\vec u_p$ is known, only $\vec K_{ff} \vec u_f = \vec f_f - \vec K_{fp} \vec u_p$
//! needs to be solved.
use crate::conditions::BoundaryCondition;
use crate::dof::{try_global_dof, DOF_PER_NODE};
use crate::error::AssemblyError;
use crate::options::SolverOptions;
use crate::Real;
use itertools::izip;
use log::debug;
use nalgebra::{DMatrix, DVector};

/// Partition of the degrees of freedom into free and prescribed sets.
///
/// Both sets are sorted in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct DofPartition<T> {
    free: Vec<usize>,
    prescribed: Vec<usize>,
    prescribed_values: Vec<T>,
}

impl<T: Real> DofPartition<T> {
    /// Partitions `num_dofs` degrees of freedom according to the Dirichlet conditions.
    ///
    /// If the same degree of freedom is prescribed more than once, the value of the condition
    /// that comes last in `boundary_conditions` is used.
    pub fn from_dirichlet_conditions(
        num_dofs: usize,
        boundary_conditions: &[BoundaryCondition<T>],
    ) -> Result<Self, AssemblyError> {
        let num_nodes = num_dofs / DOF_PER_NODE;
        let mut values = vec![None; num_dofs];
        for condition in boundary_conditions.iter().filter_map(BoundaryCondition::as_dirichlet) {
            for &node in &condition.nodes {
                if node >= num_nodes {
                    return Err(AssemblyError::NodeOutOfBounds { node, num_nodes });
                }
                let dof = try_global_dof(node, condition.local_dof, DOF_PER_NODE)?;
                values[dof] = Some(condition.value);
            }
        }

        let mut free = Vec::new();
        let mut prescribed = Vec::new();
        let mut prescribed_values = Vec::new();
        for (dof, value) in values.into_iter().enumerate() {
            match value {
                Some(value) => {
                    prescribed.push(dof);
                    prescribed_values.push(value);
                }
                None => free.push(dof),
            }
        }

        Ok(Self {
            free,
            prescribed,
            prescribed_values,
        })
    }

    pub fn num_dofs(&self) -> usize {
        self.free.len() + self.prescribed.len()
    }

    pub fn free_dofs(&self) -> &[usize] {
        &self.free
    }

    pub fn prescribed_dofs(&self) -> &[usize] {
        &self.prescribed
    }

    pub fn prescribed_values(&self) -> &[T] {
        &self.prescribed_values
    }

    /// Forms the reduced system $(\vec K_{ff}, \vec f_f - \vec K_{fp} \vec u_p)$.
    pub fn reduce(&self, stiffness: &DMatrix<T>, force: &DVector<T>) -> (DMatrix<T>, DVector<T>) {
        let free = &self.free;
        let prescribed = &self.prescribed;
        let k_ff = DMatrix::from_fn(free.len(), free.len(), |i, j| stiffness[(free[i], free[j])]);
        let k_fp = DMatrix::from_fn(free.len(), prescribed.len(), |i, j| stiffness[(free[i], prescribed[j])]);
        let u_p = DVector::from_column_slice(&self.prescribed_values);
        let f_f = DVector::from_fn(free.len(), |i, _| force[free[i]]);
        (k_ff, f_f - k_fp * u_p)
    }

    /// Combines free and prescribed values into a vector over all degrees of freedom.
    ///
    /// # Panics
    ///
    /// Panics if `u_f` does not have one entry per free degree of freedom.
    pub fn expand(&self, u_f: &DVector<T>) -> DVector<T> {
        assert_eq!(u_f.len(), self.free.len());
        let mut u = DVector::zeros(self.num_dofs());
        for (&dof, &value) in izip!(&self.free, u_f.iter()) {
            u[dof] = value;
        }
        for (&dof, &value) in izip!(&self.prescribed, &self.prescribed_values) {
            u[dof] = value;
        }
        u
    }
}

/// Solves a dense linear system by LU decomposition with partial pivoting.
///
/// The system is considered singular if the smallest pivot does not exceed
/// `n * pivot_tolerance` times the largest pivot, where `n` is the number of unknowns.
pub fn solve_dense<T: Real>(
    matrix: DMatrix<T>,
    rhs: &DVector<T>,
    pivot_tolerance: T,
) -> Result<DVector<T>, AssemblyError> {
    let n = matrix.nrows();
    if n == 0 {
        return Ok(DVector::zeros(0));
    }
    let singular = || AssemblyError::SingularSystem { num_free_dofs: n };

    let lu = matrix.lu();
    let pivots = lu.u().diagonal().map(|x| x.abs());
    let max_pivot = pivots.iter().fold(T::zero(), |a, &b| a.max(b));
    let min_pivot = pivots.iter().fold(max_pivot, |a, &b| a.min(b));
    let n_scaled: T = nalgebra::convert(n as f64);
    if !(min_pivot > n_scaled * pivot_tolerance * max_pivot) {
        return Err(singular());
    }
    lu.solve(rhs).ok_or_else(singular)
}

/// Solves $\vec K \vec u = \vec f$ subject to the Dirichlet conditions among the given
/// boundary conditions.
pub fn solve_with_dirichlet<T: Real>(
    stiffness: &DMatrix<T>,
    force: &DVector<T>,
    boundary_conditions: &[BoundaryCondition<T>],
    options: &SolverOptions<T>,
) -> Result<DVector<T>, AssemblyError> {
    let partition = DofPartition::from_dirichlet_conditions(force.len(), boundary_conditions)?;
    debug!(
        "Solving reduced system with {} free and {} prescribed degrees of freedom",
        partition.free_dofs().len(),
        partition.prescribed_dofs().len()
    );
    let (k_ff, rhs) = partition.reduce(stiffness, force);
    let u_f = solve_dense(k_ff, &rhs, options.pivot_tolerance)?;
    Ok(partition.expand(&u_f))
}
