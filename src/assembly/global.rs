use crate::assembly::local::{bar_element_load, bar_element_stiffness};
use crate::conditions::{BoundaryCondition, DistributedLoad};
use crate::dof::{element_dofs, try_global_dof, DOF_PER_NODE};
use crate::error::AssemblyError;
use crate::material::MaterialTable;
use crate::mesh::{BarMesh, ElementMap};
use crate::options::SolverOptions;
use crate::Real;
use log::{debug, trace};
use nalgebra::base::storage::Storage;
use nalgebra::{DMatrix, DVector, Dim, Matrix, U1};

/// Assembles the global stiffness matrix of all elements in all blocks of the mesh.
///
/// Element contributions are accumulated, so nodes shared between elements receive the sum
/// of the stiffness of all adjacent elements.
///
/// # Errors
///
/// Fails with [`AssemblyError::DegenerateElement`] if an element has (numerically) zero length,
/// and with [`AssemblyError::UnknownMaterial`] or [`AssemblyError::NodeOutOfBounds`] if a block
/// references data that does not exist.
pub fn assemble_stiffness<T: Real>(
    mesh: &BarMesh<T>,
    materials: &MaterialTable<T>,
    options: &SolverOptions<T>,
) -> Result<DMatrix<T>, AssemblyError> {
    let num_dofs = DOF_PER_NODE * mesh.num_nodes();
    let mut stiffness = DMatrix::zeros(num_dofs, num_dofs);

    for block in mesh.blocks() {
        let material = materials.for_block(&block.name, &block.material)?;
        for connectivity in &block.connectivity {
            let h = mesh.checked_element_length(connectivity, options.length_tolerance)?;
            let ke = bar_element_stiffness(block.area, material.young_modulus, h);
            let dofs = element_dofs(connectivity, DOF_PER_NODE);
            trace!("Element {:?} in block {}: h = {}", connectivity.0, block.name, h);
            add_element_matrix(&mut stiffness, &dofs, &ke);
        }
    }

    debug!(
        "Assembled {}x{} stiffness matrix from {} elements",
        num_dofs,
        num_dofs,
        mesh.num_elements()
    );
    Ok(stiffness)
}

/// Adds the applied forces of all Neumann conditions to the force vector.
///
/// Dirichlet conditions are ignored. Several forces applied to the same degree of freedom
/// accumulate.
pub fn assemble_neumann_loads<T: Real>(
    force: &mut DVector<T>,
    boundary_conditions: &[BoundaryCondition<T>],
    num_nodes: usize,
) -> Result<(), AssemblyError> {
    let mut contributions = Vec::new();
    for condition in boundary_conditions.iter().filter_map(BoundaryCondition::as_neumann) {
        for &node in &condition.nodes {
            if node >= num_nodes {
                return Err(AssemblyError::NodeOutOfBounds { node, num_nodes });
            }
            let dof = try_global_dof(node, condition.local_dof, DOF_PER_NODE)?;
            contributions.push((dof, condition.value));
        }
    }

    for (dof, value) in contributions {
        force[dof] += value;
    }
    Ok(())
}

/// Adds the equivalent nodal forces of all distributed loads to the force vector.
///
/// A load with intensity $q$ per unit length over an element of signed length $h$
/// contributes $q h / 2$ to each of the two nodes of the element.
///
/// The force vector is left untouched if any load is invalid.
pub fn assemble_distributed_loads<T: Real>(
    force: &mut DVector<T>,
    mesh: &BarMesh<T>,
    materials: &MaterialTable<T>,
    loads: &[DistributedLoad<T>],
    element_map: &ElementMap,
    options: &SolverOptions<T>,
) -> Result<(), AssemblyError> {
    let mut contributions = Vec::new();
    for load in loads {
        let sign = load.direction_sign()?;
        for &element in &load.elements {
            let location = element_map
                .get(element)
                .ok_or_else(|| AssemblyError::UnknownElement {
                    load: load.name.clone(),
                    element,
                })?;
            let connectivity = mesh
                .connectivity_at(location)
                .ok_or_else(|| AssemblyError::dangling_element(element, location))?;
            let block = &mesh.blocks()[location.block];
            let material = materials.for_block(&block.name, &block.material)?;
            let h = mesh.checked_element_length(connectivity, options.length_tolerance)?;
            let q = load.kind.intensity(load.value, sign, block.area, material);
            trace!("Load {} on element {}: q = {}", load.name, element, q);
            contributions.push((element_dofs(connectivity, DOF_PER_NODE), bar_element_load(q, h)));
        }
    }

    for (dofs, fe) in &contributions {
        add_element_vector(force, dofs, fe);
    }
    Ok(())
}

/// Assembles the global force vector from Neumann conditions and distributed loads.
pub fn assemble_force<T: Real>(
    mesh: &BarMesh<T>,
    materials: &MaterialTable<T>,
    boundary_conditions: &[BoundaryCondition<T>],
    loads: &[DistributedLoad<T>],
    element_map: &ElementMap,
    options: &SolverOptions<T>,
) -> Result<DVector<T>, AssemblyError> {
    let mut force = DVector::zeros(DOF_PER_NODE * mesh.num_nodes());
    assemble_neumann_loads(&mut force, boundary_conditions, mesh.num_nodes())?;
    assemble_distributed_loads(&mut force, mesh, materials, loads, element_map, options)?;
    Ok(force)
}

/// Adds an element matrix to the rows and columns of the global matrix given by `dofs`.
///
/// # Panics
///
/// Panics if the element matrix is not square with dimensions equal to the number of
/// degrees of freedom.
pub fn add_element_matrix<T, R, C, S>(matrix: &mut DMatrix<T>, dofs: &[usize], element_matrix: &Matrix<T, R, C, S>)
where
    T: Real,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
{
    assert_eq!(dofs.len(), element_matrix.nrows());
    assert_eq!(dofs.len(), element_matrix.ncols());

    for (local_row, &global_row) in dofs.iter().enumerate() {
        for (local_col, &global_col) in dofs.iter().enumerate() {
            matrix[(global_row, global_col)] += element_matrix[(local_row, local_col)];
        }
    }
}

/// Adds an element vector to the entries of the global vector given by `dofs`.
pub fn add_element_vector<T, R, S>(vector: &mut DVector<T>, dofs: &[usize], element_vector: &Matrix<T, R, U1, S>)
where
    T: Real,
    R: Dim,
    S: Storage<T, R, U1>,
{
    assert_eq!(dofs.len(), element_vector.nrows());

    for (local, &global) in dofs.iter().enumerate() {
        vector[global] += element_vector[local];
    }
}
