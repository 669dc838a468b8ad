//! Degree of freedom numbering.
use crate::error::AssemblyError;
use crate::mesh::BarConnectivity;

/// Number of degrees of freedom per node for axial bars.
pub const DOF_PER_NODE: usize = 1;

/// Global degree of freedom index of the given local degree of freedom of a node.
///
/// Assumes that every node in the mesh carries the same number of degrees of freedom.
pub fn global_dof(node: usize, local_dof: usize, dof_per_node: usize) -> usize {
    node * dof_per_node + local_dof
}

/// Same as [`global_dof`], but checks the local degree of freedom against `dof_per_node`.
pub fn try_global_dof(node: usize, local_dof: usize, dof_per_node: usize) -> Result<usize, AssemblyError> {
    if local_dof < dof_per_node {
        Ok(global_dof(node, local_dof, dof_per_node))
    } else {
        Err(AssemblyError::InvalidLocalDof { local_dof, dof_per_node })
    }
}

/// The element freedom table: global degrees of freedom of an element, node by node.
pub fn element_dofs(connectivity: &BarConnectivity, dof_per_node: usize) -> Vec<usize> {
    connectivity
        .vertex_indices()
        .iter()
        .flat_map(|&node| (0..dof_per_node).map(move |j| global_dof(node, j, dof_per_node)))
        .collect()
}
