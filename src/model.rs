use crate::assembly::local::bar_element_strain;
use crate::assembly::{assemble_force, assemble_stiffness};
use crate::conditions::{BoundaryCondition, DistributedLoad};
use crate::dof::{global_dof, DOF_PER_NODE};
use crate::error::AssemblyError;
use crate::material::MaterialTable;
use crate::mesh::{BarMesh, ElementMap};
use crate::options::SolverOptions;
use crate::solve::solve_with_dirichlet;
use crate::Real;
use nalgebra::{DMatrix, DVector, Scalar};
use serde::{Deserialize, Serialize};

/// A complete one-dimensional bar model: mesh, materials, boundary conditions and loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct BarModel<T: Scalar> {
    pub mesh: BarMesh<T>,
    pub materials: MaterialTable<T>,
    #[serde(default)]
    pub boundary_conditions: Vec<BoundaryCondition<T>>,
    #[serde(default)]
    pub distributed_loads: Vec<DistributedLoad<T>>,
    /// Lookup from global element ids to element locations, used by distributed loads.
    pub element_map: ElementMap,
}

impl<T: Scalar> BarModel<T> {
    /// Creates a model without boundary conditions or loads.
    ///
    /// Elements are numbered consecutively, block by block (see [`ElementMap::from_blocks`]).
    pub fn new(mesh: BarMesh<T>, materials: MaterialTable<T>) -> Self {
        let element_map = ElementMap::from_blocks(mesh.blocks());
        Self {
            mesh,
            materials,
            boundary_conditions: Vec::new(),
            distributed_loads: Vec::new(),
            element_map,
        }
    }

    pub fn with_boundary_condition(mut self, condition: BoundaryCondition<T>) -> Self {
        self.boundary_conditions.push(condition);
        self
    }

    pub fn with_distributed_load(mut self, load: DistributedLoad<T>) -> Self {
        self.distributed_loads.push(load);
        self
    }

    pub fn with_element_map(self, element_map: ElementMap) -> Self {
        Self { element_map, ..self }
    }
}

impl<T: Real> BarModel<T> {
    pub fn solve(&self, options: &SolverOptions<T>) -> Result<BarSolution<T>, AssemblyError> {
        solve_bar_model(self, options)
    }
}

/// Assembles and solves a bar model.
///
/// The stiffness matrix is assembled first, then the force vector from Neumann conditions and
/// distributed loads. Finally, the degrees of freedom prescribed by Dirichlet conditions are
/// eliminated and the reduced system is solved.
pub fn solve_bar_model<T: Real>(
    model: &BarModel<T>,
    options: &SolverOptions<T>,
) -> Result<BarSolution<T>, AssemblyError> {
    let stiffness = assemble_stiffness(&model.mesh, &model.materials, options)?;
    let force = assemble_force(
        &model.mesh,
        &model.materials,
        &model.boundary_conditions,
        &model.distributed_loads,
        &model.element_map,
        options,
    )?;
    let displacements = solve_with_dirichlet(&stiffness, &force, &model.boundary_conditions, options)?;
    Ok(BarSolution {
        displacements,
        stiffness,
        force,
    })
}

/// Result of solving a bar model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct BarSolution<T: Scalar> {
    /// Nodal displacements, one per degree of freedom.
    pub displacements: DVector<T>,
    /// The assembled global stiffness matrix.
    pub stiffness: DMatrix<T>,
    /// The assembled global force vector, before elimination of prescribed degrees of freedom.
    pub force: DVector<T>,
}

/// Axial response of a single element.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementResponse<T> {
    pub element: usize,
    pub strain: T,
    pub stress: T,
    pub axial_force: T,
}

impl<T: Real> BarSolution<T> {
    /// Reaction forces $\vec K \vec u - \vec f$.
    ///
    /// Up to round-off, the reactions are zero at free degrees of freedom.
    pub fn reactions(&self) -> DVector<T> {
        &self.stiffness * &self.displacements - &self.force
    }

    /// Strain, stress and axial force of every element of the model, ordered by element id.
    ///
    /// Fails with [`AssemblyError::NodeOutOfBounds`] if an element references a node without a
    /// displacement in this solution.
    pub fn element_responses(&self, model: &BarModel<T>) -> Result<Vec<ElementResponse<T>>, AssemblyError> {
        let mesh = &model.mesh;
        let displacement = |node: usize| {
            self.displacements
                .get(global_dof(node, 0, DOF_PER_NODE))
                .copied()
                .ok_or(AssemblyError::NodeOutOfBounds {
                    node,
                    num_nodes: self.displacements.len() / DOF_PER_NODE,
                })
        };
        model
            .element_map
            .sorted_entries()
            .into_iter()
            .map(|(element, location)| {
                let connectivity = mesh
                    .connectivity_at(location)
                    .ok_or_else(|| AssemblyError::dangling_element(element, location))?;
                let block = &mesh.blocks()[location.block];
                let material = model.materials.for_block(&block.name, &block.material)?;
                let h = mesh.element_length(connectivity)?;
                let u_a = displacement(connectivity.start())?;
                let u_b = displacement(connectivity.end())?;
                let strain = bar_element_strain(u_a, u_b, h);
                let stress = material.young_modulus * strain;
                Ok(ElementResponse {
                    element,
                    strain,
                    stress,
                    axial_force: stress * block.area,
                })
            })
            .collect()
    }
}
