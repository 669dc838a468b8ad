//! Errors produced while assembling or solving a bar model.
use crate::mesh::ElementLocation;
use std::error::Error;
use std::fmt;

/// Reasons why assembly or solution of a bar model may fail.
///
/// All errors are terminal for the call that produced them: no partial system is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// The two nodes of an element share the same coordinate.
    DegenerateElement { nodes: [usize; 2] },
    /// The direction of a distributed load is not a single component of sign ±1.
    ///
    /// `components` holds the textual representation of the offending direction.
    InvalidDirection { load: String, components: String },
    /// A distributed load references an element id that is absent from the element map.
    UnknownElement { load: String, element: usize },
    /// An element id maps to a block or local element index that does not exist in the mesh.
    DanglingElement { element: usize, block: usize, local_element: usize },
    /// A distributed load carries a type tag outside of the supported set.
    UnsupportedLoadType { tag: String },
    /// The reduced stiffness matrix of the free degrees of freedom could not be factorized.
    SingularSystem { num_free_dofs: usize },
    /// A block references a material that is not in the material table.
    UnknownMaterial { block: String, material: String },
    /// A node index is not a valid index into the coordinates.
    NodeOutOfBounds { node: usize, num_nodes: usize },
    /// A boundary condition names a local degree of freedom the model does not have.
    InvalidLocalDof { local_dof: usize, dof_per_node: usize },
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DegenerateElement { nodes } => {
                write!(f, "Zero-length element detected between nodes {:?}", nodes)
            }
            Self::InvalidDirection { load, components } => write!(
                f,
                "Distributed load {} must have a single direction component of ±1, got {}",
                load, components
            ),
            Self::UnknownElement { load, element } => write!(
                f,
                "Element {} in distributed load {} not found in any element block",
                element, load
            ),
            Self::DanglingElement {
                element,
                block,
                local_element,
            } => write!(
                f,
                "Element {} maps to element {} of block {}, which does not exist",
                element, local_element, block
            ),
            Self::UnsupportedLoadType { tag } => {
                write!(f, "Distributed load type {:?} not supported for 1D", tag)
            }
            Self::SingularSystem { num_free_dofs } => write!(
                f,
                "Reduced stiffness matrix with {} free degrees of freedom is singular",
                num_free_dofs
            ),
            Self::UnknownMaterial { block, material } => {
                write!(f, "Block {} references unknown material {:?}", block, material)
            }
            Self::NodeOutOfBounds { node, num_nodes } => {
                write!(f, "Node index {} out of bounds for mesh with {} nodes", node, num_nodes)
            }
            Self::InvalidLocalDof { local_dof, dof_per_node } => write!(
                f,
                "Local degree of freedom {} is invalid with {} degree(s) of freedom per node",
                local_dof, dof_per_node
            ),
        }
    }
}

impl Error for AssemblyError {}

impl AssemblyError {
    pub(crate) fn dangling_element(element: usize, location: ElementLocation) -> Self {
        Self::DanglingElement {
            element,
            block: location.block,
            local_element: location.local_element,
        }
    }
}
