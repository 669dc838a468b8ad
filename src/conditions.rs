//! Boundary conditions and distributed loads.
use crate::error::AssemblyError;
use crate::material::Material;
use crate::Real;
use nalgebra::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A value applied to one local degree of freedom of a set of nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodalCondition<T: Scalar> {
    pub nodes: Vec<usize>,
    /// Local degree of freedom. Always `0` for axial bars.
    #[serde(default)]
    pub local_dof: usize,
    pub value: T,
}

impl<T: Scalar> NodalCondition<T> {
    pub fn new(nodes: &[usize], local_dof: usize, value: T) -> Self {
        Self {
            nodes: nodes.to_vec(),
            local_dof,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum BoundaryCondition<T: Scalar> {
    /// Prescribed displacement.
    Dirichlet(NodalCondition<T>),
    /// Applied nodal force.
    Neumann(NodalCondition<T>),
}

impl<T: Scalar> BoundaryCondition<T> {
    pub fn dirichlet(nodes: &[usize], value: T) -> Self {
        Self::Dirichlet(NodalCondition::new(nodes, 0, value))
    }

    pub fn neumann(nodes: &[usize], value: T) -> Self {
        Self::Neumann(NodalCondition::new(nodes, 0, value))
    }

    pub fn condition(&self) -> &NodalCondition<T> {
        match self {
            Self::Dirichlet(condition) | Self::Neumann(condition) => condition,
        }
    }

    pub fn as_dirichlet(&self) -> Option<&NodalCondition<T>> {
        match self {
            Self::Dirichlet(condition) => Some(condition),
            Self::Neumann(_) => None,
        }
    }

    pub fn as_neumann(&self) -> Option<&NodalCondition<T>> {
        match self {
            Self::Neumann(condition) => Some(condition),
            Self::Dirichlet(_) => None,
        }
    }
}

/// The kind of a distributed load.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DistributedLoadKind {
    /// Axial body load per unit length (`"BX"`).
    Bx,
    /// Gravity (`"GRAV"`). The load per unit length is scaled by density and area.
    Grav,
}

impl DistributedLoadKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Bx => "BX",
            Self::Grav => "GRAV",
        }
    }

    /// Load intensity per unit length of an element with the given area and material.
    pub fn intensity<T: Real>(&self, value: T, sign: T, area: T, material: &Material<T>) -> T {
        match self {
            Self::Bx => value * sign,
            Self::Grav => material.density * area * value * sign,
        }
    }
}

impl fmt::Display for DistributedLoadKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for DistributedLoadKind {
    type Err = AssemblyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BX" => Ok(Self::Bx),
            "GRAV" => Ok(Self::Grav),
            other => Err(AssemblyError::UnsupportedLoadType { tag: other.to_string() }),
        }
    }
}

impl TryFrom<String> for DistributedLoadKind {
    type Error = AssemblyError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<DistributedLoadKind> for String {
    fn from(kind: DistributedLoadKind) -> Self {
        kind.tag().to_string()
    }
}

/// A load distributed along the length of a set of elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad<T: Scalar> {
    /// Name used in diagnostics.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DistributedLoadKind,
    /// Direction of the load. Must hold exactly one component.
    pub direction: Vec<T>,
    pub value: T,
    /// Global ids of the loaded elements.
    pub elements: Vec<usize>,
}

impl<T: Scalar> DistributedLoad<T> {
    pub fn new(
        name: impl Into<String>,
        kind: DistributedLoadKind,
        direction: T,
        value: T,
        elements: &[usize],
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            direction: vec![direction],
            value,
            elements: elements.to_vec(),
        }
    }
}

impl<T: Real> DistributedLoad<T> {
    /// The sign of the single direction component, either `1` or `-1`.
    pub fn direction_sign(&self) -> Result<T, AssemblyError> {
        let invalid = || AssemblyError::InvalidDirection {
            load: self.name.clone(),
            components: format!("{:?}", self.direction),
        };
        match self.direction.as_slice() {
            [component] if *component > T::zero() => Ok(T::one()),
            [component] if *component < T::zero() => Ok(-T::one()),
            _ => Err(invalid()),
        }
    }
}
