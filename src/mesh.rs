use crate::error::AssemblyError;
use crate::Real;
use nalgebra::Scalar;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Connectivity of a two-node bar element.
///
/// The first node is the *start* of the element. Its orientation determines the sign of the
/// element length.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarConnectivity(pub [usize; 2]);

impl BarConnectivity {
    pub fn vertex_indices(&self) -> &[usize] {
        &self.0
    }

    pub fn start(&self) -> usize {
        self.0[0]
    }

    pub fn end(&self) -> usize {
        self.0[1]
    }
}

impl From<[usize; 2]> for BarConnectivity {
    fn from(nodes: [usize; 2]) -> Self {
        Self(nodes)
    }
}

impl From<(usize, usize)> for BarConnectivity {
    fn from((a, b): (usize, usize)) -> Self {
        Self([a, b])
    }
}

/// A named group of bar elements sharing a material and a cross-sectional area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementBlock<T: Scalar> {
    pub name: String,
    pub area: T,
    /// Name of the material in the material table.
    pub material: String,
    pub connectivity: Vec<BarConnectivity>,
}

impl<T: Scalar> ElementBlock<T> {
    pub fn new(name: impl Into<String>, area: T, material: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            area,
            material: material.into(),
            connectivity: Vec::new(),
        }
    }

    pub fn with_connectivity(mut self, connectivity: impl IntoIterator<Item = [usize; 2]>) -> Self {
        self.connectivity
            .extend(connectivity.into_iter().map(BarConnectivity));
        self
    }

    pub fn num_elements(&self) -> usize {
        self.connectivity.len()
    }
}

/// Index-based one-dimensional mesh: scalar nodal coordinates and blocks of bar elements.
///
/// The index of a node is its position in the coordinate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarMesh<T: Scalar> {
    coordinates: Vec<T>,
    blocks: Vec<ElementBlock<T>>,
}

impl<T: Scalar> BarMesh<T> {
    pub fn from_coordinates_and_blocks(coordinates: Vec<T>, blocks: Vec<ElementBlock<T>>) -> Self {
        Self { coordinates, blocks }
    }

    pub fn coordinates(&self) -> &[T] {
        &self.coordinates
    }

    pub fn blocks(&self) -> &[ElementBlock<T>] {
        &self.blocks
    }

    pub fn num_nodes(&self) -> usize {
        self.coordinates.len()
    }

    pub fn num_elements(&self) -> usize {
        self.blocks.iter().map(ElementBlock::num_elements).sum()
    }

    /// Looks up the connectivity of the element at the given location.
    pub fn connectivity_at(&self, location: ElementLocation) -> Option<&BarConnectivity> {
        self.blocks
            .get(location.block)
            .and_then(|block| block.connectivity.get(location.local_element))
    }

    pub fn coordinate(&self, node: usize) -> Result<T, AssemblyError> {
        self.coordinates
            .get(node)
            .cloned()
            .ok_or(AssemblyError::NodeOutOfBounds {
                node,
                num_nodes: self.num_nodes(),
            })
    }
}

impl<T: Real> BarMesh<T> {
    /// Signed length of an element: coordinate of its end node minus that of its start node.
    pub fn element_length(&self, connectivity: &BarConnectivity) -> Result<T, AssemblyError> {
        let x_a = self.coordinate(connectivity.start())?;
        let x_b = self.coordinate(connectivity.end())?;
        Ok(x_b - x_a)
    }

    /// Same as [`element_length`](Self::element_length), but rejects lengths whose magnitude does
    /// not exceed `tolerance`.
    pub fn checked_element_length(
        &self,
        connectivity: &BarConnectivity,
        tolerance: T,
    ) -> Result<T, AssemblyError> {
        let h = self.element_length(connectivity)?;
        if h.abs() <= tolerance {
            Err(AssemblyError::DegenerateElement { nodes: connectivity.0 })
        } else {
            Ok(h)
        }
    }
}

/// Location of an element inside a mesh: its block and its index within that block.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementLocation {
    pub block: usize,
    pub local_element: usize,
}

impl From<(usize, usize)> for ElementLocation {
    fn from((block, local_element): (usize, usize)) -> Self {
        Self { block, local_element }
    }
}

/// Maps global element ids to their location in the blocks of a mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementMap {
    locations: FxHashMap<usize, ElementLocation>,
}

impl ElementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numbers elements consecutively from zero, block by block, in connectivity order.
    pub fn from_blocks<T: Scalar>(blocks: &[ElementBlock<T>]) -> Self {
        let mut map = Self::new();
        let mut element_id = 0;
        for (block_index, block) in blocks.iter().enumerate() {
            for local_element in 0..block.num_elements() {
                map.insert(element_id, ElementLocation::from((block_index, local_element)));
                element_id += 1;
            }
        }
        map
    }

    /// Inserts a location, returning the location previously associated with the id, if any.
    pub fn insert(&mut self, element_id: usize, location: ElementLocation) -> Option<ElementLocation> {
        self.locations.insert(element_id, location)
    }

    pub fn get(&self, element_id: usize) -> Option<ElementLocation> {
        self.locations.get(&element_id).copied()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Element ids and locations, sorted by element id.
    pub fn sorted_entries(&self) -> Vec<(usize, ElementLocation)> {
        let mut entries: Vec<_> = self
            .locations
            .iter()
            .map(|(&id, &location)| (id, location))
            .collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries
    }
}

impl FromIterator<(usize, ElementLocation)> for ElementMap {
    fn from_iter<I: IntoIterator<Item = (usize, ElementLocation)>>(iter: I) -> Self {
        Self {
            locations: iter.into_iter().collect(),
        }
    }
}
