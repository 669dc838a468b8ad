use crate::error::AssemblyError;
use nalgebra::Scalar;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Linear elastic bar material.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material<T> {
    /// Young's modulus $E$.
    pub young_modulus: T,
    /// Mass density $\rho$. Only used by gravity loads.
    pub density: T,
}

impl<T> Material<T> {
    pub fn new(young_modulus: T, density: T) -> Self {
        Self { young_modulus, density }
    }
}

/// Materials indexed by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent, bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct MaterialTable<T: Scalar> {
    materials: FxHashMap<String, Material<T>>,
}

impl<T: Scalar> Default for MaterialTable<T> {
    fn default() -> Self {
        Self {
            materials: FxHashMap::default(),
        }
    }
}

impl<T: Scalar> MaterialTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_material(mut self, name: impl Into<String>, material: Material<T>) -> Self {
        self.insert(name, material);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, material: Material<T>) -> Option<Material<T>> {
        self.materials.insert(name.into(), material)
    }

    pub fn get(&self, name: &str) -> Option<&Material<T>> {
        self.materials.get(name)
    }

    /// Looks up the material referenced by the named block.
    pub fn for_block(&self, block: &str, material: &str) -> Result<&Material<T>, AssemblyError> {
        self.get(material)
            .ok_or_else(|| AssemblyError::UnknownMaterial {
                block: block.to_string(),
                material: material.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
