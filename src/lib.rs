//! Assembly and solution of one-dimensional linear finite element models of axial bars.
//!
//! A model consists of nodal coordinates, blocks of two-node bar elements, a material table,
//! boundary conditions and distributed loads. [`solve_bar_model`] assembles the global stiffness
//! matrix and force vector, eliminates prescribed degrees of freedom and returns the nodal
//! displacements together with the assembled system.
use nalgebra::RealField;

pub mod assembly;
pub mod conditions;
pub mod dof;
pub mod error;
pub mod material;
pub mod mesh;
pub mod model;
pub mod options;
pub mod solve;

pub use error::AssemblyError;
pub use model::{solve_bar_model, BarModel, BarSolution};
pub use options::SolverOptions;

pub extern crate nalgebra;

/// Scalar type used throughout the crate.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}
