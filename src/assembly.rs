//! Assembly of the global stiffness matrix and force vector.
//!
//! [`local`] computes element matrices and vectors for a single bar element, while [`global`]
//! scatters them into the global system.
pub mod global;
pub mod local;

pub use global::*;
