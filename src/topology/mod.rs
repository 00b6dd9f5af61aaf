//! Top-level module for mesh topology abstractions.
//!
//! This module provides the identifier newtypes and the read-only mesh/DOF query
//! contracts the transfer engine consumes:
//! - Strong handles for mesh objects, systems, and variables
//! - The `MeshTopology` and `DofObject` traits for owned-object iteration and
//!   identifier-based DOF lookup

pub mod mesh;
pub mod object;

pub use mesh::{DofObject, MeshTopology};
pub use object::{DofIndex, ObjectId, ObjectKey, ObjectKind, SystemId, VariableIndex};
