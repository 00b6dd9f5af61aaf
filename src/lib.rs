//! # mesh-relay
//!
//! mesh-relay is a Rust library for moving field data between independently-discretized
//! numerical sub-problems that share an identical mesh topology. It implements the direct
//! degree-of-freedom copy/reduction transfer used in multi-level simulation coupling,
//! where a parent problem and one or more child problems each hold their own distributed
//! solution vectors and a transfer step synchronizes a subset of degrees of freedom
//! between them once per coupling iteration.
//!
//! ## Features
//! - Identifier-based DOF mapping between two discretizations of the same mesh
//!   (no geometric interpolation, hence exact)
//! - Closed reduction operators (`COPY`, `SUM`, `AVG`, `MIN`, `MAX`, `PROD`) with
//!   explicit seeding and finalization
//! - Fail-fast compatibility validation before any destination write
//! - Scatter-to-children / gather-from-children orchestration over locally-owned
//!   sub-problem instances
//! - Trait-based collaborator contracts plus a complete in-memory backend for
//!   serial runs and testing
//!
//! ## Hard precondition
//!
//! Both discretizations must be built from the same mesh topology: node and element
//! identifiers coincide object-for-object. The validator checks the node and element
//! *counts*, but id-for-id coincidence is an external precondition that the embedding
//! application guarantees by construction.
//!
//! ## Usage
//! Add `mesh-relay` as a dependency in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mesh-relay = "0.2"
//! ```

// Re-export our major subsystems:
pub mod data;
pub mod memory;
pub mod topology;
pub mod transfer;
pub mod transfer_error;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::fe_type::{FeFamily, FeOrder, FeType};
    pub use crate::data::problem::Problem;
    pub use crate::data::variable::{FieldKind, FieldVariable};
    pub use crate::data::vector::{GhostedVector, SharedVector};
    pub use crate::memory::problem::{InMemoryCoupling, InMemoryProblem};
    pub use crate::topology::mesh::{DofObject, MeshTopology};
    pub use crate::topology::object::{DofIndex, ObjectId, ObjectKind, SystemId, VariableIndex};
    pub use crate::transfer::coupling::{CouplingTransfer, InstanceSet, TransferDirection};
    pub use crate::transfer::driver::DirectFieldTransfer;
    pub use crate::transfer::reduction::Reduction;
    pub use crate::transfer_error::TransferError;
}
