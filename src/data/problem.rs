//! The sub-problem contract: variable resolution, mesh access, vector access.

use crate::data::variable::FieldVariable;
use crate::data::vector::GhostedVector;
use crate::topology::mesh::MeshTopology;
use crate::topology::object::SystemId;
use crate::transfer_error::TransferError;

/// One participant in a transfer: a parent problem or one of its children.
///
/// A problem owns its mesh, its field variables, and the distributed solution
/// vectors backing them. The transfer engine only reads this structure; the
/// single mutation it performs is writing DOF values through a vector's
/// buffered-write interface.
pub trait Problem {
    /// Mesh view exposed by this problem.
    type Mesh: MeshTopology;
    /// Distributed vector type backing this problem's systems.
    type Vector: GhostedVector;

    /// Human-readable problem name, used in diagnostics.
    fn name(&self) -> &str;

    /// Resolve a field variable by name, of any kind (primary or auxiliary).
    ///
    /// # Errors
    /// Returns `Err(UnknownVariable)` if no variable of that name exists.
    fn variable(&self, name: &str) -> Result<&FieldVariable, TransferError>;

    /// The problem's mesh.
    fn mesh(&self) -> &Self::Mesh;

    /// The vector holding `variable`'s values: the primary solution vector of
    /// its system, or the auxiliary vector registered under `tag`.
    ///
    /// # Errors
    /// Returns `Err(UnknownVectorTag)` for an unregistered tag, or
    /// `Err(UnknownSystem)` if the variable's system is foreign to this problem.
    fn vector(
        &self,
        variable: &FieldVariable,
        tag: Option<&str>,
    ) -> Result<&Self::Vector, TransferError>;

    /// Recompute state that depends on `system`'s solution after a close.
    ///
    /// Default is a no-op; backends with ghost caches or dependent auxiliary
    /// state hook their update here.
    fn update_system(&self, _system: SystemId) -> Result<(), TransferError> {
        Ok(())
    }
}
