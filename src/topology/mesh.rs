//! Read-only mesh and DOF query contracts consumed by the transfer engine.
//!
//! The engine never mutates a mesh. It needs exactly four things from one:
//! global node/element counts (for the identical-mesh check), iteration over
//! the locally-owned objects of each kind, lookup of an object by id on the
//! source side, and per-object DOF queries. Everything else about mesh storage
//! and partitioning is the embedding application's business.

use crate::topology::object::{DofIndex, ObjectId, SystemId, VariableIndex};
use crate::transfer_error::TransferError;

/// Per-object DOF queries for one (system, variable) pair.
///
/// A DOF exists on an object only if [`dof_count`](Self::dof_count) is nonzero
/// for that pair. [`dof_index`](Self::dof_index) resolves the flat global
/// address of one sub-component; both discretizations resolve the same
/// `(variable, component)` addressing, which is what makes the mapping exact.
pub trait DofObject {
    /// Stable identifier of this object within its kind's id space.
    fn id(&self) -> ObjectId;

    /// Number of DOFs this object carries for `(system, variable)`.
    fn dof_count(&self, system: SystemId, variable: VariableIndex) -> usize;

    /// Number of addressable sub-components for `(system, variable)`.
    fn component_count(&self, system: SystemId, variable: VariableIndex) -> usize;

    /// Flat global index of sub-component `component` for `(system, variable)`.
    ///
    /// # Errors
    /// Returns `Err(MissingDof)` if the object carries no such component.
    fn dof_index(
        &self,
        system: SystemId,
        variable: VariableIndex,
        component: usize,
    ) -> Result<DofIndex, TransferError>;
}

/// Read-only topology view of one sub-problem's mesh.
///
/// # Associated Types
/// - `Object`: the borrowed object handle yielded by iteration and id lookup;
///   it implements [`DofObject`].
///
/// Iteration order of [`local_nodes`](Self::local_nodes) and
/// [`local_elements`](Self::local_elements) must be deterministic across runs;
/// reduction results depend on it bit-for-bit (though not in value for the
/// commutative operators).
pub trait MeshTopology {
    /// Borrowed handle to one mesh object.
    type Object<'a>: DofObject
    where
        Self: 'a;

    /// Global number of nodes in the mesh.
    fn node_count(&self) -> usize;

    /// Global number of elements in the mesh.
    fn element_count(&self) -> usize;

    /// Iterate the nodes owned by the current process, in deterministic order.
    fn local_nodes<'a>(&'a self) -> Box<dyn Iterator<Item = Self::Object<'a>> + 'a>;

    /// Iterate the elements owned by the current process, in deterministic order.
    fn local_elements<'a>(&'a self) -> Box<dyn Iterator<Item = Self::Object<'a>> + 'a>;

    /// Look up a node by id, regardless of which process owns it.
    fn node_by_id(&self, id: ObjectId) -> Option<Self::Object<'_>>;

    /// Look up an element by id, regardless of which process owns it.
    fn element_by_id(&self, id: ObjectId) -> Option<Self::Object<'_>>;
}
