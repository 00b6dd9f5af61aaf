//! Per-object DOF mapping between two discretizations sharing an object id.
//!
//! A pure identifier/index lookup: no geometric computation occurs, so the
//! mapping is exact. For each variable component, the component is skipped
//! entirely unless *both* objects carry DOFs for it; otherwise every
//! sub-component is resolved at the same `(variable + c, component)` address
//! on both sides. Equal sub-component cardinality is implied by the FE-type
//! equality the validator has already established.

use crate::data::variable::FieldVariable;
use crate::topology::mesh::DofObject;
use crate::topology::object::DofIndex;
use crate::transfer_error::TransferError;

/// Enumerate the (destination DOF, source DOF) index pairs to transfer for
/// one shared mesh object.
pub fn mapped_dof_pairs<T, S>(
    to_object: &T,
    from_object: &S,
    to_var: &FieldVariable,
    from_var: &FieldVariable,
) -> Result<Vec<(DofIndex, DofIndex)>, TransferError>
where
    T: DofObject,
    S: DofObject,
{
    let mut pairs = Vec::new();
    for vc in 0..to_var.components() {
        let to_index = to_var.index().offset(vc);
        let from_index = from_var.index().offset(vc);
        if to_object.dof_count(to_var.system(), to_index) == 0
            || from_object.dof_count(from_var.system(), from_index) == 0
        {
            continue;
        }
        for comp in 0..to_object.component_count(to_var.system(), to_index) {
            let to_dof = to_object.dof_index(to_var.system(), to_index, comp)?;
            let from_dof = from_object.dof_index(from_var.system(), from_index, comp)?;
            pairs.push((to_dof, from_dof));
        }
    }
    Ok(pairs)
}

/// Enumerate only the destination-side DOF indices of one object, for the
/// seeding and finalization passes that touch no source.
pub fn destination_dofs<T>(
    to_object: &T,
    to_var: &FieldVariable,
) -> Result<Vec<DofIndex>, TransferError>
where
    T: DofObject,
{
    let mut dofs = Vec::new();
    for vc in 0..to_var.components() {
        let to_index = to_var.index().offset(vc);
        if to_object.dof_count(to_var.system(), to_index) == 0 {
            continue;
        }
        for comp in 0..to_object.component_count(to_var.system(), to_index) {
            dofs.push(to_object.dof_index(to_var.system(), to_index, comp)?);
        }
    }
    Ok(dofs)
}
