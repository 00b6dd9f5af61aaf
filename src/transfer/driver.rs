//! The per-problem-pair transfer driver.
//!
//! One [`transfer`](DirectFieldTransfer::transfer) call moves one source
//! problem's values into one destination problem: validate the full pairing
//! fail-fast, then for each variable pair iterate the destination-owned
//! objects (all nodes, then all elements), map DOFs by identifier, fold each
//! mapped value through the reduction, and finally close the destination
//! vector and update its system.
//!
//! Only destination-owned objects are iterated; source values are read by
//! global DOF index regardless of which process owns the source object, since
//! ownership between the two discretizations need not be co-located even
//! though ids match numerically.

use crate::data::problem::Problem;
use crate::data::variable::FieldVariable;
use crate::data::vector::GhostedVector;
use crate::topology::mesh::{DofObject, MeshTopology};
use crate::topology::object::ObjectKind;
use crate::transfer::compat::{check_meshes, check_pair, check_variable_counts};
use crate::transfer::dof_map::{destination_dofs, mapped_dof_pairs};
use crate::transfer::reduction::Reduction;
use crate::transfer_error::TransferError;

/// Configuration of one direct field transfer: the variable pairing, the
/// reduction kind, and optional per-side auxiliary vector tags.
#[derive(Clone, Debug)]
pub struct DirectFieldTransfer {
    to_variables: Vec<String>,
    from_variables: Vec<String>,
    reduction: Reduction,
    to_vector_tag: Option<String>,
    from_vector_tag: Option<String>,
}

impl DirectFieldTransfer {
    /// Pair the named destination variables with the named source variables.
    ///
    /// The lists pair one-to-one; length equality is validated at transfer
    /// time together with everything else.
    pub fn new(
        to_variables: Vec<String>,
        from_variables: Vec<String>,
        reduction: Reduction,
    ) -> Self {
        DirectFieldTransfer {
            to_variables,
            from_variables,
            reduction,
            to_vector_tag: None,
            from_vector_tag: None,
        }
    }

    /// Convenience for the common single-variable pairing.
    pub fn single(
        to_variable: impl Into<String>,
        from_variable: impl Into<String>,
        reduction: Reduction,
    ) -> Self {
        DirectFieldTransfer::new(
            vec![to_variable.into()],
            vec![from_variable.into()],
            reduction,
        )
    }

    /// Write into the destination vector registered under `tag` instead of
    /// the primary solution vector.
    pub fn with_to_vector_tag(mut self, tag: impl Into<String>) -> Self {
        self.to_vector_tag = Some(tag.into());
        self
    }

    /// Read from the source vector registered under `tag` instead of the
    /// primary solution vector.
    pub fn with_from_vector_tag(mut self, tag: impl Into<String>) -> Self {
        self.from_vector_tag = Some(tag.into());
        self
    }

    /// The configured reduction kind.
    #[inline]
    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    /// Destination variable names, in pairing order.
    #[inline]
    pub fn to_variable_names(&self) -> &[String] {
        &self.to_variables
    }

    /// Source variable names, in pairing order.
    #[inline]
    pub fn from_variable_names(&self) -> &[String] {
        &self.from_variables
    }

    /// Run every compatibility check without writing anything.
    ///
    /// Checks, in order: list lengths, variable resolution on both problems,
    /// per-pair FE type / field kind / component compatibility, vector (tag)
    /// resolution, and mesh node/element counts.
    pub fn validate<P: Problem>(&self, to: &P, from: &P) -> Result<(), TransferError> {
        check_variable_counts(self.to_variables.len(), self.from_variables.len())?;
        for (to_name, from_name) in self.to_variables.iter().zip(&self.from_variables) {
            let to_var = to.variable(to_name)?;
            let from_var = from.variable(from_name)?;
            check_pair(to_var, from_var)?;
            to.vector(to_var, self.to_vector_tag.as_deref())?;
            from.vector(from_var, self.from_vector_tag.as_deref())?;
        }
        check_meshes(to.mesh(), from.mesh())
    }

    /// Fold one source problem's values into the destination problem.
    ///
    /// Validation precedes the per-object loop, so a failure commits no
    /// partial writes. Each variable pair ends with a destination-vector
    /// close and a system update.
    ///
    /// # Errors
    /// Any validation failure, an unmatched source object id
    /// (`MissingSourceObject`), or a vector access error.
    pub fn transfer<P: Problem>(&self, to: &P, from: &P) -> Result<(), TransferError> {
        self.validate(to, from)?;
        for (to_name, from_name) in self.to_variables.iter().zip(&self.from_variables) {
            log::debug!(
                "transferring '{}' <- '{}' ({})",
                to_name,
                from_name,
                self.reduction
            );
            let to_var = to.variable(to_name)?;
            let from_var = from.variable(from_name)?;
            let to_solution = to.vector(to_var, self.to_vector_tag.as_deref())?;
            let from_solution = from.vector(from_var, self.from_vector_tag.as_deref())?;
            let to_mesh = to.mesh();
            let from_mesh = from.mesh();

            for node in to_mesh.local_nodes() {
                let from_node = from_mesh.node_by_id(node.id()).ok_or_else(|| {
                    TransferError::MissingSourceObject {
                        kind: ObjectKind::Node,
                        id: node.id(),
                    }
                })?;
                self.transfer_object(&node, &from_node, to_var, from_var, to_solution, from_solution)?;
            }
            for element in to_mesh.local_elements() {
                let from_element = from_mesh.element_by_id(element.id()).ok_or_else(|| {
                    TransferError::MissingSourceObject {
                        kind: ObjectKind::Element,
                        id: element.id(),
                    }
                })?;
                self.transfer_object(
                    &element,
                    &from_element,
                    to_var,
                    from_var,
                    to_solution,
                    from_solution,
                )?;
            }

            to_solution.close()?;
            to.update_system(to_var.system())?;
        }
        Ok(())
    }

    /// Write the reduction's seed value to every mapped destination DOF.
    ///
    /// Must run once per gather execution, before the first instance is
    /// folded; a no-op for COPY. Every process seeds its own partition, even
    /// one that owns no source instances, and participates in the close.
    pub fn seed<P: Problem>(&self, to: &P) -> Result<(), TransferError> {
        let seed: Option<<P::Vector as GhostedVector>::Scalar> = self.reduction.seed();
        let Some(seed) = seed else {
            return Ok(());
        };
        for to_name in &self.to_variables {
            let to_var = to.variable(to_name)?;
            let to_solution = to.vector(to_var, self.to_vector_tag.as_deref())?;
            for object in owned_objects(to.mesh()) {
                for dof in destination_dofs(&object, to_var)? {
                    to_solution.buffered_write(dof, seed)?;
                }
            }
            to_solution.close()?;
        }
        Ok(())
    }

    /// Map each accumulated destination DOF to its final value once all
    /// `sources` instances have contributed. A no-op unless the reduction
    /// has a nontrivial finalization (AVG divides by `sources`).
    pub fn finalize<P: Problem>(&self, to: &P, sources: usize) -> Result<(), TransferError> {
        if self.reduction != Reduction::Average {
            return Ok(());
        }
        for to_name in &self.to_variables {
            let to_var = to.variable(to_name)?;
            let to_solution = to.vector(to_var, self.to_vector_tag.as_deref())?;
            for object in owned_objects(to.mesh()) {
                for dof in destination_dofs(&object, to_var)? {
                    let accumulated = to_solution.read(dof)?;
                    to_solution.buffered_write(dof, self.reduction.finalize(accumulated, sources)?)?;
                }
            }
            to_solution.close()?;
            to.update_system(to_var.system())?;
        }
        Ok(())
    }

    fn transfer_object<T, S, W>(
        &self,
        to_object: &T,
        from_object: &S,
        to_var: &FieldVariable,
        from_var: &FieldVariable,
        to_solution: &W,
        from_solution: &W,
    ) -> Result<(), TransferError>
    where
        T: DofObject,
        S: DofObject,
        W: GhostedVector,
    {
        for (to_dof, from_dof) in mapped_dof_pairs(to_object, from_object, to_var, from_var)? {
            let incoming = from_solution.read(from_dof)?;
            let current = to_solution.read(to_dof)?;
            to_solution.buffered_write(to_dof, self.reduction.fold(current, incoming))?;
        }
        Ok(())
    }
}

/// All destination-owned objects, nodes first, then elements.
fn owned_objects<'m, M: MeshTopology>(mesh: &'m M) -> impl Iterator<Item = M::Object<'m>> + 'm {
    mesh.local_nodes().chain(mesh.local_elements())
}
