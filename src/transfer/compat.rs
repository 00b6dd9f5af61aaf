//! Compatibility validation between a destination and a source field pairing.
//!
//! All checks run before any DOF is written; a failure aborts the whole
//! transfer with no partial state.

use crate::data::variable::{FieldKind, FieldVariable};
use crate::topology::mesh::MeshTopology;
use crate::transfer_error::TransferError;

/// Destination and source variable lists must pair one-to-one.
pub fn check_variable_counts(to: usize, from: usize) -> Result<(), TransferError> {
    if to != from {
        return Err(TransferError::VariableCountMismatch { to, from });
    }
    Ok(())
}

/// Structural compatibility of one (destination, source) variable pair.
///
/// FE type (order and family), field kind, and component count must all
/// match, and vector-valued variables are rejected outright: component-wise
/// DOF mapping for them is not defined here.
pub fn check_pair(to_var: &FieldVariable, from_var: &FieldVariable) -> Result<(), TransferError> {
    if to_var.fe_type() != from_var.fe_type() {
        return Err(TransferError::FeTypeMismatch {
            to_variable: to_var.name().into(),
            from_variable: from_var.name().into(),
            to_type: to_var.fe_type(),
            from_type: from_var.fe_type(),
        });
    }
    if to_var.kind() != from_var.kind() {
        return Err(TransferError::FieldKindMismatch {
            to_variable: to_var.name().into(),
            from_variable: from_var.name().into(),
            to_kind: to_var.kind(),
            from_kind: from_var.kind(),
        });
    }
    if to_var.kind() == FieldKind::Vector {
        return Err(TransferError::VectorFieldUnsupported {
            variable: to_var.name().into(),
        });
    }
    if to_var.components() != from_var.components() {
        return Err(TransferError::ComponentCountMismatch {
            to_variable: to_var.name().into(),
            from_variable: from_var.name().into(),
            to: to_var.components(),
            from: from_var.components(),
        });
    }
    Ok(())
}

/// Necessary condition for identifier-based mapping: identical node and
/// element counts.
///
/// Counts matching does not prove ids coincide object-for-object; that is a
/// construction precondition this engine cannot verify.
pub fn check_meshes<M: MeshTopology>(to: &M, from: &M) -> Result<(), TransferError> {
    if to.node_count() != from.node_count() || to.element_count() != from.element_count() {
        return Err(TransferError::MeshMismatch {
            to_nodes: to.node_count(),
            to_elements: to.element_count(),
            from_nodes: from.node_count(),
            from_elements: from.element_count(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fe_type::{FeFamily, FeOrder, FeType};
    use crate::topology::object::{SystemId, VariableIndex};

    fn variable(name: &str, fe_type: FeType, kind: FieldKind, components: u32) -> FieldVariable {
        FieldVariable::new(name, fe_type, kind, components, SystemId(0), VariableIndex(0)).unwrap()
    }

    #[test]
    fn count_mismatch() {
        assert_eq!(
            check_variable_counts(2, 1).unwrap_err(),
            TransferError::VariableCountMismatch { to: 2, from: 1 }
        );
        assert!(check_variable_counts(1, 1).is_ok());
    }

    #[test]
    fn fe_type_mismatch_reports_both_types() {
        let to = variable("u", FeType::lagrange_first(), FieldKind::Standard, 1);
        let from = variable(
            "v",
            FeType::new(FeFamily::Lagrange, FeOrder::Second),
            FieldKind::Standard,
            1,
        );
        let err = check_pair(&to, &from).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("FIRST LAGRANGE"), "{msg}");
        assert!(msg.contains("SECOND LAGRANGE"), "{msg}");
    }

    #[test]
    fn kind_mismatch() {
        let to = variable("u", FeType::constant_monomial(), FieldKind::Array, 2);
        let from = variable("v", FeType::constant_monomial(), FieldKind::Standard, 1);
        assert!(matches!(
            check_pair(&to, &from).unwrap_err(),
            TransferError::FieldKindMismatch { .. }
        ));
    }

    #[test]
    fn vector_kind_rejected_even_when_equal() {
        let to = variable("b", FeType::lagrange_first(), FieldKind::Vector, 1);
        let from = variable("b0", FeType::lagrange_first(), FieldKind::Vector, 1);
        assert_eq!(
            check_pair(&to, &from).unwrap_err(),
            TransferError::VectorFieldUnsupported {
                variable: "b".into()
            }
        );
    }

    #[test]
    fn component_mismatch() {
        let to = variable("a", FeType::constant_monomial(), FieldKind::Array, 3);
        let from = variable("b", FeType::constant_monomial(), FieldKind::Array, 2);
        assert_eq!(
            check_pair(&to, &from).unwrap_err(),
            TransferError::ComponentCountMismatch {
                to_variable: "a".into(),
                from_variable: "b".into(),
                to: 3,
                from: 2
            }
        );
    }

    #[test]
    fn matching_pair_passes() {
        let to = variable("u", FeType::lagrange_first(), FieldKind::Standard, 1);
        let from = variable("u0", FeType::lagrange_first(), FieldKind::Standard, 1);
        assert!(check_pair(&to, &from).is_ok());
    }
}
