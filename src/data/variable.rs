//! Field variables: named quantities defined over a mesh.

use crate::data::fe_type::FeType;
use crate::topology::object::{SystemId, VariableIndex};
use crate::transfer_error::TransferError;
use std::fmt;

/// Field kind of a variable (standard | array | vector).
///
/// Vector-valued variables are representable so a problem can describe them,
/// but the transfer engine categorically rejects them: component-wise DOF
/// mapping for vector fields is not defined here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FieldKind {
    /// One scalar component.
    Standard,
    /// Several independent scalar components under one name.
    Array,
    /// A genuinely vector-valued basis (unsupported for transfer).
    Vector,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Standard => write!(f, "STANDARD"),
            FieldKind::Array => write!(f, "ARRAY"),
            FieldKind::Vector => write!(f, "VECTOR"),
        }
    }
}

/// One named field variable of a sub-problem.
///
/// An array variable with `components == n` occupies variable indices
/// `index .. index + n` in its system's numbering; each component is addressed
/// as `index.offset(c)` during DOF mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldVariable {
    name: String,
    fe_type: FeType,
    kind: FieldKind,
    components: u32,
    system: SystemId,
    index: VariableIndex,
}

impl FieldVariable {
    /// Describe a variable.
    ///
    /// # Errors
    /// Returns `Err(InvalidComponentCount)` if `components == 0`, or if a
    /// `Standard` variable declares more than one component.
    pub fn new(
        name: impl Into<String>,
        fe_type: FeType,
        kind: FieldKind,
        components: u32,
        system: SystemId,
        index: VariableIndex,
    ) -> Result<Self, TransferError> {
        let name = name.into();
        if components == 0 || (kind == FieldKind::Standard && components != 1) {
            return Err(TransferError::InvalidComponentCount { name, components });
        }
        Ok(FieldVariable {
            name,
            fe_type,
            kind,
            components,
            system,
            index,
        })
    }

    /// Variable name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Finite-element descriptor.
    #[inline]
    pub fn fe_type(&self) -> FeType {
        self.fe_type
    }

    /// Field kind.
    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Number of components (1 for standard variables).
    #[inline]
    pub fn components(&self) -> u32 {
        self.components
    }

    /// Owning system.
    #[inline]
    pub fn system(&self) -> SystemId {
        self.system
    }

    /// Base variable index within the owning system.
    #[inline]
    pub fn index(&self) -> VariableIndex {
        self.index
    }
}
