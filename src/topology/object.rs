//! Strong, zero-cost handles for mesh entities and DOF addressing.
//!
//! Every mesh object (node or element) is represented by a unique, opaque
//! identifier. `ObjectId` wraps a nonzero `u64` to enforce at compile- and
//! runtime that 0 is reserved as an invalid or sentinel value. Identifiers are
//! the whole basis of the transfer: two discretizations built from the same
//! mesh topology share them object-for-object, so a DOF mapping needs no
//! geometry at all.
//!
//! This module provides:
//! - A transparent `ObjectId` newtype around `NonZeroU64` for zero-cost
//!   memory layout guarantees.
//! - `ObjectKind`/`ObjectKey` for distinguishing node and element id spaces.
//! - `SystemId` and `VariableIndex` newtypes addressing the (system, variable)
//!   plane of a DOF, and the flat `DofIndex` into a distributed vector.

use crate::transfer_error::TransferError;
use std::{fmt, num::NonZeroU64};

/// Identifier of one mesh object, stable across the discretizations being coupled.
///
/// # Memory layout
/// This type is `repr(transparent)`, meaning it has the same ABI and
/// alignment as its single field (`NonZeroU64`).
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct ObjectId(NonZeroU64);

impl ObjectId {
    /// Creates a new `ObjectId` from a raw `u64` value.
    ///
    /// # Errors
    /// Returns `Err(InvalidObjectId)` if `raw == 0`; 0 is reserved as an
    /// invalid or sentinel value.
    #[inline]
    pub fn new(raw: u64) -> Result<Self, TransferError> {
        NonZeroU64::new(raw)
            .map(ObjectId)
            .ok_or(TransferError::InvalidObjectId)
    }

    /// Returns the inner `u64` value of this `ObjectId`.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectId").field(&self.get()).finish()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Whether a mesh object is a node or an element.
///
/// Nodes and elements have independent id spaces; an `ObjectId` is only
/// meaningful together with its kind.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum ObjectKind {
    /// A mesh node.
    Node,
    /// A mesh element.
    Element,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Node => write!(f, "node"),
            ObjectKind::Element => write!(f, "element"),
        }
    }
}

/// Kind-qualified object identifier, usable as a map key.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ObjectKey {
    /// Node or element.
    pub kind: ObjectKind,
    /// Identifier within that kind's id space.
    pub id: ObjectId,
}

impl ObjectKey {
    /// Key for the node with identifier `id`.
    #[inline]
    pub const fn node(id: ObjectId) -> Self {
        ObjectKey {
            kind: ObjectKind::Node,
            id,
        }
    }

    /// Key for the element with identifier `id`.
    #[inline]
    pub const fn element(id: ObjectId) -> Self {
        ObjectKey {
            kind: ObjectKind::Element,
            id,
        }
    }
}

/// Identifier of one equation system within a problem.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct SystemId(pub u32);

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of one variable within its system's variable numbering.
///
/// An array variable with `n` components occupies `n` consecutive indices;
/// [`offset`](Self::offset) addresses the per-component index.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct VariableIndex(pub u32);

impl VariableIndex {
    /// The variable index of component `c`, i.e. `self + c`.
    #[inline]
    pub const fn offset(self, c: u32) -> VariableIndex {
        VariableIndex(self.0 + c)
    }
}

impl fmt::Display for VariableIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flat global address of one DOF in a distributed solution vector.
pub type DofIndex = usize;
