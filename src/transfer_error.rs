//! TransferError: unified error type for mesh-relay public APIs.
//!
//! Every failure a transfer can produce is structural or configurational, never
//! transient: a failed validation aborts the whole transfer before any destination
//! write, and there is no retry at this layer. Variants embed the conflicting
//! concrete values (both FE types, both counts) so a misconfiguration is
//! diagnosable from the message alone.

use crate::data::fe_type::FeType;
use crate::data::variable::FieldKind;
use crate::topology::object::{ObjectId, ObjectKind, SystemId, VariableIndex};
use crate::transfer::reduction::Reduction;
use thiserror::Error;

/// Unified error type for mesh-relay operations.
///
/// Variants fall into three classes:
/// - *configuration* errors: mismatched pairings, incompatible variables,
///   non-identical meshes, a reduction unsupported for the transfer direction;
/// - *reference* errors: a named variable, vector tag, or instance that cannot
///   be resolved in its owning problem;
/// - *unsupported-operation* errors: vector-field transfer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Attempted to construct an ObjectId with a zero value (invalid).
    #[error("ObjectId must be non-zero (0 is reserved as invalid/sentinel)")]
    InvalidObjectId,
    /// Destination and source variable lists have different lengths.
    #[error("number of transferred variables must be the same in both problems: {to} destination vs {from} source")]
    VariableCountMismatch {
        /// Destination list length.
        to: usize,
        /// Source list length.
        from: usize,
    },
    /// A named variable is not defined on its owning problem.
    #[error("variable '{variable}' is not defined on problem '{problem}'")]
    UnknownVariable {
        /// Name of the problem that was queried.
        problem: String,
        /// Name of the missing variable.
        variable: String,
    },
    /// Paired variables differ in FE type (order and family).
    #[error("corresponding variables '{to_variable}' and '{from_variable}' must be the same type (order and family): {to_type} vs {from_type}")]
    FeTypeMismatch {
        /// Destination variable name.
        to_variable: String,
        /// Source variable name.
        from_variable: String,
        /// Destination FE type.
        to_type: FeType,
        /// Source FE type.
        from_type: FeType,
    },
    /// Paired variables differ in field kind (standard | array | vector).
    #[error("corresponding variables '{to_variable}' and '{from_variable}' must be the same field kind: {to_kind} vs {from_kind}")]
    FieldKindMismatch {
        /// Destination variable name.
        to_variable: String,
        /// Source variable name.
        from_variable: String,
        /// Destination field kind.
        to_kind: FieldKind,
        /// Source field kind.
        from_kind: FieldKind,
    },
    /// Vector-field variables have no component-wise DOF mapping here.
    #[error("unable to transfer vector variable '{variable}'")]
    VectorFieldUnsupported {
        /// Name of the offending variable.
        variable: String,
    },
    /// Paired variables differ in component count.
    #[error("corresponding variables '{to_variable}' and '{from_variable}' must have the same number of components: {to} vs {from}")]
    ComponentCountMismatch {
        /// Destination variable name.
        to_variable: String,
        /// Source variable name.
        from_variable: String,
        /// Destination component count.
        to: u32,
        /// Source component count.
        from: u32,
    },
    /// Destination and source meshes differ in node or element count.
    #[error("meshes must be identical: destination has {to_nodes} nodes / {to_elements} elements, source has {from_nodes} nodes / {from_elements} elements")]
    MeshMismatch {
        /// Destination node count.
        to_nodes: usize,
        /// Destination element count.
        to_elements: usize,
        /// Source node count.
        from_nodes: usize,
        /// Source element count.
        from_elements: usize,
    },
    /// Scattering one parent value to many children admits no reduction but COPY.
    #[error("scatter to children is only supported for COPY reductions, got {reduction}")]
    ReductionDirectionUnsupported {
        /// The rejected reduction kind.
        reduction: Reduction,
    },
    /// A reduction name did not parse.
    #[error("unknown reduction '{name}' (expected one of COPY, SUM, AVG, MIN, MAX, PROD)")]
    UnknownReduction {
        /// The unparseable name.
        name: String,
    },
    /// A named auxiliary vector tag is not registered on its owning problem.
    #[error("no vector is registered under tag '{tag}' on problem '{problem}'")]
    UnknownVectorTag {
        /// Name of the problem that was queried.
        problem: String,
        /// The missing tag.
        tag: String,
    },
    /// A system id is not known to its owning problem.
    #[error("system {system} is not known to problem '{problem}'")]
    UnknownSystem {
        /// Name of the problem that was queried.
        problem: String,
        /// The missing system id.
        system: SystemId,
    },
    /// The source mesh has no object with the destination object's id.
    ///
    /// Mesh sizes matched, so this indicates the identical-ids precondition
    /// was violated by construction.
    #[error("source mesh has no {kind} with id {id}")]
    MissingSourceObject {
        /// Node or element.
        kind: ObjectKind,
        /// The unmatched identifier.
        id: ObjectId,
    },
    /// A DOF lookup addressed a component the object does not carry.
    #[error("{kind} {id} has no DOF for system {system}, variable {variable}, component {component}")]
    MissingDof {
        /// Node or element.
        kind: ObjectKind,
        /// Object identifier.
        id: ObjectId,
        /// Owning system.
        system: SystemId,
        /// Per-component variable index.
        variable: VariableIndex,
        /// The out-of-range sub-component.
        component: usize,
    },
    /// A vector access was out of bounds.
    #[error("index {index} is out of bounds for a vector of length {len}")]
    VectorIndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Vector length.
        len: usize,
    },
    /// Averaging requires at least one source instance.
    #[error("cannot average over zero source instances")]
    AverageWithoutSources,
    /// The instance count does not fit in the vector's scalar type.
    #[error("cannot represent instance count {count} in the vector scalar type")]
    ScalarConversion {
        /// The unrepresentable count.
        count: usize,
    },
    /// An instance index is valid globally but not resident on this process.
    #[error("sub-problem instance {index} is not locally owned")]
    InstanceNotLocal {
        /// Global instance index.
        index: usize,
    },
    /// Attempted to register a zero-length DOF span in a layout.
    #[error("DOF spans must have nonzero length")]
    ZeroLengthSpan,
    /// Attempted to register a second DOF span for the same (object, variable).
    #[error("duplicate DOF span for {kind} {id}, variable {variable}")]
    DuplicateSpan {
        /// Node or element.
        kind: ObjectKind,
        /// Object identifier.
        id: ObjectId,
        /// Per-component variable index.
        variable: VariableIndex,
    },
    /// A DOF layout invariant was violated (non-contiguous or inconsistent spans).
    #[error("DOF layout corrupt: span ({offset}, {len}) breaks contiguity")]
    SpanMismatch {
        /// Span offset.
        offset: usize,
        /// Span length.
        len: usize,
    },
    /// A standard (non-array) variable must have exactly one component.
    #[error("standard variable '{name}' must have exactly one component, got {components}")]
    InvalidComponentCount {
        /// Variable name.
        name: String,
        /// The rejected component count.
        components: u32,
    },
    /// A variable name was registered twice on one problem.
    #[error("a variable named '{name}' is already registered on problem '{problem}'")]
    DuplicateVariable {
        /// Name of the owning problem.
        problem: String,
        /// The duplicated variable name.
        name: String,
    },
    /// Local object ids must be a subset of the mesh's global ids.
    #[error("{kind} {id} cannot be marked locally owned: it is not in the mesh")]
    LocalObjectNotInMesh {
        /// Node or element.
        kind: ObjectKind,
        /// The foreign identifier.
        id: ObjectId,
    },
}
