//! The direct DOF copy/reduction transfer engine.
//!
//! Pipeline, leaves first: compatibility validation ([`compat`]), per-object
//! DOF mapping ([`dof_map`]), reduction application ([`reduction`]), the
//! per-problem-pair driver ([`driver`]), and multi-instance orchestration
//! ([`coupling`]).

pub mod compat;
pub mod coupling;
pub mod dof_map;
pub mod driver;
pub mod reduction;

pub use coupling::{CouplingTransfer, ExecutionState, InstanceSet, TransferDirection};
pub use driver::DirectFieldTransfer;
pub use reduction::Reduction;
