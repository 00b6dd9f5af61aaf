//! Multi-instance orchestration: one parent, N children, one direction.
//!
//! The orchestrator walks the locally-owned sub-problem instances and invokes
//! the driver once per instance pair. Gathering with a non-COPY reduction is
//! an explicit accumulator pass: validate every local pair (no writes on any
//! failure), seed the parent destination once, fold each child, then finalize
//! (AVG divides by the *global* instance count). Instance enumeration order is
//! fixed by index, keeping floating-point accumulation reproducible across
//! runs.

use crate::data::problem::Problem;
use crate::transfer::driver::DirectFieldTransfer;
use crate::transfer::reduction::Reduction;
use crate::transfer_error::TransferError;
use itertools::Itertools;
use std::fmt;

/// Enumeration and locality of the sub-problem instances on this process.
///
/// Indices are global: every process sees the same `instance_count()` and the
/// same index-to-instance assignment, but only locally-owned indices resolve
/// to a resident problem.
pub trait InstanceSet {
    /// The participating problem type.
    type Problem: Problem;

    /// Global number of child instances.
    fn instance_count(&self) -> usize;

    /// Whether instance `index` is resident on this process.
    fn is_local(&self, index: usize) -> bool;

    /// The resident problem for a locally-owned instance.
    ///
    /// # Errors
    /// Returns `Err(InstanceNotLocal)` for an index that is out of range or
    /// not resident here.
    fn instance(&self, index: usize) -> Result<&Self::Problem, TransferError>;

    /// The single parent problem (resident on every process).
    fn parent(&self) -> &Self::Problem;
}

/// Which way field values flow between the parent and its children.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TransferDirection {
    /// Parent values are copied out to every locally-owned child.
    ScatterToChildren,
    /// Child values are folded into the parent, one instance at a time.
    GatherFromChildren,
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferDirection::ScatterToChildren => write!(f, "scatter to children"),
            TransferDirection::GatherFromChildren => write!(f, "gather from children"),
        }
    }
}

/// Lifecycle of one orchestrated transfer.
#[derive(Clone, Debug, PartialEq)]
pub enum ExecutionState {
    /// `execute` has not run yet.
    NotStarted,
    /// An execution is in flight.
    Running(TransferDirection),
    /// The last execution finished cleanly.
    Completed,
    /// The last execution aborted; the error is retained for inspection.
    Failed(TransferError),
}

/// Orchestrates one configured field transfer across a parent and its children.
///
/// Direction and reduction are fixed at construction, which is where the
/// scatter/COPY restriction is enforced: reducing across multiple children is
/// meaningless when scattering one parent value out to each of them.
#[derive(Clone, Debug)]
pub struct CouplingTransfer {
    name: String,
    field: DirectFieldTransfer,
    direction: TransferDirection,
    state: ExecutionState,
}

impl CouplingTransfer {
    /// Configure an orchestrated transfer.
    ///
    /// # Errors
    /// Returns `Err(ReductionDirectionUnsupported)` for a non-COPY reduction
    /// combined with [`TransferDirection::ScatterToChildren`].
    pub fn new(
        name: impl Into<String>,
        field: DirectFieldTransfer,
        direction: TransferDirection,
    ) -> Result<Self, TransferError> {
        if direction == TransferDirection::ScatterToChildren
            && field.reduction() != Reduction::Copy
        {
            return Err(TransferError::ReductionDirectionUnsupported {
                reduction: field.reduction(),
            });
        }
        Ok(CouplingTransfer {
            name: name.into(),
            field,
            direction,
            state: ExecutionState::NotStarted,
        })
    }

    /// The transfer's name, used in progress messages.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured direction.
    #[inline]
    pub fn direction(&self) -> TransferDirection {
        self.direction
    }

    /// The configured field pairing and reduction.
    #[inline]
    pub fn field(&self) -> &DirectFieldTransfer {
        &self.field
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    /// Run the transfer over every locally-owned instance.
    ///
    /// A failure aborts the remaining iteration, moves the state to
    /// [`ExecutionState::Failed`], and propagates the error.
    pub fn execute<S: InstanceSet>(&mut self, instances: &S) -> Result<(), TransferError> {
        self.state = ExecutionState::Running(self.direction);
        let result = self.run(instances);
        self.state = match &result {
            Ok(()) => ExecutionState::Completed,
            Err(err) => ExecutionState::Failed(err.clone()),
        };
        result
    }

    fn run<S: InstanceSet>(&self, instances: &S) -> Result<(), TransferError> {
        log::info!(
            "beginning transfer '{}' ({}, {} -> {})",
            self.name,
            self.direction,
            self.field.from_variable_names().iter().join(", "),
            self.field.to_variable_names().iter().join(", "),
        );

        let global = instances.instance_count();
        if global == 0 {
            log::info!("finished transfer '{}' (no instances)", self.name);
            return Ok(());
        }
        let local: Vec<usize> = (0..global).filter(|&i| instances.is_local(i)).collect();
        let parent = instances.parent();

        match self.direction {
            TransferDirection::ScatterToChildren => {
                for &i in &local {
                    self.field.transfer(instances.instance(i)?, parent)?;
                }
            }
            TransferDirection::GatherFromChildren => {
                if self.field.reduction() == Reduction::Copy {
                    for &i in &local {
                        self.field.transfer(parent, instances.instance(i)?)?;
                    }
                } else {
                    if local.is_empty() {
                        log::warn!(
                            "transfer '{}': no locally-owned instances; seeding and closing only",
                            self.name
                        );
                    }
                    // validate every local pair before the first write
                    for &i in &local {
                        self.field.validate(parent, instances.instance(i)?)?;
                    }
                    self.field.seed(parent)?;
                    for &i in &local {
                        self.field.transfer(parent, instances.instance(i)?)?;
                    }
                    self.field.finalize(parent, global)?;
                }
            }
        }

        log::info!("finished transfer '{}'", self.name);
        Ok(())
    }
}
