//! Reduction kinds: rules for combining source contributions into a destination DOF.
//!
//! The kind is selected by name at configuration time and dispatched as a
//! closed enum during the transfer loop. Every non-COPY kind requires the
//! destination to be *seeded* before the first contribution is folded; seeding
//! is an explicit pass (see [`DirectFieldTransfer::seed`]), never an implicit
//! initial vector value. AVG accumulates the raw sum and divides once by the
//! global instance count after the last contribution.
//!
//! [`DirectFieldTransfer::seed`]: crate::transfer::driver::DirectFieldTransfer::seed

use crate::transfer_error::TransferError;
use num_traits::Float;
use std::fmt;
use std::str::FromStr;

/// Operator combining multiple source contributions into one destination value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Reduction {
    /// Overwrite the destination unconditionally.
    Copy,
    /// Accumulate the sum of all contributions.
    Sum,
    /// Accumulate the sum, then divide once by the number of source instances.
    Average,
    /// Keep the smallest contribution.
    Min,
    /// Keep the largest contribution.
    Max,
    /// Accumulate the product of all contributions.
    Product,
}

impl Reduction {
    /// Whether this kind needs the destination seeded before folding.
    #[inline]
    pub fn requires_seed(self) -> bool {
        !matches!(self, Reduction::Copy)
    }

    /// The seed value written to every destination DOF before folding, or
    /// `None` for COPY.
    ///
    /// MIN and MAX seed with the identity of their operator (+∞ / −∞); a zero
    /// seed would silently clamp all-positive or all-negative fields. PROD
    /// seeds at 1 for the same reason.
    #[inline]
    pub fn seed<V: Float>(self) -> Option<V> {
        match self {
            Reduction::Copy => None,
            Reduction::Sum | Reduction::Average => Some(V::zero()),
            Reduction::Min => Some(V::infinity()),
            Reduction::Max => Some(V::neg_infinity()),
            Reduction::Product => Some(V::one()),
        }
    }

    /// Fold one incoming contribution into the current destination value.
    #[inline]
    pub fn fold<V: Float>(self, current: V, incoming: V) -> V {
        match self {
            Reduction::Copy => incoming,
            Reduction::Sum | Reduction::Average => current + incoming,
            Reduction::Min => current.min(incoming),
            Reduction::Max => current.max(incoming),
            Reduction::Product => current * incoming,
        }
    }

    /// Map the accumulated value to the final result once all `sources`
    /// instances have contributed. Identity for everything but AVG.
    ///
    /// # Errors
    /// Returns `Err(AverageWithoutSources)` when averaging over zero
    /// instances, and `Err(ScalarConversion)` if `sources` does not fit in `V`.
    pub fn finalize<V: Float>(self, accumulated: V, sources: usize) -> Result<V, TransferError> {
        match self {
            Reduction::Average => {
                if sources == 0 {
                    return Err(TransferError::AverageWithoutSources);
                }
                let n = V::from(sources).ok_or(TransferError::ScalarConversion { count: sources })?;
                Ok(accumulated / n)
            }
            _ => Ok(accumulated),
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reduction::Copy => write!(f, "COPY"),
            Reduction::Sum => write!(f, "SUM"),
            Reduction::Average => write!(f, "AVG"),
            Reduction::Min => write!(f, "MIN"),
            Reduction::Max => write!(f, "MAX"),
            Reduction::Product => write!(f, "PROD"),
        }
    }
}

impl FromStr for Reduction {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COPY" => Ok(Reduction::Copy),
            "SUM" => Ok(Reduction::Sum),
            "AVG" => Ok(Reduction::Average),
            "MIN" => Ok(Reduction::Min),
            "MAX" => Ok(Reduction::Max),
            "PROD" => Ok(Reduction::Product),
            other => Err(TransferError::UnknownReduction { name: other.into() }),
        }
    }
}
