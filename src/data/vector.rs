//! Distributed solution vectors: the read/buffered-write/close contract.
//!
//! Writes are *buffered*: they are not visible to any reader until the owning
//! transfer closes the vector. Closing is a collective synchronization point
//! across all processes sharing the vector -- every participant must call
//! `close()` the same number of times, even a process that buffered nothing.

use crate::topology::object::DofIndex;
use crate::transfer_error::TransferError;
use num_traits::Float;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Distributed solution vector contract (minimal by design).
///
/// `read` must support *ghosted* access: a transfer reads source values by
/// global DOF index regardless of which process owns the underlying entry,
/// because object ownership between the two discretizations need not be
/// co-located even though ids coincide.
pub trait GhostedVector {
    /// Scalar type stored per DOF.
    type Scalar: Float + Send + Sync + 'static;

    /// Global length of the vector.
    fn len(&self) -> usize;

    /// Whether the vector has zero entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the committed value at `index` (owned or ghosted).
    ///
    /// # Errors
    /// Returns `Err(VectorIndexOutOfBounds)` for an index past the global length.
    fn read(&self, index: DofIndex) -> Result<Self::Scalar, TransferError>;

    /// Stage a write at `index`; invisible to readers until [`close`](Self::close).
    ///
    /// # Errors
    /// Returns `Err(VectorIndexOutOfBounds)` for an index past the global length.
    fn buffered_write(&self, index: DofIndex, value: Self::Scalar) -> Result<(), TransferError>;

    /// Commit all buffered writes and synchronize across process boundaries.
    ///
    /// If one index was written several times in the same epoch, the last
    /// write wins.
    fn close(&self) -> Result<(), TransferError>;
}

/// Shared-storage vector for single-address-space runs and unit tests.
///
/// All handles produced by [`ghost`](Self::ghost) view the same committed
/// storage, modelling the cross-process read requirement; each handle stages
/// its own writes and commits them on `close()`. There is no inter-process
/// messaging here -- a distributed backend supplies its own `GhostedVector`.
#[derive(Debug)]
pub struct SharedVector<V = f64> {
    storage: Arc<RwLock<Vec<V>>>,
    buffer: Mutex<Vec<(DofIndex, V)>>,
}

impl<V: Float + Send + Sync + 'static> SharedVector<V> {
    /// A zero-filled vector of global length `len`.
    pub fn zeros(len: usize) -> Self {
        SharedVector {
            storage: Arc::new(RwLock::new(vec![V::zero(); len])),
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// A vector initialized from `values`.
    pub fn from_values(values: Vec<V>) -> Self {
        SharedVector {
            storage: Arc::new(RwLock::new(values)),
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// Another handle onto the same committed storage, with its own write buffer.
    pub fn ghost(&self) -> Self {
        SharedVector {
            storage: Arc::clone(&self.storage),
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// Immediate committed write, bypassing the buffer.
    ///
    /// Initialization convenience for embedding code and tests; a transfer
    /// itself only ever writes through [`buffered_write`](GhostedVector::buffered_write).
    ///
    /// # Errors
    /// Returns `Err(VectorIndexOutOfBounds)` for an index past the global length.
    pub fn set(&self, index: DofIndex, value: V) -> Result<(), TransferError> {
        let mut storage = self.storage.write();
        let len = storage.len();
        let slot = storage
            .get_mut(index)
            .ok_or(TransferError::VectorIndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Overwrite every committed entry with `value`.
    pub fn fill(&self, value: V) {
        for slot in self.storage.write().iter_mut() {
            *slot = value;
        }
    }

    /// Snapshot of the committed storage.
    pub fn snapshot(&self) -> Vec<V> {
        self.storage.read().clone()
    }

    /// Number of writes currently staged on this handle.
    pub fn pending_writes(&self) -> usize {
        self.buffer.lock().len()
    }
}

impl<V: Float + Send + Sync + 'static> GhostedVector for SharedVector<V> {
    type Scalar = V;

    fn len(&self) -> usize {
        self.storage.read().len()
    }

    fn read(&self, index: DofIndex) -> Result<V, TransferError> {
        let storage = self.storage.read();
        storage
            .get(index)
            .copied()
            .ok_or(TransferError::VectorIndexOutOfBounds {
                index,
                len: storage.len(),
            })
    }

    fn buffered_write(&self, index: DofIndex, value: V) -> Result<(), TransferError> {
        let len = self.storage.read().len();
        if index >= len {
            return Err(TransferError::VectorIndexOutOfBounds { index, len });
        }
        self.buffer.lock().push((index, value));
        Ok(())
    }

    fn close(&self) -> Result<(), TransferError> {
        let staged: Vec<_> = self.buffer.lock().drain(..).collect();
        if staged.is_empty() {
            return Ok(());
        }
        let mut storage = self.storage.write();
        for (index, value) in staged {
            // bounds were checked at buffering time
            storage[index] = value;
        }
        Ok(())
    }
}
