//! DofLayout: mapping (object, variable) pairs to contiguous slices of a
//! system's solution vector.
//!
//! The layout packs every DOF of one system into a single flat buffer. Each
//! `(ObjectKey, VariableIndex)` pair owns a contiguous `(offset, len)` span;
//! offsets are assigned in insertion order, which is what makes DOF numbering
//! deterministic across identically-built problems.
//!
//! # Invariants
//!
//! - Each `(object, variable)` pair appears exactly once in `order`.
//! - `spans` contains precisely the keys listed in `order`.
//! - Every span has `len > 0`.
//! - Offsets are contiguous in insertion order and `total_len` equals the sum
//!   of all lengths.
//!
//! These invariants are checked after mutations in debug builds and when the
//! `check-invariants` feature is enabled; [`validate_invariants`] can be
//! called manually.
//!
//! [`validate_invariants`]: DofLayout::validate_invariants

use crate::topology::object::{ObjectKey, VariableIndex};
use crate::transfer_error::TransferError;
use std::collections::HashMap;

/// Insertion-ordered span table for one system's DOFs.
#[derive(Clone, Debug, Default)]
pub struct DofLayout {
    /// Maps each (object, variable) pair to its span: (starting offset, length).
    spans: HashMap<(ObjectKey, VariableIndex), (usize, usize)>,
    /// Insertion order of pairs, for deterministic offset assignment.
    order: Vec<(ObjectKey, VariableIndex)>,
    /// Total length of all spans; also the next available offset.
    total_len: usize,
}

impl DofLayout {
    /// Register a span of `len` DOFs for `(key, variable)`.
    ///
    /// Returns the starting offset of the new span.
    ///
    /// # Errors
    /// Returns `Err(ZeroLengthSpan)` if `len == 0`, or `Err(DuplicateSpan)` if
    /// the pair was already registered.
    pub fn try_insert(
        &mut self,
        key: ObjectKey,
        variable: VariableIndex,
        len: usize,
    ) -> Result<usize, TransferError> {
        if len == 0 {
            return Err(TransferError::ZeroLengthSpan);
        }
        if self.spans.contains_key(&(key, variable)) {
            return Err(TransferError::DuplicateSpan {
                kind: key.kind,
                id: key.id,
                variable,
            });
        }
        let offset = self.total_len;
        self.spans.insert((key, variable), (offset, len));
        self.order.push((key, variable));
        self.total_len += len;
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        self.debug_assert_invariants();
        Ok(offset)
    }

    /// Look up the `(offset, len)` span for `(key, variable)`.
    #[inline]
    pub fn span(&self, key: ObjectKey, variable: VariableIndex) -> Option<(usize, usize)> {
        self.spans.get(&(key, variable)).copied()
    }

    /// Number of registered `(object, variable)` pairs.
    #[inline]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.order.len(), self.spans.len());
        self.order.len()
    }

    /// Whether the layout has zero spans.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of DOFs; also the length of the backing vector.
    #[inline]
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    #[cfg(any(debug_assertions, feature = "check-invariants"))]
    fn debug_assert_invariants(&self) {
        if let Err(err) = self.validate_invariants() {
            panic!("DofLayout invalid: {err}");
        }
    }

    /// Verify the layout invariants listed in the module docs.
    pub fn validate_invariants(&self) -> Result<(), TransferError> {
        use std::collections::HashSet;

        let set: HashSet<_> = self.order.iter().copied().collect();
        if set.len() != self.order.len() {
            let mut seen = HashSet::new();
            if let Some(&(key, variable)) = self.order.iter().find(|p| !seen.insert(**p)) {
                return Err(TransferError::DuplicateSpan {
                    kind: key.kind,
                    id: key.id,
                    variable,
                });
            }
        }
        if let Some(&(key, variable)) = self.spans.keys().find(|p| !set.contains(*p)) {
            return Err(TransferError::DuplicateSpan {
                kind: key.kind,
                id: key.id,
                variable,
            });
        }

        let mut expected_off = 0usize;
        for pair in &self.order {
            let Some(&(off, len)) = self.spans.get(pair) else {
                return Err(TransferError::SpanMismatch { offset: 0, len: 0 });
            };
            if len == 0 {
                return Err(TransferError::ZeroLengthSpan);
            }
            if off != expected_off {
                return Err(TransferError::SpanMismatch { offset: off, len });
            }
            expected_off = off + len;
        }
        if expected_off != self.total_len {
            return Err(TransferError::SpanMismatch {
                offset: expected_off,
                len: self.total_len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::object::ObjectId;

    fn node_key(id: u64) -> ObjectKey {
        ObjectKey::node(ObjectId::new(id).unwrap())
    }

    #[test]
    fn insert_and_lookup() {
        let mut layout = DofLayout::default();
        let off1 = layout.try_insert(node_key(1), VariableIndex(0), 2).unwrap();
        assert_eq!(off1, 0);
        let off2 = layout.try_insert(node_key(2), VariableIndex(0), 3).unwrap();
        assert_eq!(off2, 2);

        assert_eq!(layout.span(node_key(1), VariableIndex(0)), Some((0, 2)));
        assert_eq!(layout.span(node_key(2), VariableIndex(0)), Some((2, 3)));
        assert_eq!(layout.total_len(), 5);
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn zero_length_rejected() {
        let mut layout = DofLayout::default();
        assert_eq!(
            layout
                .try_insert(node_key(7), VariableIndex(0), 0)
                .unwrap_err(),
            TransferError::ZeroLengthSpan
        );
    }

    #[test]
    fn duplicate_pair_rejected() {
        let mut layout = DofLayout::default();
        layout.try_insert(node_key(4), VariableIndex(1), 1).unwrap();
        assert!(matches!(
            layout
                .try_insert(node_key(4), VariableIndex(1), 2)
                .unwrap_err(),
            TransferError::DuplicateSpan { .. }
        ));
    }

    #[test]
    fn same_object_different_variables() {
        let mut layout = DofLayout::default();
        layout.try_insert(node_key(1), VariableIndex(0), 1).unwrap();
        layout.try_insert(node_key(1), VariableIndex(1), 1).unwrap();
        assert_eq!(layout.span(node_key(1), VariableIndex(1)), Some((1, 1)));
    }

    #[test]
    fn missing_pair_is_none() {
        let layout = DofLayout::default();
        assert_eq!(layout.span(node_key(9), VariableIndex(0)), None);
        assert!(layout.is_empty());
    }

    #[test]
    fn validate_fails_on_corrupt_offsets() {
        let mut layout = DofLayout::default();
        layout.try_insert(node_key(1), VariableIndex(0), 2).unwrap();
        layout.try_insert(node_key(2), VariableIndex(0), 1).unwrap();
        // Corrupt: shift the second span off the contiguous chain
        layout
            .spans
            .insert((node_key(2), VariableIndex(0)), (5, 1));
        assert!(matches!(
            layout.validate_invariants().unwrap_err(),
            TransferError::SpanMismatch { .. }
        ));
    }
}
