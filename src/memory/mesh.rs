//! In-memory mesh: contiguous node/element id spaces plus per-system DOF layouts.
//!
//! Ids run `1..=count` for each object kind, so two meshes built with the same
//! counts automatically satisfy the identical-ids precondition. The owned
//! subset defaults to everything and can be restricted to model a partitioned
//! run inside one address space.

use crate::memory::layout::DofLayout;
use crate::topology::mesh::{DofObject, MeshTopology};
use crate::topology::object::{DofIndex, ObjectId, ObjectKey, ObjectKind, SystemId, VariableIndex};
use crate::transfer_error::TransferError;
use std::collections::BTreeMap;

/// Mesh with contiguous ids and an optionally restricted owned subset.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMesh {
    node_count: usize,
    element_count: usize,
    local_nodes: Vec<ObjectId>,
    local_elements: Vec<ObjectId>,
    layouts: BTreeMap<SystemId, DofLayout>,
}

impl InMemoryMesh {
    /// A mesh with nodes `1..=nodes` and elements `1..=elements`, all owned.
    pub fn with_counts(nodes: usize, elements: usize) -> Result<Self, TransferError> {
        let ids = |count: usize| -> Result<Vec<ObjectId>, TransferError> {
            (1..=count as u64).map(ObjectId::new).collect()
        };
        Ok(InMemoryMesh {
            node_count: nodes,
            element_count: elements,
            local_nodes: ids(nodes)?,
            local_elements: ids(elements)?,
            layouts: BTreeMap::new(),
        })
    }

    /// Restrict the owned node subset (a partitioned-run stand-in).
    ///
    /// # Errors
    /// Returns `Err(LocalObjectNotInMesh)` if any id is outside `1..=node_count`.
    pub fn set_local_nodes(&mut self, ids: Vec<ObjectId>) -> Result<(), TransferError> {
        if let Some(&id) = ids.iter().find(|id| id.get() > self.node_count as u64) {
            return Err(TransferError::LocalObjectNotInMesh {
                kind: ObjectKind::Node,
                id,
            });
        }
        self.local_nodes = ids;
        Ok(())
    }

    /// Restrict the owned element subset.
    ///
    /// # Errors
    /// Returns `Err(LocalObjectNotInMesh)` if any id is outside `1..=element_count`.
    pub fn set_local_elements(&mut self, ids: Vec<ObjectId>) -> Result<(), TransferError> {
        if let Some(&id) = ids.iter().find(|id| id.get() > self.element_count as u64) {
            return Err(TransferError::LocalObjectNotInMesh {
                kind: ObjectKind::Element,
                id,
            });
        }
        self.local_elements = ids;
        Ok(())
    }

    /// The DOF layout of `system`, if any variable was registered on it.
    #[inline]
    pub fn layout(&self, system: SystemId) -> Option<&DofLayout> {
        self.layouts.get(&system)
    }

    pub(crate) fn layout_mut(&mut self, system: SystemId) -> &mut DofLayout {
        self.layouts.entry(system).or_default()
    }

    fn object(&self, kind: ObjectKind, id: ObjectId) -> Option<MemoryObject<'_>> {
        let count = match kind {
            ObjectKind::Node => self.node_count,
            ObjectKind::Element => self.element_count,
        };
        (id.get() <= count as u64).then(|| MemoryObject {
            key: ObjectKey { kind, id },
            mesh: self,
        })
    }
}

/// Borrowed handle to one in-memory mesh object.
#[derive(Clone, Copy, Debug)]
pub struct MemoryObject<'a> {
    key: ObjectKey,
    mesh: &'a InMemoryMesh,
}

impl MemoryObject<'_> {
    /// The kind-qualified key of this object.
    #[inline]
    pub fn key(&self) -> ObjectKey {
        self.key
    }

    fn span(&self, system: SystemId, variable: VariableIndex) -> Option<(usize, usize)> {
        self.mesh.layouts.get(&system)?.span(self.key, variable)
    }
}

impl DofObject for MemoryObject<'_> {
    fn id(&self) -> ObjectId {
        self.key.id
    }

    fn dof_count(&self, system: SystemId, variable: VariableIndex) -> usize {
        self.span(system, variable).map_or(0, |(_, len)| len)
    }

    fn component_count(&self, system: SystemId, variable: VariableIndex) -> usize {
        // one addressable sub-component per stored DOF
        self.dof_count(system, variable)
    }

    fn dof_index(
        &self,
        system: SystemId,
        variable: VariableIndex,
        component: usize,
    ) -> Result<DofIndex, TransferError> {
        match self.span(system, variable) {
            Some((offset, len)) if component < len => Ok(offset + component),
            _ => Err(TransferError::MissingDof {
                kind: self.key.kind,
                id: self.key.id,
                system,
                variable,
                component,
            }),
        }
    }
}

impl MeshTopology for InMemoryMesh {
    type Object<'a>
        = MemoryObject<'a>
    where
        Self: 'a;

    fn node_count(&self) -> usize {
        self.node_count
    }

    fn element_count(&self) -> usize {
        self.element_count
    }

    fn local_nodes<'a>(&'a self) -> Box<dyn Iterator<Item = MemoryObject<'a>> + 'a> {
        Box::new(self.local_nodes.iter().map(move |&id| MemoryObject {
            key: ObjectKey::node(id),
            mesh: self,
        }))
    }

    fn local_elements<'a>(&'a self) -> Box<dyn Iterator<Item = MemoryObject<'a>> + 'a> {
        Box::new(self.local_elements.iter().map(move |&id| MemoryObject {
            key: ObjectKey::element(id),
            mesh: self,
        }))
    }

    fn node_by_id(&self, id: ObjectId) -> Option<MemoryObject<'_>> {
        self.object(ObjectKind::Node, id)
    }

    fn element_by_id(&self, id: ObjectId) -> Option<MemoryObject<'_>> {
        self.object(ObjectKind::Element, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> ObjectId {
        ObjectId::new(raw).unwrap()
    }

    #[test]
    fn counts_and_default_ownership() {
        let mesh = InMemoryMesh::with_counts(3, 2).unwrap();
        assert_eq!(mesh.node_count(), 3);
        assert_eq!(mesh.element_count(), 2);
        assert_eq!(mesh.local_nodes().count(), 3);
        assert_eq!(mesh.local_elements().count(), 2);
    }

    #[test]
    fn lookup_by_id() {
        let mesh = InMemoryMesh::with_counts(2, 1).unwrap();
        assert!(mesh.node_by_id(id(2)).is_some());
        assert!(mesh.node_by_id(id(3)).is_none());
        assert!(mesh.element_by_id(id(1)).is_some());
        assert!(mesh.element_by_id(id(2)).is_none());
    }

    #[test]
    fn restricted_ownership_iterates_subset() {
        let mut mesh = InMemoryMesh::with_counts(4, 0).unwrap();
        mesh.set_local_nodes(vec![id(2), id(4)]).unwrap();
        let owned: Vec<u64> = mesh.local_nodes().map(|n| n.id().get()).collect();
        assert_eq!(owned, vec![2, 4]);
        // non-owned ids still resolve for ghosted lookups
        assert!(mesh.node_by_id(id(1)).is_some());
    }

    #[test]
    fn foreign_local_id_rejected() {
        let mut mesh = InMemoryMesh::with_counts(1, 1).unwrap();
        assert!(matches!(
            mesh.set_local_elements(vec![id(9)]).unwrap_err(),
            TransferError::LocalObjectNotInMesh { .. }
        ));
    }

    #[test]
    fn dof_queries_follow_layout() {
        let mut mesh = InMemoryMesh::with_counts(2, 0).unwrap();
        let system = SystemId(0);
        mesh.layout_mut(system)
            .try_insert(ObjectKey::node(id(1)), VariableIndex(0), 2)
            .unwrap();
        let node = mesh.node_by_id(id(1)).unwrap();
        assert_eq!(node.dof_count(system, VariableIndex(0)), 2);
        assert_eq!(node.dof_index(system, VariableIndex(0), 1).unwrap(), 1);
        assert!(node.dof_index(system, VariableIndex(0), 2).is_err());

        let bare = mesh.node_by_id(id(2)).unwrap();
        assert_eq!(bare.dof_count(system, VariableIndex(0)), 0);
    }
}
