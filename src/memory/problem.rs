//! In-memory sub-problems and the parent/children instance set.
//!
//! `InMemoryProblem` owns a mesh, its field variables, and one solution vector
//! per system (plus named tagged auxiliaries). The builder assigns variable
//! indices and DOF spans in registration order, so two problems built with the
//! same calls share DOF numbering exactly -- the property the direct transfer
//! relies on.

use crate::data::fe_type::FeType;
use crate::data::problem::Problem;
use crate::data::variable::{FieldKind, FieldVariable};
use crate::data::vector::{GhostedVector, SharedVector};
use crate::memory::mesh::InMemoryMesh;
use crate::topology::mesh::MeshTopology;
use crate::topology::object::{ObjectId, ObjectKey, ObjectKind, SystemId, VariableIndex};
use crate::transfer::coupling::InstanceSet;
use crate::transfer::dof_map::destination_dofs;
use crate::transfer_error::TransferError;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug)]
struct SystemStore {
    solution: SharedVector<f64>,
    tagged: HashMap<String, SharedVector<f64>>,
}

/// A single-address-space sub-problem instance.
#[derive(Debug)]
pub struct InMemoryProblem {
    name: String,
    mesh: InMemoryMesh,
    variables: Vec<FieldVariable>,
    systems: BTreeMap<SystemId, SystemStore>,
}

impl InMemoryProblem {
    /// Start building a problem over a mesh with the given object counts.
    pub fn builder(
        name: impl Into<String>,
        nodes: usize,
        elements: usize,
    ) -> InMemoryProblemBuilder {
        InMemoryProblemBuilder {
            name: name.into(),
            nodes,
            elements,
            variables: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Mutable access to the mesh, e.g. to restrict local ownership.
    pub fn mesh_mut(&mut self) -> &mut InMemoryMesh {
        &mut self.mesh
    }

    /// Overwrite every committed DOF of `variable`'s primary vector with `value`.
    pub fn fill(&self, variable: &str, value: f64) -> Result<(), TransferError> {
        self.fill_in(variable, None, value)
    }

    /// Overwrite every committed DOF of `variable` in the tagged vector.
    pub fn fill_tagged(&self, variable: &str, tag: &str, value: f64) -> Result<(), TransferError> {
        self.fill_in(variable, Some(tag), value)
    }

    /// Committed values of every DOF of `variable`, in global object order
    /// (all nodes by id, then all elements by id).
    pub fn values(&self, variable: &str) -> Result<Vec<f64>, TransferError> {
        self.values_in(variable, None)
    }

    /// Committed values of every DOF of `variable` in the tagged vector.
    pub fn values_tagged(&self, variable: &str, tag: &str) -> Result<Vec<f64>, TransferError> {
        self.values_in(variable, Some(tag))
    }

    /// Set every DOF of `variable` on one object to `value` (committed).
    pub fn set_at(
        &self,
        variable: &str,
        kind: ObjectKind,
        id: u64,
        value: f64,
    ) -> Result<(), TransferError> {
        let var = self.variable(variable)?;
        let vector = self.vector(var, None)?;
        let id = ObjectId::new(id)?;
        let object = match kind {
            ObjectKind::Node => self.mesh.node_by_id(id),
            ObjectKind::Element => self.mesh.element_by_id(id),
        }
        .ok_or(TransferError::MissingSourceObject { kind, id })?;
        for dof in destination_dofs(&object, var)? {
            vector.set(dof, value)?;
        }
        Ok(())
    }

    fn fill_in(&self, variable: &str, tag: Option<&str>, value: f64) -> Result<(), TransferError> {
        let var = self.variable(variable)?;
        let vector = self.vector(var, tag)?;
        for object in self.all_objects() {
            for dof in destination_dofs(&object, var)? {
                vector.set(dof, value)?;
            }
        }
        Ok(())
    }

    fn values_in(&self, variable: &str, tag: Option<&str>) -> Result<Vec<f64>, TransferError> {
        let var = self.variable(variable)?;
        let vector = self.vector(var, tag)?;
        let mut out = Vec::new();
        for object in self.all_objects() {
            for dof in destination_dofs(&object, var)? {
                out.push(vector.read(dof)?);
            }
        }
        Ok(out)
    }

    /// Every object of the mesh (not just owned), nodes then elements, by id.
    fn all_objects(&self) -> impl Iterator<Item = crate::memory::mesh::MemoryObject<'_>> + '_ {
        let nodes = (1..=self.mesh.node_count() as u64)
            .filter_map(|raw| self.mesh.node_by_id(ObjectId::new(raw).ok()?));
        let elements = (1..=self.mesh.element_count() as u64)
            .filter_map(|raw| self.mesh.element_by_id(ObjectId::new(raw).ok()?));
        nodes.chain(elements)
    }
}

impl Problem for InMemoryProblem {
    type Mesh = InMemoryMesh;
    type Vector = SharedVector<f64>;

    fn name(&self) -> &str {
        &self.name
    }

    fn variable(&self, name: &str) -> Result<&FieldVariable, TransferError> {
        self.variables
            .iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| TransferError::UnknownVariable {
                problem: self.name.clone(),
                variable: name.into(),
            })
    }

    fn mesh(&self) -> &InMemoryMesh {
        &self.mesh
    }

    fn vector(
        &self,
        variable: &FieldVariable,
        tag: Option<&str>,
    ) -> Result<&SharedVector<f64>, TransferError> {
        let store =
            self.systems
                .get(&variable.system())
                .ok_or_else(|| TransferError::UnknownSystem {
                    problem: self.name.clone(),
                    system: variable.system(),
                })?;
        match tag {
            None => Ok(&store.solution),
            Some(tag) => store
                .tagged
                .get(tag)
                .ok_or_else(|| TransferError::UnknownVectorTag {
                    problem: self.name.clone(),
                    tag: tag.into(),
                }),
        }
    }
}

struct PendingVariable {
    name: String,
    fe_type: FeType,
    kind: FieldKind,
    components: u32,
    dofs_per_node: usize,
    dofs_per_element: usize,
    system: SystemId,
}

/// Builder assigning variable indices and DOF spans in registration order.
pub struct InMemoryProblemBuilder {
    name: String,
    nodes: usize,
    elements: usize,
    variables: Vec<PendingVariable>,
    tags: Vec<(SystemId, String)>,
}

impl InMemoryProblemBuilder {
    /// A nodal variable (one DOF per node per component) on system 0.
    ///
    /// Kind is `Standard` for one component, `Array` otherwise.
    pub fn nodal_variable(
        self,
        name: impl Into<String>,
        fe_type: FeType,
        components: u32,
    ) -> Self {
        let kind = if components > 1 {
            FieldKind::Array
        } else {
            FieldKind::Standard
        };
        self.variable_with_layout(name, fe_type, kind, components, 1, 0, SystemId(0))
    }

    /// An elemental variable (one DOF per element per component) on system 0.
    pub fn elemental_variable(
        self,
        name: impl Into<String>,
        fe_type: FeType,
        components: u32,
    ) -> Self {
        let kind = if components > 1 {
            FieldKind::Array
        } else {
            FieldKind::Standard
        };
        self.variable_with_layout(name, fe_type, kind, components, 0, 1, SystemId(0))
    }

    /// Full control over kind, per-object DOF counts, and owning system.
    ///
    /// `dofs_per_node`/`dofs_per_element` may be zero (the variable then has
    /// no DOFs on that object kind) or greater than one (several addressable
    /// sub-components, as for derivative-carrying bases).
    pub fn variable_with_layout(
        mut self,
        name: impl Into<String>,
        fe_type: FeType,
        kind: FieldKind,
        components: u32,
        dofs_per_node: usize,
        dofs_per_element: usize,
        system: SystemId,
    ) -> Self {
        self.variables.push(PendingVariable {
            name: name.into(),
            fe_type,
            kind,
            components,
            dofs_per_node,
            dofs_per_element,
            system,
        });
        self
    }

    /// Register a named auxiliary vector on `system`, sized like its solution.
    pub fn tagged_vector(mut self, system: SystemId, tag: impl Into<String>) -> Self {
        self.tags.push((system, tag.into()));
        self
    }

    /// Assign indices and spans, size the vectors, and produce the problem.
    ///
    /// # Errors
    /// `DuplicateVariable` for a repeated name, `InvalidComponentCount` from
    /// variable validation, or a layout error.
    pub fn build(self) -> Result<InMemoryProblem, TransferError> {
        let mut mesh = InMemoryMesh::with_counts(self.nodes, self.elements)?;
        let mut variables: Vec<FieldVariable> = Vec::with_capacity(self.variables.len());
        let mut next_index: BTreeMap<SystemId, u32> = BTreeMap::new();

        for pending in &self.variables {
            if variables.iter().any(|v| v.name() == pending.name) {
                return Err(TransferError::DuplicateVariable {
                    problem: self.name.clone(),
                    name: pending.name.clone(),
                });
            }
            let index_slot = next_index.entry(pending.system).or_insert(0);
            let base = VariableIndex(*index_slot);
            *index_slot += pending.components;

            let variable = FieldVariable::new(
                pending.name.clone(),
                pending.fe_type,
                pending.kind,
                pending.components,
                pending.system,
                base,
            )?;

            let layout = mesh.layout_mut(pending.system);
            for vc in 0..pending.components {
                let index = base.offset(vc);
                if pending.dofs_per_node > 0 {
                    for raw in 1..=self.nodes as u64 {
                        layout.try_insert(
                            ObjectKey::node(ObjectId::new(raw)?),
                            index,
                            pending.dofs_per_node,
                        )?;
                    }
                }
                if pending.dofs_per_element > 0 {
                    for raw in 1..=self.elements as u64 {
                        layout.try_insert(
                            ObjectKey::element(ObjectId::new(raw)?),
                            index,
                            pending.dofs_per_element,
                        )?;
                    }
                }
            }
            variables.push(variable);
        }

        let mut systems: BTreeMap<SystemId, SystemStore> = BTreeMap::new();
        for variable in &variables {
            let system = variable.system();
            if !systems.contains_key(&system) {
                let len = mesh.layout(system).map_or(0, |l| l.total_len());
                systems.insert(
                    system,
                    SystemStore {
                        solution: SharedVector::zeros(len),
                        tagged: HashMap::new(),
                    },
                );
            }
        }
        for (system, tag) in self.tags {
            let len = mesh.layout(system).map_or(0, |l| l.total_len());
            let store = systems.entry(system).or_insert_with(|| SystemStore {
                solution: SharedVector::zeros(len),
                tagged: HashMap::new(),
            });
            store.tagged.insert(tag, SharedVector::zeros(len));
        }

        Ok(InMemoryProblem {
            name: self.name,
            mesh,
            variables,
            systems,
        })
    }
}

/// One parent and N children; a `None` child models an instance resident on
/// another process.
#[derive(Debug)]
pub struct InMemoryCoupling {
    parent: InMemoryProblem,
    children: Vec<Option<InMemoryProblem>>,
}

impl InMemoryCoupling {
    /// An instance set with the given parent and no children yet.
    pub fn new(parent: InMemoryProblem) -> Self {
        InMemoryCoupling {
            parent,
            children: Vec::new(),
        }
    }

    /// Append a locally-owned child instance.
    pub fn push_child(&mut self, child: InMemoryProblem) {
        self.children.push(Some(child));
    }

    /// Append a child that exists globally but is not resident here.
    pub fn push_remote_child(&mut self) {
        self.children.push(None);
    }

    /// The locally-resident child at `index`, if any.
    pub fn child(&self, index: usize) -> Option<&InMemoryProblem> {
        self.children.get(index).and_then(Option::as_ref)
    }
}

impl InstanceSet for InMemoryCoupling {
    type Problem = InMemoryProblem;

    fn instance_count(&self) -> usize {
        self.children.len()
    }

    fn is_local(&self, index: usize) -> bool {
        self.children
            .get(index)
            .is_some_and(|child| child.is_some())
    }

    fn instance(&self, index: usize) -> Result<&InMemoryProblem, TransferError> {
        self.children
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(TransferError::InstanceNotLocal { index })
    }

    fn parent(&self) -> &InMemoryProblem {
        &self.parent
    }
}
