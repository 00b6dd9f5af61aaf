use mesh_relay::data::fe_type::{FeFamily, FeOrder, FeType};
use mesh_relay::data::variable::FieldKind;
use mesh_relay::memory::problem::InMemoryProblem;
use mesh_relay::topology::object::{ObjectId, ObjectKind, SystemId};
use mesh_relay::transfer::driver::DirectFieldTransfer;
use mesh_relay::transfer::reduction::Reduction;
use mesh_relay::transfer_error::TransferError;

fn nodal_problem(name: &str, nodes: usize, elements: usize) -> InMemoryProblem {
    InMemoryProblem::builder(name, nodes, elements)
        .nodal_variable("u", FeType::lagrange_first(), 1)
        .build()
        .unwrap()
}

#[test]
fn copy_overwrites_destination_values() {
    let to = nodal_problem("to", 4, 2);
    let from = nodal_problem("from", 4, 2);
    to.fill("u", 50.0).unwrap();
    from.fill("u", 10.0).unwrap();

    DirectFieldTransfer::single("u", "u", Reduction::Copy)
        .transfer(&to, &from)
        .unwrap();

    // overwritten, not accumulated: 10, never 50 + 10
    assert_eq!(to.values("u").unwrap(), vec![10.0; 4]);
}

#[test]
fn copy_maps_object_for_object() {
    let to = nodal_problem("to", 3, 0);
    let from = nodal_problem("from", 3, 0);
    for (id, value) in [(1, 1.5), (2, -2.0), (3, 8.25)] {
        from.set_at("u", ObjectKind::Node, id, value).unwrap();
    }

    DirectFieldTransfer::single("u", "u", Reduction::Copy)
        .transfer(&to, &from)
        .unwrap();

    assert_eq!(to.values("u").unwrap(), vec![1.5, -2.0, 8.25]);
}

#[test]
fn elemental_variables_transfer() {
    let build = |name: &str| {
        InMemoryProblem::builder(name, 4, 3)
            .elemental_variable("k", FeType::constant_monomial(), 1)
            .build()
            .unwrap()
    };
    let to = build("to");
    let from = build("from");
    from.set_at("k", ObjectKind::Element, 2, 6.0).unwrap();

    DirectFieldTransfer::single("k", "k", Reduction::Copy)
        .transfer(&to, &from)
        .unwrap();

    assert_eq!(to.values("k").unwrap(), vec![0.0, 6.0, 0.0]);
}

#[test]
fn array_variables_transfer_every_component() {
    let build = |name: &str| {
        InMemoryProblem::builder(name, 2, 0)
            .nodal_variable("stress", FeType::lagrange_first(), 3)
            .build()
            .unwrap()
    };
    let to = build("to");
    let from = build("from");
    from.fill("stress", 4.0).unwrap();

    DirectFieldTransfer::single("stress", "stress", Reduction::Copy)
        .transfer(&to, &from)
        .unwrap();

    // 2 nodes x 3 components
    assert_eq!(to.values("stress").unwrap(), vec![4.0; 6]);
}

#[test]
fn several_variable_pairs_transfer_in_one_call() {
    let build = |name: &str| {
        InMemoryProblem::builder(name, 2, 1)
            .nodal_variable("u", FeType::lagrange_first(), 1)
            .elemental_variable("k", FeType::constant_monomial(), 1)
            .build()
            .unwrap()
    };
    let to = build("to");
    let from = build("from");
    from.fill("u", 1.0).unwrap();
    from.fill("k", 2.0).unwrap();

    DirectFieldTransfer::new(
        vec!["u".into(), "k".into()],
        vec!["u".into(), "k".into()],
        Reduction::Copy,
    )
    .transfer(&to, &from)
    .unwrap();

    assert_eq!(to.values("u").unwrap(), vec![1.0, 1.0]);
    assert_eq!(to.values("k").unwrap(), vec![2.0]);
}

#[test]
fn only_destination_owned_objects_are_written() {
    let mut to = nodal_problem("to", 3, 0);
    to.mesh_mut()
        .set_local_nodes(vec![ObjectId::new(2).unwrap()])
        .unwrap();
    let from = nodal_problem("from", 3, 0);
    from.fill("u", 5.0).unwrap();

    DirectFieldTransfer::single("u", "u", Reduction::Copy)
        .transfer(&to, &from)
        .unwrap();

    assert_eq!(to.values("u").unwrap(), vec![0.0, 5.0, 0.0]);
}

#[test]
fn tagged_vectors_are_read_and_written() {
    let build = |name: &str| {
        InMemoryProblem::builder(name, 2, 0)
            .nodal_variable("u", FeType::lagrange_first(), 1)
            .tagged_vector(SystemId(0), "stage")
            .build()
            .unwrap()
    };
    let to = build("to");
    let from = build("from");
    from.fill_tagged("u", "stage", 3.5).unwrap();
    from.fill("u", -1.0).unwrap();

    DirectFieldTransfer::single("u", "u", Reduction::Copy)
        .with_from_vector_tag("stage")
        .with_to_vector_tag("stage")
        .transfer(&to, &from)
        .unwrap();

    // tagged side moved, primaries untouched
    assert_eq!(to.values_tagged("u", "stage").unwrap(), vec![3.5, 3.5]);
    assert_eq!(to.values("u").unwrap(), vec![0.0, 0.0]);
}

#[test]
fn unknown_vector_tag_fails_before_any_write() {
    let to = nodal_problem("to", 2, 0);
    let from = nodal_problem("from", 2, 0);
    to.fill("u", 7.0).unwrap();
    from.fill("u", 1.0).unwrap();

    let err = DirectFieldTransfer::single("u", "u", Reduction::Copy)
        .with_from_vector_tag("missing")
        .transfer(&to, &from)
        .unwrap_err();
    assert!(matches!(err, TransferError::UnknownVectorTag { .. }));
    assert_eq!(to.values("u").unwrap(), vec![7.0, 7.0]);
}

#[test]
fn fe_type_mismatch_fails_and_writes_nothing() {
    let to = nodal_problem("to", 2, 0);
    let from = InMemoryProblem::builder("from", 2, 0)
        .nodal_variable("u", FeType::new(FeFamily::Lagrange, FeOrder::Second), 1)
        .build()
        .unwrap();
    to.fill("u", 7.0).unwrap();
    from.fill("u", 1.0).unwrap();

    let err = DirectFieldTransfer::single("u", "u", Reduction::Copy)
        .transfer(&to, &from)
        .unwrap_err();
    assert!(matches!(err, TransferError::FeTypeMismatch { .. }));
    // destination is untouched
    assert_eq!(to.values("u").unwrap(), vec![7.0, 7.0]);
}

#[test]
fn vector_field_kind_is_rejected() {
    let build = |name: &str| {
        InMemoryProblem::builder(name, 2, 0)
            .variable_with_layout(
                "b",
                FeType::lagrange_first(),
                FieldKind::Vector,
                1,
                1,
                0,
                SystemId(0),
            )
            .build()
            .unwrap()
    };
    let to = build("to");
    let from = build("from");
    let err = DirectFieldTransfer::single("b", "b", Reduction::Copy)
        .transfer(&to, &from)
        .unwrap_err();
    assert_eq!(
        err,
        TransferError::VectorFieldUnsupported {
            variable: "b".into()
        }
    );
}

#[test]
fn component_count_mismatch_is_rejected() {
    let to = InMemoryProblem::builder("to", 2, 0)
        .nodal_variable("a", FeType::lagrange_first(), 3)
        .build()
        .unwrap();
    let from = InMemoryProblem::builder("from", 2, 0)
        .nodal_variable("a", FeType::lagrange_first(), 2)
        .build()
        .unwrap();
    let err = DirectFieldTransfer::single("a", "a", Reduction::Copy)
        .transfer(&to, &from)
        .unwrap_err();
    assert!(matches!(err, TransferError::ComponentCountMismatch { .. }));
}

#[test]
fn variable_count_mismatch_is_rejected() {
    let to = nodal_problem("to", 1, 0);
    let from = nodal_problem("from", 1, 0);
    let err = DirectFieldTransfer::new(vec!["u".into()], vec![], Reduction::Copy)
        .transfer(&to, &from)
        .unwrap_err();
    assert_eq!(err, TransferError::VariableCountMismatch { to: 1, from: 0 });
}

#[test]
fn unknown_variable_names_the_problem() {
    let to = nodal_problem("destination", 1, 0);
    let from = nodal_problem("source", 1, 0);
    let err = DirectFieldTransfer::single("u", "ghost", Reduction::Copy)
        .transfer(&to, &from)
        .unwrap_err();
    assert_eq!(
        err,
        TransferError::UnknownVariable {
            problem: "source".into(),
            variable: "ghost".into()
        }
    );
}

#[test]
fn mesh_size_mismatch_fails_with_zero_writes() {
    let to = nodal_problem("to", 3, 1);
    let from = nodal_problem("from", 4, 1);
    to.fill("u", 2.0).unwrap();
    from.fill("u", 9.0).unwrap();

    let err = DirectFieldTransfer::single("u", "u", Reduction::Copy)
        .transfer(&to, &from)
        .unwrap_err();
    assert_eq!(
        err,
        TransferError::MeshMismatch {
            to_nodes: 3,
            to_elements: 1,
            from_nodes: 4,
            from_elements: 1
        }
    );
    assert_eq!(to.values("u").unwrap(), vec![2.0, 2.0, 2.0]);
}

#[test]
fn dofs_absent_on_the_source_side_are_skipped() {
    // compatible descriptors, but the source assigns this variable no node DOFs
    let to = InMemoryProblem::builder("to", 2, 1)
        .variable_with_layout(
            "u",
            FeType::lagrange_first(),
            FieldKind::Standard,
            1,
            1,
            0,
            SystemId(0),
        )
        .build()
        .unwrap();
    let from = InMemoryProblem::builder("from", 2, 1)
        .variable_with_layout(
            "u",
            FeType::lagrange_first(),
            FieldKind::Standard,
            1,
            0,
            1,
            SystemId(0),
        )
        .build()
        .unwrap();
    to.fill("u", 4.0).unwrap();
    from.fill("u", 1.0).unwrap();

    DirectFieldTransfer::single("u", "u", Reduction::Copy)
        .transfer(&to, &from)
        .unwrap();

    // nothing maps, so the destination keeps its values
    assert_eq!(to.values("u").unwrap(), vec![4.0, 4.0]);
}

#[test]
fn multiple_dofs_per_object_map_in_order() {
    // a derivative-carrying layout: two sub-components per node
    let build = |name: &str| {
        InMemoryProblem::builder(name, 2, 0)
            .variable_with_layout(
                "h",
                FeType::new(FeFamily::Hermite, FeOrder::Third),
                FieldKind::Standard,
                1,
                2,
                0,
                SystemId(0),
            )
            .build()
            .unwrap()
    };
    let to = build("to");
    let from = build("from");
    from.set_at("h", ObjectKind::Node, 1, 3.0).unwrap();
    from.set_at("h", ObjectKind::Node, 2, -1.0).unwrap();

    DirectFieldTransfer::single("h", "h", Reduction::Copy)
        .transfer(&to, &from)
        .unwrap();

    assert_eq!(to.values("h").unwrap(), vec![3.0, 3.0, -1.0, -1.0]);
}
