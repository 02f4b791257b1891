//! A small, fully wired harness shared by unit tests.

use crate::domain::{
    EntityId, Harness,
    branch::{BranchProtection, HarnessBranch},
    catalog::{ConnectorType, Gender, NodeType, ProtectionType, SealType, WireType},
    connector::{Connector, Pin},
    fastener::{Attachment, Fastener, FastenerType},
    geometry::Point,
    node::Node,
    wire::Wire,
};

pub fn id(s: &str) -> EntityId {
    EntityId::new(s).unwrap()
}

pub fn connector(connector_id: &str, pins: &[&str]) -> Connector {
    pins.iter().fold(
        Connector::new(
            id(connector_id),
            format!("{connector_id} housing"),
            ConnectorType::Dtm,
            Gender::Female,
            SealType::FullySealed,
        )
        .with_part_number(format!("PN-{connector_id}")),
        |connector, number| {
            connector
                .with_pin(Pin::new(*number, Gender::Female, SealType::FullySealed))
                .unwrap()
        },
    )
}

/// Two three-way connectors and a splice on one straight 100 mm branch.
///
/// - `W1`: `C1:1` → `C2:1`
/// - `W2`: `C2:2` → `C1:2`
/// - `W3`: `C1:3` → splice `S1`
/// - `F1`: two clips on `B1`; `F2`: one M6 bolt at `S1`
pub fn sample_harness() -> Harness {
    let mut harness = Harness::new(id("H1"), "Test Harness", "TEST-001");

    harness
        .add_protection(BranchProtection {
            part_number: Some("BS-10".to_string()),
            diameter_mm: Some(10.0),
            ..BranchProtection::new(id("P1"), ProtectionType::BraidedSleeve)
        })
        .unwrap();
    harness.add_connector(connector("C1", &["1", "2", "3"])).unwrap();
    harness.add_connector(connector("C2", &["1", "2", "3"])).unwrap();

    harness
        .add_node(Node::connector(id("N1"), id("C1"), Point::new(0.0, 0.0)))
        .unwrap();
    harness
        .add_node(Node::connector(id("N2"), id("C2"), Point::new(100.0, 0.0)))
        .unwrap();
    harness
        .add_node(Node::free(id("S1"), NodeType::Splice, Point::new(50.0, 0.0)).with_name("SP1"))
        .unwrap();

    for wire in [
        Wire::new(id("W1"), WireType::FlryB0p5, "RD", id("N1"), id("N2"))
            .with_pins(Some("1"), Some("1")),
        Wire::new(id("W2"), WireType::FlryB0p5, "RD", id("N2"), id("N1"))
            .with_pins(Some("2"), Some("2")),
        Wire::new(id("W3"), WireType::FlryB1p0, "BK", id("N1"), id("S1"))
            .with_pins(Some("3"), None),
    ] {
        harness.add_wire(wire).unwrap();
    }

    harness
        .add_branch(
            HarnessBranch::new(id("B1"), "Main")
                .with_protection(id("P1"))
                .with_points([Point::new(0.0, 0.0), Point::new(100.0, 0.0)])
                .with_nodes([id("N1"), id("N2"), id("S1")]),
        )
        .unwrap();

    harness
        .add_fastener_type(FastenerType::new(id("FT1"), "Edge clip"))
        .unwrap();
    harness
        .add_fastener_type(FastenerType {
            torque_nm: Some(8.0),
            ..FastenerType::new(id("FT2"), "Flange bolt")
        })
        .unwrap();

    harness
        .add_fastener(
            Fastener::new(
                id("F1"),
                id("FT1"),
                "CLIP-1",
                Attachment::Branch {
                    branch_id: id("B1"),
                    distance_from_start_mm: 25.0,
                },
            )
            .with_quantity(2),
        )
        .unwrap();
    harness
        .add_fastener(
            Fastener::new(
                id("F2"),
                id("FT2"),
                "BOLT-6",
                Attachment::Node { node_id: id("S1") },
            )
            .with_size("M6"),
        )
        .unwrap();

    harness
}
