//! Benchmarks wire length recalculation, and a full save/load cycle, over a
//! large generated harness.

#![allow(missing_docs)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use harness::{
    Connector, Directory, EntityId, Harness, HarnessBranch, Node, Pin, Wire,
    domain::{
        catalog::{ConnectorType, Gender, SealType, WireType},
        geometry::Point,
    },
};
use tempfile::TempDir;

const CONNECTORS: usize = 50;
const PINS: usize = 40;

fn id(s: impl Into<String>) -> EntityId {
    EntityId::new(s).unwrap()
}

/// A trunk of connectors in a line, each joined to the next by one branch
/// and a full set of pin-to-pin wires.
fn generate_harness() -> Harness {
    let mut harness = Harness::new(id("BENCH"), "Bench harness", "BENCH-001");

    for c in 0..CONNECTORS {
        let mut connector = Connector::new(
            id(format!("C{c}")),
            format!("X{c}"),
            ConnectorType::Dtm,
            Gender::Female,
            SealType::FullySealed,
        );
        for p in 1..=PINS {
            connector = connector
                .with_pin(Pin::new(p.to_string(), Gender::Female, SealType::FullySealed))
                .unwrap();
        }
        harness.add_connector(connector).unwrap();

        #[allow(clippy::cast_precision_loss)]
        let position = Point::new(c as f64 * 150.0, (c % 3) as f64 * 20.0);
        harness
            .add_node(Node::connector(id(format!("N{c}")), id(format!("C{c}")), position))
            .unwrap();
    }

    for c in 1..CONNECTORS {
        let from = harness.node(&format!("N{}", c - 1)).unwrap().position;
        let to = harness.node(&format!("N{c}")).unwrap().position;
        let midpoint = Point::new((from.x + to.x) / 2.0, from.y.max(to.y) + 10.0);
        harness
            .add_branch(
                HarnessBranch::new(id(format!("B{c}")), format!("Segment {c}"))
                    .with_points([from, midpoint, to])
                    .with_nodes([id(format!("N{}", c - 1)), id(format!("N{c}"))]),
            )
            .unwrap();

        for p in 1..=PINS / 2 {
            // Inbound wires land on low pins, outbound wires leave from high pins.
            let (from_pin, to_pin) = ((p + PINS / 2).to_string(), p.to_string());
            harness
                .add_wire(
                    Wire::new(
                        id(format!("W{c}-{p}")),
                        WireType::FlryB0p5,
                        "RD",
                        id(format!("N{}", c - 1)),
                        id(format!("N{c}")),
                    )
                    .with_pins(Some(from_pin.as_str()), Some(to_pin.as_str())),
                )
                .unwrap();
        }
    }

    harness
}

fn calculate_all_wire_lengths(c: &mut Criterion) {
    c.bench_function("calculate all wire lengths", |b| {
        b.iter_batched(
            generate_harness,
            |mut harness| harness.calculate_all_wire_lengths(),
            BatchSize::SmallInput,
        );
    });
}

fn save_and_load(c: &mut Criterion) {
    c.bench_function("save and load harness", |b| {
        b.iter_batched(
            || {
                let tmp_dir = TempDir::new().unwrap();
                let directory = Directory::new(tmp_dir.path().to_path_buf());
                directory.save_harness(&generate_harness()).unwrap();
                tmp_dir
            },
            |tmp_dir| {
                Directory::new(tmp_dir.path().to_path_buf())
                    .load_harness("BENCH")
                    .unwrap()
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, calculate_all_wire_lengths, save_and_load);
criterion_main!(benches);
