use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    EntityId, Harness,
    domain::{
        catalog::{ConnectorType, ProtectionType, WireType},
        length::calculate_branch_length,
    },
};

/// Bill of materials for one harness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bom {
    /// One line per connector, keyed by connector id.
    pub connectors: BTreeMap<EntityId, ConnectorLine>,
    /// Wire totals keyed by `"{type}_{color}"`.
    pub wires: BTreeMap<String, WireLine>,
    /// Protection totals keyed by protection id.
    pub protections: BTreeMap<EntityId, ProtectionLine>,
    /// Sum of every wire's cached length, in millimetres.
    pub total_wire_length: f64,
}

/// A connector housing on the bill of materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorLine {
    /// Housing family.
    pub connector_type: ConnectorType,
    /// Manufacturer part number.
    pub part_number: Option<String>,
    /// Always one; every connector is its own line.
    pub quantity: u32,
}

/// All wires sharing a cable type and colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireLine {
    /// Cable specification.
    pub wire_type: WireType,
    /// Insulation colour.
    pub color: String,
    /// Summed cached length, in millimetres.
    pub length_mm: f64,
    /// Number of wires.
    pub count: usize,
}

/// Total use of one protection across all branches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtectionLine {
    /// Kind of sleeving or conduit.
    pub protection_type: ProtectionType,
    /// Manufacturer part number.
    pub part_number: Option<String>,
    /// Nominal diameter in millimetres.
    pub diameter_mm: Option<f64>,
    /// Summed length of every branch wrapped in this protection.
    pub length_mm: f64,
}

/// Builds the bill of materials.
///
/// Wire lengths are taken from each wire's cached `calculated_length_mm`
/// (absent counts as zero), so callers usually run
/// [`Harness::calculate_all_wire_lengths`] first. Protection lengths come
/// straight from branch geometry.
#[must_use]
pub fn generate_bom(harness: &Harness) -> Bom {
    let connectors = harness
        .connectors()
        .map(|connector| {
            (
                connector.id.clone(),
                ConnectorLine {
                    connector_type: connector.connector_type,
                    part_number: connector.part_number.clone(),
                    quantity: 1,
                },
            )
        })
        .collect();

    let mut wires: BTreeMap<String, WireLine> = BTreeMap::new();
    let mut total_wire_length = 0.0;
    for wire in harness.wires() {
        let length = wire.calculated_length_mm.unwrap_or_default();
        let line = wires
            .entry(format!("{}_{}", wire.wire_type, wire.color))
            .or_insert_with(|| WireLine {
                wire_type: wire.wire_type,
                color: wire.color.clone(),
                length_mm: 0.0,
                count: 0,
            });
        line.length_mm += length;
        line.count += 1;
        total_wire_length += length;
    }

    let mut protections: BTreeMap<EntityId, ProtectionLine> = harness
        .protections()
        .map(|protection| {
            (
                protection.id.clone(),
                ProtectionLine {
                    protection_type: protection.protection_type,
                    part_number: protection.part_number.clone(),
                    diameter_mm: protection.diameter_mm,
                    length_mm: 0.0,
                },
            )
        })
        .collect();
    for branch in harness.branches() {
        if let Some(line) = branch
            .protection_id
            .as_ref()
            .and_then(|id| protections.get_mut(id))
        {
            line.length_mm += calculate_branch_length(branch);
        }
    }

    Bom {
        connectors,
        wires,
        protections,
        total_wire_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BranchProtection, HarnessBranch, catalog::ProtectionType, geometry::Point,
        harness::fixtures::{id, sample_harness},
    };

    #[test]
    fn every_connector_is_listed_once() {
        let bom = generate_bom(&sample_harness());
        assert_eq!(bom.connectors.len(), 2);
        assert!(bom.connectors.values().all(|line| line.quantity == 1));
        assert_eq!(bom.connectors["C1"].part_number.as_deref(), Some("PN-C1"));
    }

    #[test]
    fn wires_group_by_type_and_colour() {
        let mut harness = sample_harness();
        harness.calculate_all_wire_lengths();
        let bom = generate_bom(&harness);

        let red = &bom.wires["FLRY-B 0.5 mm²_RD"];
        assert_eq!(red.count, 2);
        assert!((red.length_mm - 220.0).abs() < 1e-9);

        let black = &bom.wires["FLRY-B 1.0 mm²_BK"];
        assert_eq!(black.count, 1);
        assert!((black.length_mm - 110.0).abs() < 1e-9);
    }

    #[test]
    fn total_wire_length_matches_cached_lengths() {
        let mut harness = sample_harness();
        harness.calculate_all_wire_lengths();
        let expected: f64 = harness
            .wires()
            .filter_map(|wire| wire.calculated_length_mm)
            .sum();

        let bom = generate_bom(&harness);
        assert!((bom.total_wire_length - expected).abs() < 1e-9);
        assert!((bom.total_wire_length - 330.0).abs() < 1e-9);
    }

    #[test]
    fn uncalculated_wires_count_as_zero_length() {
        let bom = generate_bom(&sample_harness());
        assert!(bom.total_wire_length.abs() < f64::EPSILON);
        assert_eq!(bom.wires["FLRY-B 0.5 mm²_RD"].count, 2);
    }

    #[test]
    fn protection_length_sums_every_wrapped_branch() {
        let mut harness = sample_harness();
        harness
            .add_branch(
                HarnessBranch::new(id("B2"), "Drop")
                    .with_protection(id("P1"))
                    .with_points([Point::new(50.0, 0.0), Point::new(50.0, 30.0)]),
            )
            .unwrap();
        harness
            .add_protection(BranchProtection::new(id("P2"), ProtectionType::Tape))
            .unwrap();

        let bom = generate_bom(&harness);
        assert!((bom.protections["P1"].length_mm - 130.0).abs() < 1e-9);
        assert!(bom.protections["P2"].length_mm.abs() < f64::EPSILON);
    }
}
