use serde::Serialize;

use super::NOT_APPLICABLE;
use crate::{
    Harness, Node, Wire,
    domain::catalog::{Gender, SealType},
};

/// One cavity of a connector pinout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinoutRecord {
    /// Cavity number.
    pub pin_number: String,
    /// Terminal gender.
    pub gender: Gender,
    /// Cavity sealing.
    pub seal: SealType,
    /// The wire in the cavity, or `N/A`.
    pub wire_id: String,
    /// Cable specification of that wire, or `N/A`.
    pub wire_type: String,
    /// Insulation colour of that wire, or `N/A`.
    pub wire_color: String,
    /// Where the other end of the wire goes, or `N/A`.
    pub connected_to: String,
}

/// Builds the pinout of a connector, one record per cavity in cavity order.
///
/// Empty cavities are listed with placeholder values. An unknown connector
/// yields an empty report.
#[must_use]
pub fn generate_pinout_report(harness: &Harness, connector_id: &str) -> Vec<PinoutRecord> {
    harness
        .get_pins(connector_id)
        .into_iter()
        .map(|pin| {
            let wire = harness.pin_wire(pin);
            PinoutRecord {
                pin_number: pin.number.clone(),
                gender: pin.gender,
                seal: pin.seal,
                wire_id: wire.map_or_else(|| NOT_APPLICABLE.to_string(), |w| w.id.to_string()),
                wire_type: wire.map_or_else(
                    || NOT_APPLICABLE.to_string(),
                    |w| w.wire_type.to_string(),
                ),
                wire_color: wire.map_or_else(|| NOT_APPLICABLE.to_string(), |w| w.color.clone()),
                connected_to: wire.map_or_else(
                    || NOT_APPLICABLE.to_string(),
                    |w| connected_to(harness, w, connector_id),
                ),
            }
        })
        .collect()
}

/// Describes the end of `wire` that is not at `connector_id`.
fn connected_to(harness: &Harness, wire: &Wire, connector_id: &str) -> String {
    let from = harness.node(&wire.from_node_id);
    let to = harness.node(&wire.to_node_id);
    let is_here = |node: Option<&Node>| {
        node.and_then(|node| node.connector_id.as_deref()) == Some(connector_id)
    };

    let (far_node, far_pin) = if is_here(from) {
        (to, wire.to_pin.as_deref())
    } else if is_here(to) {
        (from, wire.from_pin.as_deref())
    } else {
        return "Unknown".to_string();
    };

    match far_node {
        Some(Node {
            connector_id: Some(far_connector),
            ..
        }) => format!(
            "Connector {far_connector}, Pin {}",
            far_pin.unwrap_or(NOT_APPLICABLE)
        ),
        Some(node) => format!("{} {}", node.node_type, node.display_name()),
        None => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        catalog::{Gender, SealType},
        harness::fixtures::{connector, sample_harness},
    };

    #[test]
    fn records_follow_pin_order() {
        let report = generate_pinout_report(&sample_harness(), "C1");
        let pins: Vec<_> = report.iter().map(|r| r.pin_number.as_str()).collect();
        assert_eq!(pins, ["1", "2", "3"]);
        assert_eq!(report[0].gender, Gender::Female);
        assert_eq!(report[0].seal, SealType::FullySealed);
    }

    #[test]
    fn outgoing_wire_describes_far_connector() {
        let report = generate_pinout_report(&sample_harness(), "C1");
        assert_eq!(report[0].wire_id, "W1");
        assert_eq!(report[0].wire_type, "FLRY-B 0.5 mm²");
        assert_eq!(report[0].wire_color, "RD");
        assert_eq!(report[0].connected_to, "Connector C2, Pin 1");
    }

    #[test]
    fn incoming_wire_describes_its_origin() {
        let report = generate_pinout_report(&sample_harness(), "C1");
        assert_eq!(report[1].wire_id, "W2");
        assert_eq!(report[1].connected_to, "Connector C2, Pin 2");
    }

    #[test]
    fn non_connector_ends_use_node_type_and_name() {
        let report = generate_pinout_report(&sample_harness(), "C1");
        assert_eq!(report[2].connected_to, "SPLICE SP1");
    }

    #[test]
    fn empty_cavities_use_placeholders() {
        let report = generate_pinout_report(&sample_harness(), "C2");
        let empty = &report[2];
        assert_eq!(empty.pin_number, "3");
        for value in [
            &empty.wire_id,
            &empty.wire_type,
            &empty.wire_color,
            &empty.connected_to,
        ] {
            assert_eq!(value, NOT_APPLICABLE);
        }
    }

    #[test]
    fn connector_without_pins_has_empty_report() {
        let mut harness = sample_harness();
        harness.add_connector(connector("C3", &[])).unwrap();
        assert!(generate_pinout_report(&harness, "C3").is_empty());
        assert!(generate_pinout_report(&harness, "C404").is_empty());
    }

    #[test]
    fn unrelated_wire_is_unknown() {
        let harness = sample_harness();
        let wire = harness.wire("W1").unwrap();
        assert_eq!(connected_to(&harness, wire, "C9"), "Unknown");
    }
}
