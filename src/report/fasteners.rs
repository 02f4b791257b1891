use std::collections::BTreeMap;

use serde::Serialize;

use super::NOT_APPLICABLE;
use crate::Harness;

/// All fasteners sharing a part number and size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FastenerLine {
    /// Ordering part number.
    pub part_number: String,
    /// Catalogue name of the fastener type.
    pub type_name: String,
    /// Size designation.
    pub size: Option<String>,
    /// Total pieces across every matching fastener.
    pub quantity: u64,
    /// Tightening torque from the fastener type, in newton-metres.
    pub torque_nm: Option<f64>,
    /// One `Branch {id}` or `Node {id}` entry per fastener, in insertion
    /// order.
    pub locations: Vec<String>,
}

/// Builds the fastener bill of materials, keyed by
/// `"{part_number}_{size}"` (size empty when unset).
#[must_use]
pub fn generate_fastener_bom(harness: &Harness) -> BTreeMap<String, FastenerLine> {
    let mut lines: BTreeMap<String, FastenerLine> = BTreeMap::new();

    for fastener in harness.fasteners() {
        let fastener_type = harness.fastener_type(&fastener.type_id);
        let key = format!(
            "{}_{}",
            fastener.part_number,
            fastener.size.as_deref().unwrap_or_default()
        );

        let line = lines.entry(key).or_insert_with(|| FastenerLine {
            part_number: fastener.part_number.clone(),
            type_name: fastener_type
                .map_or(NOT_APPLICABLE, |t| t.name.as_str())
                .to_string(),
            size: fastener.size.clone(),
            quantity: 0,
            torque_nm: fastener_type.and_then(|t| t.torque_nm),
            locations: Vec::new(),
        });

        line.quantity += u64::from(fastener.quantity);
        line.locations.push(fastener.attachment.location());
    }

    lines
}
