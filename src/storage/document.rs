//! The on-disk YAML form of a harness.
//!
//! Documents are versioned with a `_version` tag so the file format can
//! evolve independently of the domain types. Pin occupancy is not stored; it
//! is rebuilt from the wires when the document is loaded.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::domain::{
    Attachment, BranchProtection, Connector, EntityId, Fastener, FastenerType, Harness,
    HarnessBranch, HarnessError, Node, PathPoint, Pin, Wire,
    catalog::{
        ConnectorType, FastenerCategory, FastenerMaterial, Gender, NodeType, ProtectionType,
        SealType, WireType,
    },
    geometry::Point,
};

/// Errors that can occur when loading a harness file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The harness file was not found.
    #[error("harness file not found")]
    NotFound,
    /// An I/O error occurred.
    #[error("failed to read harness file: {0}")]
    Io(#[from] io::Error),
    /// The YAML could not be parsed.
    #[error("failed to parse harness file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The document parsed but describes an inconsistent harness.
    #[error("invalid harness: {0}")]
    Invalid(#[from] HarnessError),
    /// The file name and the harness identifier inside it disagree.
    #[error("file for harness '{expected}' holds harness '{found}'")]
    IdMismatch {
        /// Identifier taken from the file name.
        expected: String,
        /// Identifier declared in the document.
        found: EntityId,
    },
}

/// Errors that can occur when saving a harness file.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// An I/O error occurred.
    #[error("failed to write harness file: {0}")]
    Io(#[from] io::Error),
    /// The harness could not be serialized.
    #[error("failed to serialize harness: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
pub enum HarnessDocument {
    #[serde(rename = "1")]
    V1(DocumentV1),
}

impl HarnessDocument {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(io_error),
        })?;
        Ok(serde_yaml::from_reader(BufReader::new(file))?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        let yaml = serde_yaml::to_string(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(yaml.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentV1 {
    id: EntityId,
    name: String,
    part_number: String,
    #[serde(default = "first_revision")]
    revision: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    protections: Vec<ProtectionRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    connectors: Vec<ConnectorRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    nodes: Vec<NodeRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    wires: Vec<WireRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    branches: Vec<BranchRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fastener_types: Vec<FastenerTypeRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fasteners: Vec<FastenerRecord>,
}

const fn first_revision() -> u32 {
    1
}

const fn one() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
struct ProtectionRecord {
    id: EntityId,
    protection_type: ProtectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    part_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    diameter_mm: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConnectorRecord {
    id: EntityId,
    name: String,
    connector_type: ConnectorType,
    gender: Gender,
    seal: SealType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    part_number: Option<String>,
    #[serde(default)]
    position: Point,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pins: Vec<PinRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PinRecord {
    number: String,
    gender: Gender,
    seal: SealType,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    connector_id: Option<EntityId>,
    #[serde(default)]
    position: Point,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireRecord {
    id: EntityId,
    wire_type: WireType,
    color: String,
    from_node_id: EntityId,
    to_node_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from_pin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to_pin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    calculated_length_mm: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BranchRecord {
    id: EntityId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    protection_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    path_points: Vec<PathPointRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    nodes: Vec<EntityId>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PathPointRecord {
    sequence: u32,
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct FastenerTypeRecord {
    id: EntityId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    category: FastenerCategory,
    #[serde(default)]
    material: FastenerMaterial,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    torque_nm: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FastenerRecord {
    id: EntityId,
    type_id: EntityId,
    part_number: String,
    #[serde(default = "one")]
    quantity: u32,
    #[serde(default)]
    position: Point,
    #[serde(default)]
    orientation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    attachment: AttachmentRecord,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum AttachmentRecord {
    Branch {
        branch_id: EntityId,
        #[serde(default)]
        distance_from_start_mm: f64,
    },
    Node {
        node_id: EntityId,
    },
}

impl From<&Harness> for HarnessDocument {
    fn from(harness: &Harness) -> Self {
        Self::V1(DocumentV1 {
            id: harness.id.clone(),
            name: harness.name.clone(),
            part_number: harness.part_number.clone(),
            revision: harness.revision,
            protections: harness
                .protections()
                .map(|protection| ProtectionRecord {
                    id: protection.id.clone(),
                    protection_type: protection.protection_type,
                    part_number: protection.part_number.clone(),
                    diameter_mm: protection.diameter_mm,
                })
                .collect(),
            connectors: harness
                .connectors()
                .map(|connector| ConnectorRecord {
                    id: connector.id.clone(),
                    name: connector.name.clone(),
                    connector_type: connector.connector_type,
                    gender: connector.gender,
                    seal: connector.seal,
                    part_number: connector.part_number.clone(),
                    position: connector.position,
                    pins: connector
                        .pins()
                        .map(|pin| PinRecord {
                            number: pin.number.clone(),
                            gender: pin.gender,
                            seal: pin.seal,
                        })
                        .collect(),
                })
                .collect(),
            nodes: harness
                .nodes()
                .map(|node| NodeRecord {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    node_type: node.node_type,
                    connector_id: node.connector_id.clone(),
                    position: node.position,
                })
                .collect(),
            wires: harness
                .wires()
                .map(|wire| WireRecord {
                    id: wire.id.clone(),
                    wire_type: wire.wire_type,
                    color: wire.color.clone(),
                    from_node_id: wire.from_node_id.clone(),
                    to_node_id: wire.to_node_id.clone(),
                    from_pin: wire.from_pin.clone(),
                    to_pin: wire.to_pin.clone(),
                    calculated_length_mm: wire.calculated_length_mm,
                })
                .collect(),
            branches: harness
                .branches()
                .map(|branch| BranchRecord {
                    id: branch.id.clone(),
                    name: branch.name.clone(),
                    protection_id: branch.protection_id.clone(),
                    path_points: branch
                        .path_points
                        .iter()
                        .map(|point| PathPointRecord {
                            sequence: point.sequence,
                            x: point.position.x,
                            y: point.position.y,
                        })
                        .collect(),
                    nodes: branch.nodes.iter().cloned().collect(),
                })
                .collect(),
            fastener_types: harness
                .fastener_types()
                .map(|fastener_type| FastenerTypeRecord {
                    id: fastener_type.id.clone(),
                    name: fastener_type.name.clone(),
                    description: fastener_type.description.clone(),
                    category: fastener_type.category,
                    material: fastener_type.material,
                    default_size: fastener_type.default_size.clone(),
                    torque_nm: fastener_type.torque_nm,
                })
                .collect(),
            fasteners: harness
                .fasteners()
                .map(|fastener| FastenerRecord {
                    id: fastener.id.clone(),
                    type_id: fastener.type_id.clone(),
                    part_number: fastener.part_number.clone(),
                    quantity: fastener.quantity,
                    position: fastener.position,
                    orientation: fastener.orientation,
                    size: fastener.size.clone(),
                    notes: fastener.notes.clone(),
                    attachment: match &fastener.attachment {
                        Attachment::Branch {
                            branch_id,
                            distance_from_start_mm,
                        } => AttachmentRecord::Branch {
                            branch_id: branch_id.clone(),
                            distance_from_start_mm: *distance_from_start_mm,
                        },
                        Attachment::Node { node_id } => AttachmentRecord::Node {
                            node_id: node_id.clone(),
                        },
                    },
                })
                .collect(),
        })
    }
}

impl TryFrom<HarnessDocument> for Harness {
    type Error = HarnessError;

    /// Rebuilds the aggregate through its `add_*` methods, so every
    /// invariant is checked exactly as for an in-memory edit.
    fn try_from(document: HarnessDocument) -> Result<Self, Self::Error> {
        let HarnessDocument::V1(document) = document;

        let mut harness = Self::new(document.id, document.name, document.part_number);
        harness.revision = document.revision;

        for record in document.protections {
            harness.add_protection(BranchProtection {
                part_number: record.part_number,
                diameter_mm: record.diameter_mm,
                ..BranchProtection::new(record.id, record.protection_type)
            })?;
        }

        for record in document.connectors {
            let mut connector = Connector::new(
                record.id,
                record.name,
                record.connector_type,
                record.gender,
                record.seal,
            )
            .with_position(record.position);
            connector.part_number = record.part_number;
            for pin in record.pins {
                connector = connector.with_pin(Pin::new(pin.number, pin.gender, pin.seal))?;
            }
            harness.add_connector(connector)?;
        }

        for record in document.nodes {
            harness.add_node(Node {
                id: record.id,
                name: record.name,
                node_type: record.node_type,
                connector_id: record.connector_id,
                position: record.position,
            })?;
        }

        for record in document.wires {
            let mut wire = Wire::new(
                record.id,
                record.wire_type,
                record.color,
                record.from_node_id,
                record.to_node_id,
            )
            .with_pins(record.from_pin.as_deref(), record.to_pin.as_deref());
            wire.calculated_length_mm = record.calculated_length_mm;
            harness.add_wire(wire)?;
        }

        for record in document.branches {
            let mut points: Vec<PathPoint> = record
                .path_points
                .into_iter()
                .map(|point| PathPoint {
                    sequence: point.sequence,
                    position: Point::new(point.x, point.y),
                })
                .collect();
            // Files may list points in any order; duplicates still fail below.
            points.sort_by_key(|point| point.sequence);

            let mut branch = HarnessBranch::new(record.id, record.name).with_nodes(record.nodes);
            branch.protection_id = record.protection_id;
            branch.path_points = points;
            harness.add_branch(branch)?;
        }

        for record in document.fastener_types {
            harness.add_fastener_type(FastenerType {
                id: record.id,
                name: record.name,
                description: record.description,
                category: record.category,
                material: record.material,
                default_size: record.default_size,
                torque_nm: record.torque_nm,
            })?;
        }

        for record in document.fasteners {
            let attachment = match record.attachment {
                AttachmentRecord::Branch {
                    branch_id,
                    distance_from_start_mm,
                } => Attachment::Branch {
                    branch_id,
                    distance_from_start_mm,
                },
                AttachmentRecord::Node { node_id } => Attachment::Node { node_id },
            };
            harness.add_fastener(Fastener {
                quantity: record.quantity,
                position: record.position,
                orientation: record.orientation,
                size: record.size,
                notes: record.notes,
                ..Fastener::new(record.id, record.type_id, record.part_number, attachment)
            })?;
        }

        Ok(harness)
    }
}
