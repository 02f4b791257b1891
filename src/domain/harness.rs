//! The harness aggregate.
//!
//! A [`Harness`] owns every connector, node, wire, branch, protection and
//! fastener belonging to one harness. All entities enter through its `add_*`
//! methods, which validate every cross-reference and uniqueness rule before
//! touching any state, so a rejected call leaves the harness exactly as it
//! was.
//!
//! References between entities are identifiers, never pointers. A pin names
//! the wire in its cavity and a node names its connector housing; both are
//! resolved through the harness on demand.

use std::{collections::HashMap, fmt};

use thiserror::Error;
use tracing::instrument;

mod registry;
use registry::Registry;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::domain::{
    EntityId,
    branch::{BranchProtection, HarnessBranch},
    catalog::NodeType,
    connector::{Connector, Pin},
    fastener::{Attachment, Fastener, FastenerType},
    node::Node,
    wire::{Endpoints, Wire},
};

/// The kinds of entity a harness holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A connector housing.
    Connector,
    /// A connector cavity.
    Pin,
    /// A node.
    Node,
    /// A wire.
    Wire,
    /// A branch.
    Branch,
    /// A branch protection.
    Protection,
    /// A fastener instance.
    Fastener,
    /// A fastener catalogue entry.
    FastenerType,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connector => "connector",
            Self::Pin => "pin",
            Self::Node => "node",
            Self::Wire => "wire",
            Self::Branch => "branch",
            Self::Protection => "protection",
            Self::Fastener => "fastener",
            Self::FastenerType => "fastener type",
        })
    }
}

/// Errors raised when a mutation would break a harness invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HarnessError {
    /// An entity with the same identifier already exists.
    #[error("{kind} '{id}' already exists")]
    DuplicateId {
        /// Kind of the rejected entity.
        kind: EntityKind,
        /// The colliding identifier. Pins are reported as `connector:pin`.
        id: String,
    },

    /// A reference does not resolve within the harness.
    #[error("{kind} '{id}' refers to unknown {target_kind} '{target}'")]
    DanglingReference {
        /// Kind of the entity holding the reference.
        kind: EntityKind,
        /// Identifier of the entity holding the reference.
        id: String,
        /// Kind of the entity referred to.
        target_kind: EntityKind,
        /// The unresolved identifier.
        target: String,
    },

    /// Another wire already joins exactly the same endpoints.
    #[error("wire '{id}' has the same endpoints as wire '{existing}'")]
    DuplicateEndpoint {
        /// The rejected wire.
        id: EntityId,
        /// The wire already using those endpoints.
        existing: EntityId,
    },

    /// A cavity already holds a different wire.
    #[error("pin {connector}:{pin} is already occupied by wire '{wire}'")]
    PinOccupied {
        /// Connector owning the cavity.
        connector: EntityId,
        /// Cavity number.
        pin: String,
        /// The wire already in the cavity.
        wire: EntityId,
    },

    /// Path sequence numbers are not strictly increasing.
    #[error("branch '{branch}' path point {sequence} does not follow its predecessor")]
    UnorderedPath {
        /// The rejected branch.
        branch: EntityId,
        /// The offending sequence number.
        sequence: u32,
    },

    /// A node's type and connector reference disagree.
    ///
    /// Connector nodes must name a connector; other nodes must not.
    #[error("node '{node}' of type {node_type} has an inconsistent connector reference")]
    ConnectorNodeMismatch {
        /// The rejected node.
        node: EntityId,
        /// Its declared type.
        node_type: NodeType,
    },

    /// A required entity does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Kind of the missing entity.
        kind: EntityKind,
        /// The identifier looked up.
        id: String,
    },
}

fn dangling(
    kind: EntityKind,
    id: &impl fmt::Display,
    target_kind: EntityKind,
    target: &impl fmt::Display,
) -> HarnessError {
    HarnessError::DanglingReference {
        kind,
        id: id.to_string(),
        target_kind,
        target: target.to_string(),
    }
}

fn not_found(kind: EntityKind, id: &str) -> HarnessError {
    HarnessError::NotFound {
        kind,
        id: id.to_string(),
    }
}

/// A complete wiring harness.
#[derive(Debug, Clone)]
pub struct Harness {
    /// Harness identifier.
    pub id: EntityId,
    /// Human-readable name.
    pub name: String,
    /// Harness part number.
    pub part_number: String,
    /// Design revision.
    pub revision: u32,

    connectors: Registry<Connector>,
    nodes: Registry<Node>,
    wires: Registry<Wire>,
    branches: Registry<HarnessBranch>,
    protections: Registry<BranchProtection>,
    fasteners: Registry<Fastener>,
    fastener_types: Registry<FastenerType>,

    /// Endpoint tuple → wire, enforcing endpoint uniqueness.
    endpoints: HashMap<Endpoints, EntityId>,
}

impl Harness {
    /// Creates an empty harness at revision 1.
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>, part_number: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            part_number: part_number.into(),
            revision: 1,
            connectors: Registry::default(),
            nodes: Registry::default(),
            wires: Registry::default(),
            branches: Registry::default(),
            protections: Registry::default(),
            fasteners: Registry::default(),
            fastener_types: Registry::default(),
            endpoints: HashMap::new(),
        }
    }

    /// Adds a branch protection.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::DuplicateId`] if the identifier is taken.
    pub fn add_protection(&mut self, protection: BranchProtection) -> Result<(), HarnessError> {
        if self.protections.contains(&protection.id) {
            return Err(duplicate(EntityKind::Protection, &protection.id));
        }
        self.protections.insert(protection);
        Ok(())
    }

    /// Adds a connector together with its cavities.
    ///
    /// Cavities enter empty. Occupants recorded elsewhere, such as on a
    /// connector cloned out of another harness, are discarded; only
    /// [`Harness::add_wire`] fills a cavity.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::DuplicateId`] if the identifier is taken.
    pub fn add_connector(&mut self, mut connector: Connector) -> Result<(), HarnessError> {
        if self.connectors.contains(&connector.id) {
            return Err(duplicate(EntityKind::Connector, &connector.id));
        }
        connector.vacate_pins();
        self.connectors.insert(connector);
        Ok(())
    }

    /// Adds a cavity to a connector already in the harness.
    ///
    /// The cavity enters empty, whatever occupant it carried before.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::DanglingReference`] if the connector does not exist
    /// - [`HarnessError::DuplicateId`] if the connector already has a cavity
    ///   with this number
    pub fn add_pin(&mut self, connector_id: &str, mut pin: Pin) -> Result<(), HarnessError> {
        let connector = self.connectors.get_mut(connector_id).ok_or_else(|| {
            dangling(
                EntityKind::Pin,
                &pin.number,
                EntityKind::Connector,
                &connector_id,
            )
        })?;
        pin.wire_id = None;
        connector.insert_pin(pin)
    }

    /// Adds a node.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::DuplicateId`] if the identifier is taken
    /// - [`HarnessError::ConnectorNodeMismatch`] if a connector node names no
    ///   connector, or any other node names one
    /// - [`HarnessError::DanglingReference`] if the named connector does not
    ///   exist
    pub fn add_node(&mut self, node: Node) -> Result<(), HarnessError> {
        if self.nodes.contains(&node.id) {
            return Err(duplicate(EntityKind::Node, &node.id));
        }

        match (node.node_type, &node.connector_id) {
            (NodeType::Connector, Some(connector_id)) => {
                if !self.connectors.contains(connector_id) {
                    return Err(dangling(
                        EntityKind::Node,
                        &node.id,
                        EntityKind::Connector,
                        connector_id,
                    ));
                }
            }
            (NodeType::Connector, None) | (_, Some(_)) => {
                return Err(HarnessError::ConnectorNodeMismatch {
                    node: node.id,
                    node_type: node.node_type,
                });
            }
            (_, None) => {}
        }

        self.nodes.insert(node);
        Ok(())
    }

    /// Adds a wire and records it in the cavities it terminates in.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::DuplicateId`] if the identifier is taken
    /// - [`HarnessError::DanglingReference`] if either node does not exist,
    ///   or a pin is named that is not a cavity of that node's connector
    /// - [`HarnessError::DuplicateEndpoint`] if another wire joins the same
    ///   nodes and pins
    /// - [`HarnessError::PinOccupied`] if a named cavity already holds
    ///   another wire
    #[instrument(level = "debug", skip_all, fields(wire = %wire.id))]
    pub fn add_wire(&mut self, wire: Wire) -> Result<(), HarnessError> {
        if self.wires.contains(&wire.id) {
            return Err(duplicate(EntityKind::Wire, &wire.id));
        }

        let mut cavities = Vec::with_capacity(2);
        for (node_id, pin) in wire.ends() {
            let node = self
                .nodes
                .get(node_id)
                .ok_or_else(|| dangling(EntityKind::Wire, &wire.id, EntityKind::Node, node_id))?;

            if let Some(number) = pin {
                let cavity = self.resolve_cavity(node, number).ok_or_else(|| {
                    dangling(
                        EntityKind::Wire,
                        &wire.id,
                        EntityKind::Pin,
                        &format!("{node_id}:{number}"),
                    )
                })?;
                cavities.push(cavity);
            }
        }

        let endpoints = wire.endpoints();
        if let Some(existing) = self.endpoints.get(&endpoints) {
            return Err(HarnessError::DuplicateEndpoint {
                id: wire.id,
                existing: existing.clone(),
            });
        }

        for (connector, pin) in &cavities {
            if let Some(occupant) = pin.wire_id() {
                return Err(HarnessError::PinOccupied {
                    connector: (*connector).clone(),
                    pin: pin.number.clone(),
                    wire: occupant.clone(),
                });
            }
        }

        // Everything is validated; from here on the insert cannot fail.
        let cavities: Vec<(EntityId, String)> = cavities
            .into_iter()
            .map(|(connector, pin)| (connector.clone(), pin.number.clone()))
            .collect();
        for (connector, number) in cavities {
            if let Some(pin) = self
                .connectors
                .get_mut(&connector)
                .and_then(|connector| connector.pin_mut(&number))
            {
                pin.wire_id = Some(wire.id.clone());
            }
        }
        self.endpoints.insert(endpoints, wire.id.clone());
        self.wires.insert(wire);
        Ok(())
    }

    /// Adds a branch.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::DuplicateId`] if the identifier is taken
    /// - [`HarnessError::DanglingReference`] if the protection or any member
    ///   node does not exist
    /// - [`HarnessError::UnorderedPath`] if path sequence numbers are not
    ///   strictly increasing
    pub fn add_branch(&mut self, branch: HarnessBranch) -> Result<(), HarnessError> {
        if self.branches.contains(&branch.id) {
            return Err(duplicate(EntityKind::Branch, &branch.id));
        }

        if let Some(protection_id) = &branch.protection_id {
            if !self.protections.contains(protection_id) {
                return Err(dangling(
                    EntityKind::Branch,
                    &branch.id,
                    EntityKind::Protection,
                    protection_id,
                ));
            }
        }

        if let Some(missing) = branch.nodes.iter().find(|id| !self.nodes.contains(id)) {
            return Err(dangling(
                EntityKind::Branch,
                &branch.id,
                EntityKind::Node,
                missing,
            ));
        }

        if let Some(sequence) = branch.first_unordered_sequence() {
            return Err(HarnessError::UnorderedPath {
                branch: branch.id,
                sequence,
            });
        }

        self.branches.insert(branch);
        Ok(())
    }

    /// Adds a fastener catalogue entry.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::DuplicateId`] if the identifier is taken.
    pub fn add_fastener_type(&mut self, fastener_type: FastenerType) -> Result<(), HarnessError> {
        if self.fastener_types.contains(&fastener_type.id) {
            return Err(duplicate(EntityKind::FastenerType, &fastener_type.id));
        }
        self.fastener_types.insert(fastener_type);
        Ok(())
    }

    /// Adds a fastener instance.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::DuplicateId`] if the identifier is taken
    /// - [`HarnessError::DanglingReference`] if the fastener type, or the
    ///   branch or node it is attached to, does not exist
    pub fn add_fastener(&mut self, fastener: Fastener) -> Result<(), HarnessError> {
        if self.fasteners.contains(&fastener.id) {
            return Err(duplicate(EntityKind::Fastener, &fastener.id));
        }

        if !self.fastener_types.contains(&fastener.type_id) {
            return Err(dangling(
                EntityKind::Fastener,
                &fastener.id,
                EntityKind::FastenerType,
                &fastener.type_id,
            ));
        }

        let (target_kind, target, resolves) = match &fastener.attachment {
            Attachment::Branch { branch_id, .. } => (
                EntityKind::Branch,
                branch_id,
                self.branches.contains(branch_id),
            ),
            Attachment::Node { node_id } => {
                (EntityKind::Node, node_id, self.nodes.contains(node_id))
            }
        };
        if !resolves {
            return Err(dangling(
                EntityKind::Fastener,
                &fastener.id,
                target_kind,
                target,
            ));
        }

        self.fasteners.insert(fastener);
        Ok(())
    }

    /// Removes a wire, freeing the cavities it occupied.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::NotFound`] if there is no such wire.
    pub fn remove_wire(&mut self, wire_id: &str) -> Result<Wire, HarnessError> {
        let wire = self
            .wires
            .remove(wire_id)
            .ok_or_else(|| not_found(EntityKind::Wire, wire_id))?;
        self.endpoints.remove(&wire.endpoints());

        for (node_id, number) in wire.ends() {
            let Some(number) = number else {
                continue;
            };
            let Some(connector_id) = self
                .nodes
                .get(node_id)
                .and_then(|node| node.connector_id.as_ref())
            else {
                continue;
            };
            if let Some(pin) = self
                .connectors
                .get_mut(connector_id)
                .and_then(|connector| connector.pin_mut(number))
            {
                if pin.wire_id.as_ref() == Some(&wire.id) {
                    pin.wire_id = None;
                }
            }
        }

        Ok(wire)
    }

    /// Removes a fastener instance.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::NotFound`] if there is no such fastener.
    pub fn remove_fastener(&mut self, fastener_id: &str) -> Result<Fastener, HarnessError> {
        self.fasteners
            .remove(fastener_id)
            .ok_or_else(|| not_found(EntityKind::Fastener, fastener_id))
    }

    /// Removes a node and everything that depends on it.
    ///
    /// Wires ending at the node and fasteners fitted to it are removed, and
    /// the node is dropped from every branch it belonged to.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::NotFound`] if there is no such node.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_node(&mut self, node_id: &str) -> Result<Node, HarnessError> {
        if !self.nodes.contains(node_id) {
            return Err(not_found(EntityKind::Node, node_id));
        }

        let wires: Vec<EntityId> = self
            .wires
            .iter()
            .filter(|wire| {
                wire.from_node_id.as_str() == node_id || wire.to_node_id.as_str() == node_id
            })
            .map(|wire| wire.id.clone())
            .collect();
        for wire_id in &wires {
            self.remove_wire(wire_id)?;
        }

        let fasteners: Vec<EntityId> = self
            .fasteners
            .iter()
            .filter(|fastener| fastener.node_id().is_some_and(|id| id.as_str() == node_id))
            .map(|fastener| fastener.id.clone())
            .collect();
        for fastener_id in &fasteners {
            self.fasteners.remove(fastener_id);
        }

        for branch in self.branches.iter_mut() {
            branch.nodes.remove(node_id);
        }

        tracing::debug!(
            wires = wires.len(),
            fasteners = fasteners.len(),
            "removed node and dependents"
        );

        self.nodes
            .remove(node_id)
            .ok_or_else(|| not_found(EntityKind::Node, node_id))
    }

    /// The cavities of a connector, in insertion order.
    ///
    /// An unknown connector has no cavities.
    #[must_use]
    pub fn get_pins(&self, connector_id: &str) -> Vec<&Pin> {
        self.connectors
            .get(connector_id)
            .map(|connector| connector.pins().collect())
            .unwrap_or_default()
    }

    /// Every wire with an end at a node standing for `connector_id`, in
    /// insertion order.
    #[must_use]
    pub fn get_wires_for_connector(&self, connector_id: &str) -> Vec<&Wire> {
        let at_connector = |node_id: &EntityId| {
            self.nodes
                .get(node_id)
                .and_then(|node| node.connector_id.as_ref())
                .is_some_and(|id| id.as_str() == connector_id)
        };

        self.wires
            .iter()
            .filter(|wire| at_connector(&wire.from_node_id) || at_connector(&wire.to_node_id))
            .collect()
    }

    /// Fasteners clipped to a branch, in insertion order.
    #[must_use]
    pub fn get_fasteners_for_branch(&self, branch_id: &str) -> Vec<&Fastener> {
        self.fasteners
            .iter()
            .filter(|fastener| fastener.branch_id().is_some_and(|id| id.as_str() == branch_id))
            .collect()
    }

    /// Fasteners fitted at a node, in insertion order.
    #[must_use]
    pub fn get_fasteners_for_node(&self, node_id: &str) -> Vec<&Fastener> {
        self.fasteners
            .iter()
            .filter(|fastener| fastener.node_id().is_some_and(|id| id.as_str() == node_id))
            .collect()
    }

    /// Resolves the wire in a cavity.
    ///
    /// Returns `None` for an empty cavity, or if the recorded wire is no
    /// longer part of the harness.
    #[must_use]
    pub fn pin_wire(&self, pin: &Pin) -> Option<&Wire> {
        pin.wire_id().and_then(|id| self.wires.get(id))
    }

    /// Resolves the connector a node stands for.
    #[must_use]
    pub fn node_connector(&self, node: &Node) -> Option<&Connector> {
        node.connector_id
            .as_ref()
            .and_then(|id| self.connectors.get(id))
    }

    /// Looks up a connector.
    #[must_use]
    pub fn connector(&self, id: &str) -> Option<&Connector> {
        self.connectors.get(id)
    }

    /// Connectors in insertion order.
    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.iter()
    }

    /// Looks up a node.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Looks up a wire.
    #[must_use]
    pub fn wire(&self, id: &str) -> Option<&Wire> {
        self.wires.get(id)
    }

    /// Wires in insertion order.
    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.iter()
    }

    pub(crate) fn wires_mut(&mut self) -> impl Iterator<Item = &mut Wire> {
        self.wires.iter_mut()
    }

    /// Looks up a branch.
    #[must_use]
    pub fn branch(&self, id: &str) -> Option<&HarnessBranch> {
        self.branches.get(id)
    }

    /// Branches in insertion order.
    pub fn branches(&self) -> impl Iterator<Item = &HarnessBranch> {
        self.branches.iter()
    }

    /// Looks up a branch protection.
    #[must_use]
    pub fn protection(&self, id: &str) -> Option<&BranchProtection> {
        self.protections.get(id)
    }

    /// Branch protections in insertion order.
    pub fn protections(&self) -> impl Iterator<Item = &BranchProtection> {
        self.protections.iter()
    }

    /// Looks up a fastener.
    #[must_use]
    pub fn fastener(&self, id: &str) -> Option<&Fastener> {
        self.fasteners.get(id)
    }

    /// Fasteners in insertion order.
    pub fn fasteners(&self) -> impl Iterator<Item = &Fastener> {
        self.fasteners.iter()
    }

    /// Looks up a fastener catalogue entry.
    #[must_use]
    pub fn fastener_type(&self, id: &str) -> Option<&FastenerType> {
        self.fastener_types.get(id)
    }

    /// Fastener catalogue entries in insertion order.
    pub fn fastener_types(&self) -> impl Iterator<Item = &FastenerType> {
        self.fastener_types.iter()
    }

    /// Number of wires.
    #[must_use]
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Number of connectors.
    #[must_use]
    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    /// Finds the connector and cavity `number` names at `node`.
    ///
    /// Only connector nodes have cavities.
    fn resolve_cavity<'a>(&'a self, node: &Node, number: &str) -> Option<(&'a EntityId, &'a Pin)> {
        let connector = self.node_connector(node)?;
        let pin = connector.pin(number)?;
        Some((&connector.id, pin))
    }
}

fn duplicate(kind: EntityKind, id: &EntityId) -> HarnessError {
    HarnessError::DuplicateId {
        kind,
        id: id.to_string(),
    }
}
