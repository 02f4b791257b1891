use std::collections::BTreeSet;

use crate::domain::{
    EntityId,
    catalog::ProtectionType,
    geometry::{self, Point, Positioned},
};

/// Protective material applied over a branch.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchProtection {
    /// Unique identifier within the harness.
    pub id: EntityId,
    /// Kind of sleeving or conduit.
    pub protection_type: ProtectionType,
    /// Manufacturer part number.
    pub part_number: Option<String>,
    /// Nominal diameter in millimetres.
    pub diameter_mm: Option<f64>,
}

impl BranchProtection {
    /// Creates a protection with no part number or diameter.
    #[must_use]
    pub const fn new(id: EntityId, protection_type: ProtectionType) -> Self {
        Self {
            id,
            protection_type,
            part_number: None,
            diameter_mm: None,
        }
    }
}

/// One vertex of a branch path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    /// Ordering key; strictly increasing along the path.
    pub sequence: u32,
    /// Vertex position.
    pub position: Point,
}

impl Positioned for PathPoint {
    fn position(&self) -> Point {
        self.position
    }
}

/// A bundle of wires following one physical path.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessBranch {
    /// Unique identifier within the harness.
    pub id: EntityId,
    /// Human-readable name.
    pub name: String,
    /// Protection wrapped around the bundle.
    pub protection_id: Option<EntityId>,
    /// Path vertices, ordered by sequence number.
    pub path_points: Vec<PathPoint>,
    /// Nodes lying on this branch.
    pub nodes: BTreeSet<EntityId>,
}

impl HarnessBranch {
    /// Creates a branch with an empty path and no member nodes.
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            protection_id: None,
            path_points: Vec::new(),
            nodes: BTreeSet::new(),
        }
    }

    /// Sets the protection.
    #[must_use]
    pub fn with_protection(mut self, protection_id: EntityId) -> Self {
        self.protection_id = Some(protection_id);
        self
    }

    /// Replaces the path with `points`, numbering them 1, 2, 3, ...
    #[must_use]
    pub fn with_points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.path_points = (1..)
            .zip(points)
            .map(|(sequence, position)| PathPoint { sequence, position })
            .collect();
        self
    }

    /// Adds member nodes.
    #[must_use]
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = EntityId>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Length of the branch path.
    #[must_use]
    pub fn length(&self) -> f64 {
        geometry::polyline_length(&self.path_points)
    }

    /// Whether `node_id` lies on this branch.
    #[must_use]
    pub fn contains_node(&self, node_id: &str) -> bool {
        self.nodes.contains(node_id)
    }

    /// The first sequence number that does not strictly follow its
    /// predecessor.
    pub(crate) fn first_unordered_sequence(&self) -> Option<u32> {
        self.path_points
            .windows(2)
            .find(|pair| pair[1].sequence <= pair[0].sequence)
            .map(|pair| pair[1].sequence)
    }
}
