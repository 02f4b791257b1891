//! Branch and wire length calculations.
//!
//! Wire lengths are attributed per branch: a wire is taken to run the full
//! length of every branch that has both of its end nodes as members. Wires
//! that leave a branch part-way are therefore over-estimated. Positions along
//! a branch snap to the nearest path vertex rather than projecting onto the
//! path segments. Both are known approximations of the length model.

use std::collections::BTreeMap;

use tracing::instrument;

use crate::domain::{
    EntityId, Harness,
    branch::HarnessBranch,
    geometry::{length_to_index, nearest_point_index, polyline_length},
    node::Node,
    wire::Wire,
};

/// Allowance added to every computed wire length for service loops.
pub const SERVICE_LOOP_FACTOR: f64 = 1.10;

/// Total length of a branch path.
#[must_use]
pub fn calculate_branch_length(branch: &HarnessBranch) -> f64 {
    polyline_length(&branch.path_points)
}

/// Distance along a branch from its first path point to the vertex nearest
/// `node`.
///
/// Returns `None` if the node is unresolved or the branch has no path.
#[must_use]
pub fn find_distance_to_node(branch: &HarnessBranch, node: Option<&Node>) -> Option<f64> {
    let node = node?;
    let (index, _) = nearest_point_index(&branch.path_points, node.position).ok()?;
    Some(length_to_index(&branch.path_points, index))
}

/// The length `wire` contributes within `branch`.
///
/// This is the whole branch length when both of the wire's end nodes lie on
/// the branch, and `None` otherwise.
#[must_use]
pub fn calculate_wire_length(wire: &Wire, branch: &HarnessBranch) -> Option<f64> {
    (branch.contains_node(&wire.from_node_id) && branch.contains_node(&wire.to_node_id))
        .then(|| calculate_branch_length(branch))
}

impl Harness {
    /// Length of the branch `branch_id`, if it exists.
    #[must_use]
    pub fn branch_length(&self, branch_id: &str) -> Option<f64> {
        self.branch(branch_id).map(calculate_branch_length)
    }

    /// Distance along `branch_id` to the vertex nearest `node_id`.
    ///
    /// See [`find_distance_to_node`].
    #[must_use]
    pub fn distance_to_node(&self, branch_id: &str, node_id: &str) -> Option<f64> {
        find_distance_to_node(self.branch(branch_id)?, self.node(node_id))
    }

    /// Recomputes the length of every wire from branch geometry.
    ///
    /// Each wire's length is the sum of its per-branch lengths, scaled by
    /// [`SERVICE_LOOP_FACTOR`]. The result overwrites every wire's
    /// `calculated_length_mm` and is also returned keyed by wire id. Wires
    /// on no branch get a length of zero.
    #[instrument(level = "debug", skip(self), fields(harness = %self.id))]
    pub fn calculate_all_wire_lengths(&mut self) -> BTreeMap<EntityId, f64> {
        let lengths: BTreeMap<EntityId, f64> = self
            .wires()
            .map(|wire| {
                let raw: f64 = self
                    .branches()
                    .filter_map(|branch| calculate_wire_length(wire, branch))
                    .sum();
                (wire.id.clone(), raw * SERVICE_LOOP_FACTOR)
            })
            .collect();

        for wire in self.wires_mut() {
            wire.calculated_length_mm = lengths.get(&wire.id).copied();
        }

        tracing::debug!(wires = lengths.len(), "recalculated wire lengths");
        lengths
    }
}
