use crate::domain::{EntityId, catalog::WireType};

/// A single conductor run between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    /// Unique identifier within the harness.
    pub id: EntityId,
    /// Cable specification.
    pub wire_type: WireType,
    /// Insulation colour code (e.g. `"RD"`, `"BK/WH"`).
    pub color: String,
    /// Node the wire starts at.
    pub from_node_id: EntityId,
    /// Node the wire ends at.
    pub to_node_id: EntityId,
    /// Cavity at the start node; only meaningful for connector nodes.
    pub from_pin: Option<String>,
    /// Cavity at the end node; only meaningful for connector nodes.
    pub to_pin: Option<String>,
    /// Length derived from branch geometry, including service loop.
    ///
    /// This is a cache written by
    /// [`Harness::calculate_all_wire_lengths`](crate::Harness::calculate_all_wire_lengths);
    /// it is never an input to any calculation.
    pub calculated_length_mm: Option<f64>,
}

impl Wire {
    /// Creates a wire between two nodes, with no pins and no cached length.
    #[must_use]
    pub fn new(
        id: EntityId,
        wire_type: WireType,
        color: impl Into<String>,
        from_node_id: EntityId,
        to_node_id: EntityId,
    ) -> Self {
        Self {
            id,
            wire_type,
            color: color.into(),
            from_node_id,
            to_node_id,
            from_pin: None,
            to_pin: None,
            calculated_length_mm: None,
        }
    }

    /// Sets the cavities at either end.
    #[must_use]
    pub fn with_pins(mut self, from_pin: Option<&str>, to_pin: Option<&str>) -> Self {
        self.from_pin = from_pin.map(str::to_string);
        self.to_pin = to_pin.map(str::to_string);
        self
    }

    /// The endpoint tuple that must be unique across a harness.
    pub(crate) fn endpoints(&self) -> Endpoints {
        Endpoints {
            from_node: self.from_node_id.clone(),
            from_pin: self.from_pin.clone(),
            to_node: self.to_node_id.clone(),
            to_pin: self.to_pin.clone(),
        }
    }

    /// Both end nodes, start first.
    pub(crate) fn ends(&self) -> [(&EntityId, Option<&str>); 2] {
        [
            (&self.from_node_id, self.from_pin.as_deref()),
            (&self.to_node_id, self.to_pin.as_deref()),
        ]
    }
}

/// Owned `(from_node, from_pin, to_node, to_pin)` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Endpoints {
    from_node: EntityId,
    from_pin: Option<String>,
    to_node: EntityId,
    to_pin: Option<String>,
}
