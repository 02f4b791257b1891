use crate::domain::{EntityId, catalog::NodeType, geometry::Point};

/// A point where wires terminate or meet.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier within the harness.
    pub id: EntityId,
    /// Optional label, e.g. a splice designator.
    pub name: Option<String>,
    /// The role this node plays.
    pub node_type: NodeType,
    /// The connector housing this node stands for.
    ///
    /// Present exactly when `node_type` is [`NodeType::Connector`].
    pub connector_id: Option<EntityId>,
    /// Position on the drawing board.
    pub position: Point,
}

impl Node {
    /// Creates a node that stands for a connector housing.
    #[must_use]
    pub const fn connector(id: EntityId, connector_id: EntityId, position: Point) -> Self {
        Self {
            id,
            name: None,
            node_type: NodeType::Connector,
            connector_id: Some(connector_id),
            position,
        }
    }

    /// Creates a splice, ground, terminal or breakout node.
    #[must_use]
    pub const fn free(id: EntityId, node_type: NodeType, position: Point) -> Self {
        Self {
            id,
            name: None,
            node_type,
            connector_id: None,
            position,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The label, falling back to the identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}
