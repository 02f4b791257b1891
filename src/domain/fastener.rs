use crate::domain::{
    EntityId,
    catalog::{FastenerCategory, FastenerMaterial},
    geometry::Point,
};

/// A catalogue entry describing a kind of fastener.
#[derive(Debug, Clone, PartialEq)]
pub struct FastenerType {
    /// Unique identifier within the harness.
    pub id: EntityId,
    /// Catalogue name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Broad family.
    pub category: FastenerCategory,
    /// Material.
    pub material: FastenerMaterial,
    /// Size used when an instance does not specify one.
    pub default_size: Option<String>,
    /// Tightening torque in newton-metres.
    pub torque_nm: Option<f64>,
}

impl FastenerType {
    /// Creates a nylon clip entry with no size or torque.
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            category: FastenerCategory::default(),
            material: FastenerMaterial::default(),
            default_size: None,
            torque_nm: None,
        }
    }
}

/// Where a fastener is fitted.
///
/// A fastener sits either on a branch or on a node, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    /// Clipped onto a branch.
    Branch {
        /// The branch.
        branch_id: EntityId,
        /// Distance along the branch path from its first point.
        distance_from_start_mm: f64,
    },
    /// Fitted at a node.
    Node {
        /// The node.
        node_id: EntityId,
    },
}

impl Attachment {
    /// The location string used in fastener bills of materials.
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::Branch { branch_id, .. } => format!("Branch {branch_id}"),
            Self::Node { node_id } => format!("Node {node_id}"),
        }
    }
}

/// A fitted fastener instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Fastener {
    /// Unique identifier within the harness.
    pub id: EntityId,
    /// The catalogue entry.
    pub type_id: EntityId,
    /// Ordering part number.
    pub part_number: String,
    /// Number of pieces fitted at this location.
    pub quantity: u32,
    /// Position on the drawing board.
    pub position: Point,
    /// Rotation in degrees.
    pub orientation: f64,
    /// Size designation, e.g. `"M6"`.
    pub size: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Where the fastener is fitted.
    pub attachment: Attachment,
}

impl Fastener {
    /// Creates a single fastener at the origin.
    #[must_use]
    pub fn new(
        id: EntityId,
        type_id: EntityId,
        part_number: impl Into<String>,
        attachment: Attachment,
    ) -> Self {
        Self {
            id,
            type_id,
            part_number: part_number.into(),
            quantity: 1,
            position: Point::ORIGIN,
            orientation: 0.0,
            size: None,
            notes: None,
            attachment,
        }
    }

    /// Sets the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the size designation.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// The branch this fastener is clipped to, if any.
    #[must_use]
    pub const fn branch_id(&self) -> Option<&EntityId> {
        match &self.attachment {
            Attachment::Branch { branch_id, .. } => Some(branch_id),
            Attachment::Node { .. } => None,
        }
    }

    /// The node this fastener is fitted at, if any.
    #[must_use]
    pub const fn node_id(&self) -> Option<&EntityId> {
        match &self.attachment {
            Attachment::Node { node_id } => Some(node_id),
            Attachment::Branch { .. } => None,
        }
    }
}
