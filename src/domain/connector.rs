use crate::domain::{
    EntityId, HarnessError,
    catalog::{ConnectorType, Gender, SealType},
    geometry::Point,
    harness::EntityKind,
};

/// A single cavity within a connector housing.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    /// Cavity number as printed on the housing (e.g. `"1"`, `"A3"`).
    pub number: String,
    /// Terminal gender.
    pub gender: Gender,
    /// Cavity sealing.
    pub seal: SealType,
    /// The wire occupying this cavity.
    ///
    /// This is a lookup key into the owning harness, maintained by the
    /// harness as wires are added and removed.
    pub(crate) wire_id: Option<EntityId>,
}

impl Pin {
    /// Creates an unoccupied cavity.
    #[must_use]
    pub fn new(number: impl Into<String>, gender: Gender, seal: SealType) -> Self {
        Self {
            number: number.into(),
            gender,
            seal,
            wire_id: None,
        }
    }

    /// The wire currently occupying this cavity, if any.
    #[must_use]
    pub const fn wire_id(&self) -> Option<&EntityId> {
        self.wire_id.as_ref()
    }
}

/// A connector housing and its cavities.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    /// Unique identifier within the harness.
    pub id: EntityId,
    /// Human-readable reference designator.
    pub name: String,
    /// Housing family.
    pub connector_type: ConnectorType,
    /// Housing gender.
    pub gender: Gender,
    /// Housing sealing.
    pub seal: SealType,
    /// Manufacturer part number.
    pub part_number: Option<String>,
    /// Position on the drawing board.
    pub position: Point,
    /// Cavities in insertion order; numbers are unique.
    pins: Vec<Pin>,
}

impl Connector {
    /// Creates a connector with no cavities.
    #[must_use]
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        connector_type: ConnectorType,
        gender: Gender,
        seal: SealType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            connector_type,
            gender,
            seal,
            part_number: None,
            position: Point::ORIGIN,
            pins: Vec::new(),
        }
    }

    /// Sets the manufacturer part number.
    #[must_use]
    pub fn with_part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_number = Some(part_number.into());
        self
    }

    /// Sets the board position.
    #[must_use]
    pub const fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Adds a cavity to a connector that is not yet part of a harness.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::DuplicateId`] if a cavity with the same number
    /// already exists.
    pub fn with_pin(mut self, pin: Pin) -> Result<Self, HarnessError> {
        self.insert_pin(pin)?;
        Ok(self)
    }

    /// Cavities in insertion order.
    pub fn pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter()
    }

    /// Looks up a cavity by number.
    #[must_use]
    pub fn pin(&self, number: &str) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.number == number)
    }

    pub(crate) fn pin_mut(&mut self, number: &str) -> Option<&mut Pin> {
        self.pins.iter_mut().find(|pin| pin.number == number)
    }

    /// Forgets every recorded occupant.
    pub(crate) fn vacate_pins(&mut self) {
        for pin in &mut self.pins {
            pin.wire_id = None;
        }
    }

    pub(crate) fn insert_pin(&mut self, pin: Pin) -> Result<(), HarnessError> {
        if self.pin(&pin.number).is_some() {
            return Err(HarnessError::DuplicateId {
                kind: EntityKind::Pin,
                id: format!("{}:{}", self.id, pin.number),
            });
        }
        self.pins.push(pin);
        Ok(())
    }
}
