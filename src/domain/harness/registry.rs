//! Insertion-ordered storage for one kind of entity.

use std::collections::HashMap;

use crate::domain::{
    EntityId,
    branch::{BranchProtection, HarnessBranch},
    connector::Connector,
    fastener::{Fastener, FastenerType},
    node::Node,
    wire::Wire,
};

/// An entity addressed by a harness-unique identifier.
pub trait Keyed {
    /// The entity's identifier.
    fn key(&self) -> &EntityId;
}

macro_rules! keyed_by_id {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Keyed for $ty {
                fn key(&self) -> &EntityId {
                    &self.id
                }
            }
        )+
    };
}

keyed_by_id!(
    Connector,
    Node,
    Wire,
    HarnessBranch,
    BranchProtection,
    Fastener,
    FastenerType,
);

/// Entities in insertion order, with an id → position lookup.
///
/// Reports and queries iterate in the order entities were added, so the
/// ordering lives in the `Vec` and the `HashMap` only serves lookups.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: Vec<T>,
    index: HashMap<EntityId, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> Registry<T> {
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        let position = *self.index.get(id)?;
        self.items.get(position)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        let position = *self.index.get(id)?;
        self.items.get_mut(position)
    }

    /// Appends an entity.
    ///
    /// Callers check for identifier collisions first; a colliding insert
    /// would leave the earlier entity unreachable by id.
    pub fn insert(&mut self, item: T) {
        debug_assert!(!self.contains(item.key()), "duplicate key {}", item.key());
        self.index.insert(item.key().clone(), self.items.len());
        self.items.push(item);
    }

    /// Removes an entity, preserving the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let position = self.index.remove(id)?;
        let item = self.items.remove(position);
        for later in self.index.values_mut() {
            if *later > position {
                *later -= 1;
            }
        }
        Some(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
