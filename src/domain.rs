//! Domain models for wiring harnesses.
//!
//! This module contains the entities making up a harness, the [`Harness`]
//! aggregate that owns them and enforces their invariants, and the geometry
//! and length calculations derived from branch paths.

pub mod catalog;

pub mod geometry;

mod id;
pub use id::{EmptyIdError, EntityId};

/// Connector housings and their cavities.
pub mod connector;
pub use connector::{Connector, Pin};

/// Nodes where wires terminate or meet.
pub mod node;
pub use node::Node;

/// Wires between nodes.
pub mod wire;
pub use wire::Wire;

/// Branches, their paths, and the protection wrapped around them.
pub mod branch;
pub use branch::{BranchProtection, HarnessBranch, PathPoint};

/// Fastener catalogue entries and fitted instances.
pub mod fastener;
pub use fastener::{Attachment, Fastener, FastenerType};

pub mod harness;
pub use harness::{EntityKind, Harness, HarnessError};

pub mod length;

mod config;
pub use config::Config;
