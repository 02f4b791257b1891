//! Wiring Harness Management
//!
//! A harness is a graph of connectors, nodes, wires and branches, held in a
//! [`Harness`] aggregate that enforces referential integrity on every
//! mutation. Derived data (wire lengths, bills of materials, pinouts) is
//! computed from that model on demand.

pub mod domain;
pub use domain::{
    Attachment, BranchProtection, Config, Connector, EntityId, EntityKind, Fastener,
    FastenerType, Harness, HarnessBranch, HarnessError, Node, PathPoint, Pin, Wire,
};

/// Bills of materials and pinout reports.
pub mod report;

/// Filesystem storage for harness documents.
pub mod storage;
pub use storage::Directory;
