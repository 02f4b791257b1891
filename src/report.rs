//! Read-only reports over a [`Harness`](crate::Harness).
//!
//! Reports never fail. Missing optional data (an empty cavity, a wire with
//! no cached length) is rendered with placeholder values so that every
//! structurally valid harness produces a complete report.

mod bom;
mod fasteners;
mod pinout;

pub use bom::{Bom, ConnectorLine, ProtectionLine, WireLine, generate_bom};
pub use fasteners::{FastenerLine, generate_fastener_bom};
pub use pinout::{PinoutRecord, generate_pinout_report};

/// Placeholder for values that do not apply, such as the wire colour of an
/// empty cavity.
pub const NOT_APPLICABLE: &str = "N/A";
