//! Runtime orchestration and lifecycle management.
//!
//! - [`InventorySystem`] - starts every actor, wires the services on top, shuts down
//! - [`setup_tracing`] - re-exported from the framework; the binary calls it once

pub mod system;

pub use resource_actor::tracing::setup_tracing;
pub use system::*;
