//! # Observability & Tracing
//!
//! Every actor logs with structured fields (`entity_type`, `id`, `size`) and every
//! typed client method opens a span through `#[tracing::instrument]`, so a single
//! request reads as one hierarchy:
//!
//! ```text
//! INFO Actor started entity_type="Product" size=3
//! DEBUG increment: Sending request id=5f0c...
//! INFO Action ok entity_type="Product" id=5f0c...
//! ```
//!
//! ## Configuration
//!
//! `RUST_LOG` wins when it is set; otherwise the caller's default directive applies.
//!
//! ```bash
//! RUST_LOG=debug stockroom list          # full payloads
//! RUST_LOG=resource_actor=trace stockroom list
//! ```
//!
//! The output is compact and hides the module path (`with_target(false)`); the
//! `entity_type` field already says which actor is talking.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, from the binary.
///
/// `default_directive` is used when `RUST_LOG` is unset or unparsable, e.g. `"warn"`
/// or `"stockroom=info"`.
pub fn setup_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
