//! # Product Actor
//!
//! The inventory itself: one [`ResourceActor`] owning every [`Product`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for quantity and expiry changes
//! - [`new()`] - Factory function that creates the actor and its typed client
//!
//! ## Usage
//!
//! ```rust
//! use stockroom::clock::{SharedClock, SystemClock};
//! use stockroom::product_actor;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(32);
//!     let clock: SharedClock = Arc::new(SystemClock);
//!     tokio::spawn(actor.run(clock));
//!
//!     let id = client.add_product("Toor Dal").await?;
//!     let change = client.increment(id).await?;
//!     assert_eq!(change.current_qty, 1.0);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::{Product, ProductId};
use resource_actor::ResourceActor;

/// Creates a new Product actor and its client. Ids are random UUIDs.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) =
        ResourceActor::<Product>::new(buffer_size, |_| ProductId::random());
    (actor, ProductClient::new(generic_client))
}
