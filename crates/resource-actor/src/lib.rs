//! # Resource Actor
//!
//! Building blocks for keeping a collection of stateful records behind a single
//! Tokio task. Each collection is a **resource**: it is created, read, listed,
//! updated and deleted through one uniform request enum, and may expose extra
//! domain operations as **actions**.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain records and their lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - the message loop that owns the collection
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed, cloneable handles
//!
//! A collection can be made durable by handing the actor a [`Snapshot`]. The
//! actor loads the snapshot before the loop starts and writes the whole
//! collection back after every successful mutation.
//!
//! ## Example
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Shelf { id: u32, label: String }
//! #[derive(Debug)] struct ShelfCreate { label: String }
//! #[derive(Debug)] struct ShelfUpdate { label: Option<String> }
//! #[derive(Debug)] enum ShelfAction {}
//! #[derive(Debug, thiserror::Error)] #[error("shelf error")] struct ShelfError;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32;
//!     type Create = ShelfCreate;
//!     type Update = ShelfUpdate;
//!     type Action = ShelfAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = ShelfError;
//!
//!     fn id(&self) -> &u32 { &self.id }
//!
//!     fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, label: params.label })
//!     }
//!
//!     async fn on_update(&mut self, update: ShelfUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(label) = update.label { self.label = label; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: ShelfAction, _ctx: &()) -> Result<(), Self::Error> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let counter = std::sync::atomic::AtomicU32::new(1);
//!     let (actor, client) = ResourceActor::<Shelf>::new(10, move |_: &ShelfCreate| {
//!         counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
//!     });
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(ShelfCreate { label: "Aisle 1".into() }).await.unwrap();
//!     let shelf = client.get(id).await.unwrap().unwrap();
//!     assert_eq!(shelf.label, "Aisle 1");
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor, so the store needs no lock
//! - Clients are cheap to clone; dropping the last one stops the actor
//!
//! ## Testing
//!
//! The [`mock`] module provides a `MockClient` with an expectation queue and
//! low-level `expect_*` helpers for asserting on the exact requests a typed
//! client sends.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod snapshot;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use snapshot::{NoSnapshot, Snapshot, SnapshotError};
