//! # ActorEntity Trait
//!
//! The contract every record kind implements to be managed by a [`ResourceActor`](crate::ResourceActor).
//! Associated types pin down the id, the create/update payloads, the custom actions and the
//! error type, so a payload for one collection can never be sent to another.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are async so they can await other actors. The `Context` associated type is
/// injected into every hook by [`ResourceActor::run`](crate::ResourceActor::run), which
/// lets dependencies (clocks, other clients) be bound after construction.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity (e.g., Uuid newtype, case-folded e-mail).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum of resource-specific operations (e.g., `Increment`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context injected into every hook. Use `()` if nothing is needed.
    type Context: Send + Sync;

    /// One error enum per entity kind.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The entity's own id. Used to rebuild the store from a snapshot.
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from the id and payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Returns true for actions that never change the entity.
    /// The actor skips the snapshot save after those.
    fn is_read_only(_action: &Self::Action) -> bool {
        false
    }

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
