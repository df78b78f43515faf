//! # Generic Messages
//!
//! The request enum exchanged between [`ResourceClient`](crate::ResourceClient) and
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map onto CRUD (plus `List`) and a custom `Action` variant for
/// resource-specific logic:
///
/// - **Create**: uses [`ActorEntity::Create`] to initialize a new resource.
/// - **Get**: fetches the current state of one resource by id.
/// - **List**: fetches every resource in insertion order.
/// - **Update**: uses [`ActorEntity::Update`] to modify an existing resource.
/// - **Delete**: removes the resource.
/// - **Action**: executes a custom [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
