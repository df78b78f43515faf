//! # Account Actor
//!
//! Registered shop owners, one [`ResourceActor`] keyed by [`AccountId`].
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Account`]
//! - [`error`] - [`AccountError`]
//! - [`new()`] - Factory function that creates the actor and its typed client

pub mod entity;
pub mod error;

pub use entity::AccountAction;
pub use error::*;

use crate::clients::AccountClient;
use crate::model::{Account, AccountCreate, AccountId};
use resource_actor::ResourceActor;

/// Creates a new Account actor and its client. The id is the case-folded e-mail.
pub fn new(buffer_size: usize) -> (ResourceActor<Account>, AccountClient) {
    let (actor, generic_client) =
        ResourceActor::<Account>::new(buffer_size, |params: &AccountCreate| {
            AccountId::from_email(&params.email)
        });
    (actor, AccountClient::new(generic_client))
}
