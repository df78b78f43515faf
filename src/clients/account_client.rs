//! # Account Client
//!
//! High-level API for the `Account` actor.
use crate::account_actor::{AccountAction, AccountError};
use crate::model::{Account, AccountCreate, AccountId, AccountUpdate};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Account actor.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Account>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Account> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &ResourceClient<Account> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => AccountError::NotFound(id),
            FrameworkError::AlreadyExists(id) => AccountError::AlreadyExists(id),
            FrameworkError::Persistence(msg) => AccountError::Persistence(msg),
            FrameworkError::EntityError(inner) => match inner.downcast::<AccountError>() {
                Ok(account_error) => *account_error,
                Err(other) => AccountError::ActorCommunicationError(other.to_string()),
            },
            other => AccountError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl AccountClient {
    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn create_account(&self, params: AccountCreate) -> Result<AccountId, AccountError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, update))]
    pub async fn update_account(
        &self,
        id: AccountId,
        update: AccountUpdate,
    ) -> Result<Account, AccountError> {
        debug!(?update, "Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// True when `password` matches the stored digest exactly.
    #[instrument(skip(self, password))]
    pub async fn verify_password(&self, id: AccountId, password: &str) -> Result<bool, AccountError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, AccountAction::VerifyPassword(password.to_string()))
            .await
            .map_err(Self::map_error)
    }
}
