//! # Accounts and Session
//!
//! [`AuthService`] sits on top of the [`AccountClient`] and keeps the logged-in
//! account under the `current_user` key, so a session survives between CLI runs.
//!
//! Password recovery is simulated: any registered e-mail can be recovered with the
//! fixed code [`RECOVERY_CODE`].

use crate::account_actor::AccountError;
use crate::clients::AccountClient;
use crate::model::{Account, AccountCreate, AccountId, AccountUpdate};
use crate::storage::{keys, KvStore, StorageError};
use resource_actor::ActorClient;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// The verification code every recovery accepts.
pub const RECOVERY_CODE: &str = "1234";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown e-mail and wrong password give the same error.
    #[error("Invalid e-mail or password")]
    InvalidCredentials,

    #[error("Invalid verification code")]
    InvalidRecoveryCode,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Clone)]
pub struct AuthService {
    accounts: AccountClient,
    store: KvStore,
}

impl AuthService {
    pub fn new(accounts: AccountClient, store: KvStore) -> Self {
        Self { accounts, store }
    }

    /// Registers a new account and logs it in.
    ///
    /// # Errors
    /// `AlreadyExists` when the e-mail (ignoring case) is taken, `MissingField` for
    /// a blank field.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn signup(&self, form: AccountCreate) -> Result<Account, AuthError> {
        let id = self.accounts.create_account(form).await?;
        let account = self
            .accounts
            .get(id.clone())
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;
        self.start_session(&account)?;
        info!(account = %account.id, "Signed up");
        Ok(account)
    }

    /// E-mail matches ignoring case; the password must match exactly.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let account = self.find(email).await?;
        if !self
            .accounts
            .verify_password(account.id.clone(), password)
            .await?
        {
            warn!(account = %account.id, "Wrong password");
            return Err(AuthError::InvalidCredentials);
        }
        self.start_session(&account)?;
        info!(account = %account.id, "Logged in");
        Ok(account)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove_item(keys::SESSION)?;
        info!("Logged out");
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<Account>, AuthError> {
        Ok(self.store.get_item(keys::SESSION)?)
    }

    pub fn require_user(&self) -> Result<Account, AuthError> {
        self.current_user()?.ok_or(AuthError::NotLoggedIn)
    }

    /// Edits the logged-in account and refreshes the stored session with the result.
    ///
    /// # Errors
    /// `NotLoggedIn` without a session, `MissingField` for a blank field.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: AccountUpdate) -> Result<Account, AuthError> {
        let current = self.require_user()?;
        let account = self.accounts.update_account(current.id, update).await?;
        self.start_session(&account)?;
        info!(account = %account.id, "Profile updated");
        Ok(account)
    }

    /// Every registered account, in signup order.
    pub async fn accounts(&self) -> Result<Vec<Account>, AuthError> {
        Ok(self.accounts.list().await?)
    }

    /// First recovery step: the e-mail must belong to an account.
    #[instrument(skip(self))]
    pub async fn request_recovery(&self, email: &str) -> Result<(), AuthError> {
        let account = self.find(email).await?;
        info!(account = %account.id, "Recovery code issued");
        Ok(())
    }

    /// Second recovery step: a correct code logs the account in.
    #[instrument(skip(self, code))]
    pub async fn complete_recovery(&self, email: &str, code: &str) -> Result<Account, AuthError> {
        if code.trim() != RECOVERY_CODE {
            warn!("Wrong recovery code");
            return Err(AuthError::InvalidRecoveryCode);
        }
        let account = self.find(email).await?;
        self.start_session(&account)?;
        info!(account = %account.id, "Recovered");
        Ok(account)
    }

    async fn find(&self, email: &str) -> Result<Account, AuthError> {
        self.accounts
            .get(AccountId::from_email(email))
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    fn start_session(&self, account: &Account) -> Result<(), AuthError> {
        self.store.set_item(keys::SESSION, account)?;
        Ok(())
    }
}
