//! ActorEntity trait implementation for the Account domain type.
//!
//! Accounts are keyed by their case-folded e-mail, so the actor's duplicate-id
//! check is what rejects a second signup for the same address.

use super::error::AccountError;
use crate::model::{Account, AccountCreate, AccountId, AccountUpdate, PasswordDigest};
use async_trait::async_trait;
use resource_actor::ActorEntity;
use std::fmt;

/// Custom actions for Account entities.
#[derive(Clone)]
pub enum AccountAction {
    /// Checks a plain-text password against the stored digest. Read-only.
    VerifyPassword(String),
}

impl fmt::Debug for AccountAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountAction::VerifyPassword(_) => f.write_str("VerifyPassword(..)"),
        }
    }
}

fn required(field: &'static str, value: &str) -> Result<String, AccountError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AccountError::MissingField(field));
    }
    Ok(value.to_string())
}

#[async_trait]
impl ActorEntity for Account {
    type Id = AccountId;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Action = AccountAction;
    type ActionResult = bool;
    type Context = ();
    type Error = AccountError;

    fn id(&self) -> &AccountId {
        &self.id
    }

    fn from_create_params(id: AccountId, params: AccountCreate) -> Result<Self, AccountError> {
        if params.password.is_empty() {
            return Err(AccountError::MissingField("password"));
        }
        Ok(Self {
            id,
            owner_name: required("ownerName", &params.owner_name)?,
            shop_name: required("shopName", &params.shop_name)?,
            shop_address: required("shopAddress", &params.shop_address)?,
            shop_category: required("shopCategory", &params.shop_category)?,
            email: required("email", &params.email)?,
            password: PasswordDigest::new(&params.password),
        })
    }

    /// Handles profile edits.
    ///
    /// # Fields Updated
    /// - `owner_name`, `shop_name`, `shop_address`, `shop_category`: must stay non-blank
    /// - `password`: re-hashed with a fresh salt
    async fn on_update(&mut self, update: AccountUpdate, _ctx: &()) -> Result<(), AccountError> {
        let owner_name = update.owner_name.map(|v| required("ownerName", &v)).transpose()?;
        let shop_name = update.shop_name.map(|v| required("shopName", &v)).transpose()?;
        let shop_address = update
            .shop_address
            .map(|v| required("shopAddress", &v))
            .transpose()?;
        let shop_category = update
            .shop_category
            .map(|v| required("shopCategory", &v))
            .transpose()?;
        if update.password.as_deref() == Some("") {
            return Err(AccountError::MissingField("password"));
        }

        if let Some(v) = owner_name {
            self.owner_name = v;
        }
        if let Some(v) = shop_name {
            self.shop_name = v;
        }
        if let Some(v) = shop_address {
            self.shop_address = v;
        }
        if let Some(v) = shop_category {
            self.shop_category = v;
        }
        if let Some(password) = update.password {
            self.password = PasswordDigest::new(&password);
        }
        Ok(())
    }

    fn is_read_only(action: &AccountAction) -> bool {
        matches!(action, AccountAction::VerifyPassword(_))
    }

    async fn handle_action(&mut self, action: AccountAction, _ctx: &()) -> Result<bool, AccountError> {
        match action {
            AccountAction::VerifyPassword(password) => Ok(self.password.verify(&password)),
        }
    }
}
