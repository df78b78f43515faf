use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{self, Display};
use uuid::Uuid;

/// Identifier for an account: its e-mail address, case-folded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn from_email(email: &str) -> Self {
        Self(email.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Salted SHA-256 digest of a password, stored as `salt$hexdigest`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn new(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        Self::with_salt(&salt, password)
    }

    fn with_salt(salt: &str, password: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        Self(format!("{salt}${}", hex::encode(hasher.finalize())))
    }

    pub fn verify(&self, password: &str) -> bool {
        match self.0.split_once('$') {
            Some((salt, _)) => Self::with_salt(salt, password) == *self,
            None => false,
        }
    }
}

// Never print the digest.
impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// A registered shop owner.
///
/// # Resource Actor
/// Managed by a [`ResourceActor`](resource_actor::ResourceActor) keyed by [`AccountId`];
/// see [`crate::account_actor`] for the entity implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub owner_name: String,
    pub shop_name: String,
    pub shop_address: String,
    pub shop_category: String,
    pub email: String,
    pub password: PasswordDigest,
}

/// Signup form. Every field is required.
#[derive(Clone)]
pub struct AccountCreate {
    pub owner_name: String,
    pub shop_name: String,
    pub shop_address: String,
    pub shop_category: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for AccountCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCreate")
            .field("owner_name", &self.owner_name)
            .field("shop_name", &self.shop_name)
            .field("shop_address", &self.shop_address)
            .field("shop_category", &self.shop_category)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Profile edits. The e-mail is the identity and cannot change.
#[derive(Clone, Default)]
pub struct AccountUpdate {
    pub owner_name: Option<String>,
    pub shop_name: Option<String>,
    pub shop_address: Option<String>,
    pub shop_category: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for AccountUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountUpdate")
            .field("owner_name", &self.owner_name)
            .field("shop_name", &self.shop_name)
            .field("shop_address", &self.shop_address)
            .field("shop_category", &self.shop_category)
            .field("password_changed", &self.password.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_is_case_folded() {
        assert_eq!(
            AccountId::from_email("  Asha@Example.COM "),
            AccountId::from_email("asha@example.com")
        );
    }

    #[test]
    fn test_password_digest_verifies_only_the_original() {
        let digest = PasswordDigest::new("chai-time");
        assert!(digest.verify("chai-time"));
        assert!(!digest.verify("Chai-time"));
        assert!(!digest.verify(""));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        assert_ne!(PasswordDigest::new("same"), PasswordDigest::new("same"));
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let form = AccountCreate {
            owner_name: "Asha".into(),
            shop_name: "Asha General Store".into(),
            shop_address: "12 MG Road".into(),
            shop_category: "grocery".into(),
            email: "asha@example.com".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{form:?}").contains("hunter2"));
        assert!(!format!("{:?}", PasswordDigest::new("hunter2")).contains('$'));
    }
}
