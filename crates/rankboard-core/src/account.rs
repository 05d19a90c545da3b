//! Store account types.
//!
//! A [`StoreAccount`] is a registered seller: the record behind the
//! dashboard, the admin table, and each leaderboard row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::StoreId;

/// An opaque tracking API key issued to a store at registration.
///
/// The key is a bearer token embedded in the store's tracking snippet;
/// the data layer treats it as an uninterpreted string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap an already-generated key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generate a fresh opaque key: `rk_` followed by 24 random hex
    /// characters.
    #[must_use]
    pub fn generate() -> Self {
        let bytes: [u8; 12] = rand::Rng::gen(&mut rand::thread_rng());
        Self(format!("rk_{}", hex::encode(bytes)))
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A registered seller account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreAccount {
    /// Unique store identifier.
    pub id: StoreId,

    /// Display name. May be empty; the data layer does not validate it.
    pub name: String,

    /// Contact email. Uniqueness is enforced by the registration caller
    /// at creation time, not here, and not on update.
    pub email: String,

    /// Storefront URL. May be empty.
    pub url: String,

    /// Login credential, stored as provided.
    pub secret: String,

    /// Tracking API key issued at registration.
    pub api_key: ApiKey,

    /// When the store registered.
    pub created_at: DateTime<Utc>,
}

impl StoreAccount {
    /// Apply a partial update, leaving absent fields untouched.
    pub fn apply(&mut self, patch: &StorePatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(email) = &patch.email {
            self.email.clone_from(email);
        }
        if let Some(url) = &patch.url {
            self.url.clone_from(url);
        }
    }
}

/// Registration input: the fields a store provides when signing up.
///
/// Identifier, API key, and creation timestamp are assigned by the data
/// layer, not the registrant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStore {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Storefront URL.
    pub url: String,
    /// Login credential.
    pub secret: String,
}

/// A partial update to a store record, as edited from the admin table.
///
/// `None` fields are left as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorePatch {
    /// New display name, if changed.
    pub name: Option<String>,
    /// New contact email, if changed.
    pub email: Option<String>,
    /// New storefront URL, if changed.
    pub url: Option<String>,
}
