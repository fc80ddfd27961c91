//! Identity records.
//!
//! [`Identity`] is the public shape and carries no secret material. The
//! stored hash only travels inside [`StoredIdentity`], which is deliberately
//! not `Serialize` so it can never end up in a response body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// An identity as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  /// Operator-chosen, unique across all identities.
  pub identifier: String,
  pub name:       String,
  pub email:      String,
  /// Fixed at creation; no promotion or demotion exists.
  pub role:       Role,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// An identity together with its secret hash, as held by the credential
/// store.
#[derive(Debug, Clone)]
pub struct StoredIdentity {
  pub identity:    Identity,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub secret_hash: String,
}

/// Input to [`crate::store::CredentialStore::insert_identity`].
/// Timestamps are always set by the store.
#[derive(Debug, Clone)]
pub struct NewIdentity {
  pub identifier:  String,
  pub name:        String,
  pub email:       String,
  pub secret_hash: String,
  pub role:        Role,
}

/// The mutable subset of an identity. Role and identifier are not part of
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
  pub name:  Option<String>,
  pub email: Option<String>,
}

impl ProfileUpdate {
  pub fn is_empty(&self) -> bool { self.name.is_none() && self.email.is_none() }
}
