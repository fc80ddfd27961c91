//! Identity lifecycle: root bootstrap, hierarchical creation, sign-in,
//! listing, deletion, and self-service profile edits.

use std::sync::Arc;

use kiosk_core::{
  identity::{Identity, NewIdentity, ProfileUpdate},
  role::Role,
  store::{CredentialStore, InsertOutcome},
};
use serde::Deserialize;
use tracing::info;

use crate::{
  Error, Result, guard,
  password::{hash_secret, verify_secret},
  session::SessionIssuer,
};

/// Caller-supplied fields for a new identity.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
  pub identifier: String,
  pub name:       String,
  pub email:      String,
  pub secret:     String,
}

impl Registration {
  fn validate(&self) -> Result<()> {
    for (field, value) in [
      ("identifier", &self.identifier),
      ("name", &self.name),
      ("email", &self.email),
      ("secret", &self.secret),
    ] {
      if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{field} must not be blank")));
      }
    }
    Ok(())
  }
}

/// A successful sign-in.
#[derive(Debug, Clone)]
pub struct SignedIn {
  pub token:    String,
  pub identity: Identity,
}

pub struct IdentityService<S> {
  store:    Arc<S>,
  sessions: Arc<SessionIssuer>,
}

impl<S: CredentialStore> IdentityService<S> {
  pub fn new(store: Arc<S>, sessions: Arc<SessionIssuer>) -> Self {
    Self { store, sessions }
  }

  /// Create the single root identity. `Conflict` once one exists.
  pub async fn bootstrap_root(&self, registration: Registration) -> Result<Identity> {
    registration.validate()?;
    if self.store.has_root_admin().await.map_err(Error::store)? {
      return Err(Error::Conflict("a root admin already exists".into()));
    }

    let identity = self.insert(registration, Role::RootAdmin).await?;
    info!(identifier = %identity.identifier, "bootstrapped root admin");
    Ok(identity)
  }

  /// Create an `admin` or `user` on behalf of `requester`.
  pub async fn create_identity(
    &self,
    requester:    Role,
    registration: Registration,
    requested:    Role,
  ) -> Result<Identity> {
    if !requester.can_create(requested) {
      return Err(Error::Forbidden(format!("{requester} may not create {requested}")));
    }
    registration.validate()?;

    let identity = self.insert(registration, requested).await?;
    info!(
      identifier = %identity.identifier,
      role = %identity.role,
      created_by = %requester,
      "created identity"
    );
    Ok(identity)
  }

  /// Check credentials and issue a session token carrying the stored role.
  pub async fn authenticate(&self, identifier: &str, secret: &str) -> Result<SignedIn> {
    if identifier.trim().is_empty() || secret.is_empty() {
      return Err(Error::InvalidInput("identifier and secret are required".into()));
    }

    let stored = self
      .store
      .get_identity(identifier)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::NotFound(format!("identity {identifier}")))?;

    if !verify_secret(secret, &stored.secret_hash) {
      info!(identifier, "sign-in rejected");
      return Err(Error::InvalidCredentials);
    }

    let token = self.sessions.issue(identifier, stored.identity.role)?;
    info!(identifier, role = %stored.identity.role, "signed in");
    Ok(SignedIn { token, identity: stored.identity })
  }

  /// Every identity, oldest first, without secrets.
  pub async fn list_identities(&self, requester: Role) -> Result<Vec<Identity>> {
    guard::require(requester, Role::Admin)?;
    self.store.list_identities().await.map_err(Error::store)
  }

  /// Permanently remove `target`. Identities at admin tier or above can only
  /// be removed by the root.
  pub async fn delete_identity(&self, requester: Role, target: &str) -> Result<()> {
    guard::require(requester, Role::Admin)?;

    let stored = self
      .store
      .get_identity(target)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::NotFound(format!("identity {target}")))?;

    let target_role = stored.identity.role;
    if !requester.can_delete(target_role) {
      return Err(Error::Forbidden(format!("{requester} may not delete {target_role}")));
    }

    if !self.store.delete_identity(target).await.map_err(Error::store)? {
      return Err(Error::NotFound(format!("identity {target}")));
    }
    info!(identifier = target, role = %target_role, deleted_by = %requester, "deleted identity");
    Ok(())
  }

  /// Change the caller's own name and/or email.
  pub async fn update_profile(&self, requester: &str, update: ProfileUpdate) -> Result<Identity> {
    if update.is_empty() {
      return Err(Error::InvalidInput("nothing to update".into()));
    }
    for (field, value) in [("name", &update.name), ("email", &update.email)] {
      if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        return Err(Error::InvalidInput(format!("{field} must not be blank")));
      }
    }

    let identity = self
      .store
      .update_profile(requester, update)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::NotFound(format!("identity {requester}")))?;
    info!(identifier = requester, "updated profile");
    Ok(identity)
  }

  /// The caller's stored profile.
  pub async fn current_identity(&self, identifier: &str) -> Result<Identity> {
    self
      .store
      .get_identity(identifier)
      .await
      .map_err(Error::store)?
      .map(|stored| stored.identity)
      .ok_or_else(|| Error::NotFound(format!("identity {identifier}")))
  }

  async fn insert(&self, registration: Registration, role: Role) -> Result<Identity> {
    let secret_hash = hash_secret(&registration.secret)?;
    let outcome = self
      .store
      .insert_identity(NewIdentity {
        identifier: registration.identifier.clone(),
        name: registration.name,
        email: registration.email,
        secret_hash,
        role,
      })
      .await
      .map_err(Error::store)?;

    match outcome {
      InsertOutcome::Inserted(identity) => Ok(identity),
      InsertOutcome::IdentifierTaken => Err(Error::Conflict(format!(
        "identifier {} is already taken",
        registration.identifier
      ))),
      InsertOutcome::RootAdminExists => {
        Err(Error::Conflict("a root admin already exists".into()))
      }
    }
  }
}
