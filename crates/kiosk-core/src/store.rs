//! Storage traits for identities and announcements.
//!
//! Both are implemented by storage backends (e.g. `kiosk-store-sqlite`).
//! The services in `kiosk-server` depend on these abstractions, not on any
//! concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  announcement::{Announcement, NewAnnouncement},
  identity::{Identity, NewIdentity, ProfileUpdate, StoredIdentity},
};

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// Result of [`CredentialStore::insert_identity`].
///
/// Uniqueness violations are expected outcomes, not storage failures, so they
/// are reported as values.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
  Inserted(Identity),
  /// Another identity already uses the identifier.
  IdentifierTaken,
  /// The insert would create a second `RootAdmin`.
  RootAdminExists,
}

// ─── Credential store ────────────────────────────────────────────────────────

/// Exclusive owner of identity records.
///
/// Implementations must enforce both uniqueness invariants at write time:
/// identifiers are unique, and at most one identity holds
/// [`Role::RootAdmin`](crate::role::Role::RootAdmin). A service-level
/// existence check alone is not enough under concurrent bootstrap attempts.
pub trait CredentialStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new identity. `created_at`/`updated_at` are set by the store.
  fn insert_identity(
    &self,
    input: NewIdentity,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + '_;

  /// Look up an identity together with its secret hash.
  fn get_identity<'a>(
    &'a self,
    identifier: &'a str,
  ) -> impl Future<Output = Result<Option<StoredIdentity>, Self::Error>> + Send + 'a;

  /// Whether a `RootAdmin` identity currently exists.
  fn has_root_admin(
    &self,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// All identities, oldest first.
  fn list_identities(
    &self,
  ) -> impl Future<Output = Result<Vec<Identity>, Self::Error>> + Send + '_;

  /// Apply a profile update. Returns `None` if the identity does not exist.
  fn update_profile<'a>(
    &'a self,
    identifier: &'a str,
    update: ProfileUpdate,
  ) -> impl Future<Output = Result<Option<Identity>, Self::Error>> + Send + 'a;

  /// Permanently remove an identity. Returns `false` if it did not exist.
  fn delete_identity<'a>(
    &'a self,
    identifier: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}

// ─── Announcement store ──────────────────────────────────────────────────────

/// Exclusive owner of localized content records.
pub trait AnnouncementStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a record and all of its language variants in one write.
  fn insert_announcement(
    &self,
    input: NewAnnouncement,
  ) -> impl Future<Output = Result<Announcement, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get_announcement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Announcement>, Self::Error>> + Send + '_;

  /// All records, newest first.
  fn list_announcements(
    &self,
  ) -> impl Future<Output = Result<Vec<Announcement>, Self::Error>> + Send + '_;

  /// Permanently remove a record. Returns `false` if it did not exist.
  fn delete_announcement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
