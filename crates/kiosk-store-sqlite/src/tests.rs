//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::BTreeMap;

use kiosk_core::{
  announcement::{LocalizedText, NewAnnouncement},
  identity::{NewIdentity, ProfileUpdate},
  role::Role,
  store::{AnnouncementStore, CredentialStore, InsertOutcome},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_identity(identifier: &str, role: Role) -> NewIdentity {
  NewIdentity {
    identifier:  identifier.into(),
    name:        format!("{identifier} name"),
    email:       format!("{identifier}@campus.example"),
    secret_hash: "$argon2id$v=19$m=19456,t=2,p=1$fake$fake".into(),
    role,
  }
}

// ─── Identities ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_identity() {
  let s = store().await;

  let outcome = s.insert_identity(new_identity("alice", Role::Admin)).await.unwrap();
  let InsertOutcome::Inserted(identity) = outcome else {
    panic!("expected insert, got {outcome:?}");
  };
  assert_eq!(identity.identifier, "alice");
  assert_eq!(identity.role, Role::Admin);

  let stored = s.get_identity("alice").await.unwrap().unwrap();
  assert_eq!(stored.identity, identity);
  assert!(stored.secret_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn inserted_identity_matches_later_reads() {
  let s = store().await;
  let InsertOutcome::Inserted(created) =
    s.insert_identity(new_identity("erin", Role::User)).await.unwrap()
  else {
    panic!("expected insert");
  };

  let listed = s.list_identities().await.unwrap();
  assert_eq!(listed, vec![created.clone()]);

  let updated = s
    .update_profile("erin", ProfileUpdate { name: Some("Erin".into()), email: None })
    .await
    .unwrap()
    .unwrap();
  let reread = s.get_identity("erin").await.unwrap().unwrap();
  assert_eq!(reread.identity, updated);
  assert_eq!(reread.identity.created_at, created.created_at);
}

#[tokio::test]
async fn get_identity_missing_returns_none() {
  let s = store().await;
  assert!(s.get_identity("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_identifier_is_reported() {
  let s = store().await;
  s.insert_identity(new_identity("bob", Role::User)).await.unwrap();

  let outcome = s.insert_identity(new_identity("bob", Role::Admin)).await.unwrap();
  assert!(matches!(outcome, InsertOutcome::IdentifierTaken));

  // The original row is untouched.
  let stored = s.get_identity("bob").await.unwrap().unwrap();
  assert_eq!(stored.identity.role, Role::User);
}

#[tokio::test]
async fn second_root_rejected_by_store() {
  let s = store().await;
  assert!(!s.has_root_admin().await.unwrap());

  let first = s.insert_identity(new_identity("root", Role::RootAdmin)).await.unwrap();
  assert!(matches!(first, InsertOutcome::Inserted(_)));
  assert!(s.has_root_admin().await.unwrap());

  let second = s.insert_identity(new_identity("root2", Role::RootAdmin)).await.unwrap();
  assert!(matches!(second, InsertOutcome::RootAdminExists));
  assert!(s.get_identity("root2").await.unwrap().is_none());
}

#[tokio::test]
async fn concurrent_root_inserts_yield_one_root() {
  let s = store().await;

  let attempts = (0..8).map(|i| {
    let s = s.clone();
    tokio::spawn(async move {
      s.insert_identity(new_identity(&format!("root{i}"), Role::RootAdmin))
        .await
        .unwrap()
    })
  });

  let mut inserted = 0;
  for handle in attempts {
    if matches!(handle.await.unwrap(), InsertOutcome::Inserted(_)) {
      inserted += 1;
    }
  }
  assert_eq!(inserted, 1);

  let roots = s
    .list_identities()
    .await
    .unwrap()
    .into_iter()
    .filter(|i| i.role == Role::RootAdmin)
    .count();
  assert_eq!(roots, 1);
}

#[tokio::test]
async fn list_identities_in_creation_order() {
  let s = store().await;
  for id in ["a", "b", "c"] {
    s.insert_identity(new_identity(id, Role::User)).await.unwrap();
  }

  let all = s.list_identities().await.unwrap();
  let ids: Vec<_> = all.iter().map(|i| i.identifier.as_str()).collect();
  assert_eq!(ids, ["a", "b", "c"]);
}

#[tokio::test]
async fn update_profile_changes_only_given_fields() {
  let s = store().await;
  s.insert_identity(new_identity("carol", Role::User)).await.unwrap();

  let updated = s
    .update_profile("carol", ProfileUpdate {
      name:  Some("Carol Danvers".into()),
      email: None,
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.name, "Carol Danvers");
  assert_eq!(updated.email, "carol@campus.example");
  assert_eq!(updated.role, Role::User);
  assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
async fn update_profile_missing_returns_none() {
  let s = store().await;
  let result = s
    .update_profile("ghost", ProfileUpdate { name: Some("x".into()), email: None })
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn delete_identity_is_permanent() {
  let s = store().await;
  s.insert_identity(new_identity("dave", Role::User)).await.unwrap();

  assert!(s.delete_identity("dave").await.unwrap());
  assert!(s.get_identity("dave").await.unwrap().is_none());
  assert!(!s.delete_identity("dave").await.unwrap());
}

#[tokio::test]
async fn deleting_root_frees_the_slot() {
  let s = store().await;
  s.insert_identity(new_identity("root", Role::RootAdmin)).await.unwrap();
  s.delete_identity("root").await.unwrap();

  let again = s.insert_identity(new_identity("root-new", Role::RootAdmin)).await.unwrap();
  assert!(matches!(again, InsertOutcome::Inserted(_)));
}

// ─── Announcements ───────────────────────────────────────────────────────────

fn variants(subject: &str, body: &str) -> BTreeMap<String, LocalizedText> {
  let mut map = BTreeMap::new();
  for lang in ["en", "hi", "pa"] {
    map.insert(lang.to_owned(), LocalizedText {
      subject: format!("{subject} [{lang}]"),
      body:    format!("{body} [{lang}]"),
    });
  }
  map
}

#[tokio::test]
async fn insert_and_get_announcement() {
  let s = store().await;
  let input = NewAnnouncement::new("en", variants("Exam Notice", "Exams start Monday.")).unwrap();

  let created = s.insert_announcement(input).await.unwrap();
  assert_eq!(created.translations.len(), 3);

  let fetched = s.get_announcement(created.announcement_id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fetched.source().unwrap().subject, "Exam Notice [en]");
}

#[tokio::test]
async fn inserted_announcement_matches_listing() {
  let s = store().await;
  let created = s
    .insert_announcement(NewAnnouncement::new("en", variants("Exam Notice", "Monday")).unwrap())
    .await
    .unwrap();

  let listed = s.list_announcements().await.unwrap();
  assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn get_announcement_missing_returns_none() {
  let s = store().await;
  assert!(s.get_announcement(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_announcements_newest_first() {
  let s = store().await;
  let first = s
    .insert_announcement(NewAnnouncement::new("en", variants("one", "1")).unwrap())
    .await
    .unwrap();
  let second = s
    .insert_announcement(NewAnnouncement::new("en", variants("two", "2")).unwrap())
    .await
    .unwrap();

  let all = s.list_announcements().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].announcement_id, second.announcement_id);
  assert_eq!(all[1].announcement_id, first.announcement_id);
  assert!(all.iter().all(|a| a.translations.len() == 3));
}

#[tokio::test]
async fn delete_announcement_removes_all_variants() {
  let s = store().await;
  let created = s
    .insert_announcement(NewAnnouncement::new("en", variants("gone", "soon")).unwrap())
    .await
    .unwrap();

  assert!(s.delete_announcement(created.announcement_id).await.unwrap());
  assert!(s.get_announcement(created.announcement_id).await.unwrap().is_none());
  assert!(s.list_announcements().await.unwrap().is_empty());
  assert!(!s.delete_announcement(created.announcement_id).await.unwrap());
}
