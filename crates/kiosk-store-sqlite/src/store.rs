//! [`SqliteStore`], the SQLite implementation of [`CredentialStore`] and
//! [`AnnouncementStore`].

use std::{collections::HashMap, path::Path};

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use kiosk_core::{
  announcement::{Announcement, NewAnnouncement},
  identity::{Identity, NewIdentity, ProfileUpdate, StoredIdentity},
  store::{AnnouncementStore, CredentialStore, InsertOutcome},
};

use crate::{
  Error, Result,
  encode::{
    IDENTITY_COLUMNS, RawAnnouncement, RawIdentity, encode_dt, encode_role,
    encode_uuid, stored_now,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A kiosk store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// What the insert closure observed; resolved to [`InsertOutcome`] outside.
enum RawInsert {
  Inserted,
  IdentifierTaken,
  RootAdminExists,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_identity(&self, identifier: String) -> Result<Option<RawIdentity>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {IDENTITY_COLUMNS} FROM identities WHERE identifier = ?1"),
            rusqlite::params![identifier],
            RawIdentity::from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(raw)
  }
}

// ─── CredentialStore impl ────────────────────────────────────────────────────

impl CredentialStore for SqliteStore {
  type Error = Error;

  async fn insert_identity(&self, input: NewIdentity) -> Result<InsertOutcome> {
    let now = stored_now();
    let identity = Identity {
      identifier: input.identifier,
      name:       input.name,
      email:      input.email,
      role:       input.role,
      created_at: now,
      updated_at: now,
    };

    let identifier = identity.identifier.clone();
    let name       = identity.name.clone();
    let email      = identity.email.clone();
    let role_str   = encode_role(identity.role).to_owned();
    let at_str     = encode_dt(now);
    let hash       = input.secret_hash;

    let raw = self
      .conn
      .call(move |conn| {
        let result = conn.execute(
          "INSERT INTO identities (
             identifier, name, email, secret_hash, role, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
          rusqlite::params![identifier, name, email, hash, role_str, at_str],
        );

        match result {
          Ok(_) => Ok(RawInsert::Inserted),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
          {
            // Either the primary key or the single-root index fired.
            let taken = conn
              .query_row(
                "SELECT 1 FROM identities WHERE identifier = ?1",
                rusqlite::params![identifier],
                |_| Ok(true),
              )
              .optional()?
              .unwrap_or(false);
            Ok(if taken { RawInsert::IdentifierTaken } else { RawInsert::RootAdminExists })
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    Ok(match raw {
      RawInsert::Inserted => InsertOutcome::Inserted(identity),
      RawInsert::IdentifierTaken => InsertOutcome::IdentifierTaken,
      RawInsert::RootAdminExists => InsertOutcome::RootAdminExists,
    })
  }

  async fn get_identity(&self, identifier: &str) -> Result<Option<StoredIdentity>> {
    self
      .fetch_identity(identifier.to_owned())
      .await?
      .map(RawIdentity::into_stored)
      .transpose()
  }

  async fn has_root_admin(&self) -> Result<bool> {
    let exists = self
      .conn
      .call(|conn| {
        Ok(conn
          .query_row(
            "SELECT 1 FROM identities WHERE role = 'root_admin'",
            [],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false))
      })
      .await?;
    Ok(exists)
  }

  async fn list_identities(&self) -> Result<Vec<Identity>> {
    let raws: Vec<RawIdentity> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {IDENTITY_COLUMNS} FROM identities ORDER BY created_at, rowid"
        ))?;
        let rows = stmt
          .query_map([], RawIdentity::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawIdentity::into_identity).collect()
  }

  async fn update_profile(
    &self,
    identifier: &str,
    update:     ProfileUpdate,
  ) -> Result<Option<Identity>> {
    let id_str = identifier.to_owned();
    let at_str = encode_dt(stored_now());

    let raw: Option<RawIdentity> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE identities
           SET name       = COALESCE(?2, name),
               email      = COALESCE(?3, email),
               updated_at = ?4
           WHERE identifier = ?1",
          rusqlite::params![id_str, update.name, update.email, at_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(conn
          .query_row(
            &format!("SELECT {IDENTITY_COLUMNS} FROM identities WHERE identifier = ?1"),
            rusqlite::params![id_str],
            RawIdentity::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawIdentity::into_identity).transpose()
  }

  async fn delete_identity(&self, identifier: &str) -> Result<bool> {
    let id_str = identifier.to_owned();
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM identities WHERE identifier = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;
    Ok(removed > 0)
  }
}

// ─── AnnouncementStore impl ──────────────────────────────────────────────────

impl AnnouncementStore for SqliteStore {
  type Error = Error;

  async fn insert_announcement(&self, input: NewAnnouncement) -> Result<Announcement> {
    let (source_language, translations) = input.into_parts();
    let now = stored_now();
    let announcement = Announcement {
      announcement_id: Uuid::new_v4(),
      source_language,
      translations,
      created_at: now,
      updated_at: now,
    };

    let id_str   = encode_uuid(announcement.announcement_id);
    let source   = announcement.source_language.clone();
    let at_str   = encode_dt(now);
    let variants: Vec<(String, String, String)> = announcement
      .translations
      .iter()
      .map(|(lang, t)| (lang.clone(), t.subject.clone(), t.body.clone()))
      .collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO announcements (announcement_id, source_language, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?3)",
          rusqlite::params![id_str, source, at_str],
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO announcement_translations (announcement_id, language, subject, body)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for (language, subject, body) in &variants {
            stmt.execute(rusqlite::params![id_str, language, subject, body])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(announcement)
  }

  async fn get_announcement(&self, id: Uuid) -> Result<Option<Announcement>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAnnouncement> = self
      .conn
      .call(move |conn| {
        let head = conn
          .query_row(
            "SELECT announcement_id, source_language, created_at, updated_at
             FROM announcements WHERE announcement_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawAnnouncement {
                announcement_id: row.get(0)?,
                source_language: row.get(1)?,
                created_at:      row.get(2)?,
                updated_at:      row.get(3)?,
                translations:    Vec::new(),
              })
            },
          )
          .optional()?;

        let Some(mut head) = head else { return Ok(None) };

        let mut stmt = conn.prepare(
          "SELECT language, subject, body FROM announcement_translations
           WHERE announcement_id = ?1",
        )?;
        head.translations = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(head))
      })
      .await?;

    raw.map(RawAnnouncement::into_announcement).transpose()
  }

  async fn list_announcements(&self) -> Result<Vec<Announcement>> {
    let raws: Vec<RawAnnouncement> = self
      .conn
      .call(|conn| {
        let mut heads: Vec<RawAnnouncement> = conn
          .prepare(
            "SELECT announcement_id, source_language, created_at, updated_at
             FROM announcements ORDER BY created_at DESC, rowid DESC",
          )?
          .query_map([], |row| {
            Ok(RawAnnouncement {
              announcement_id: row.get(0)?,
              source_language: row.get(1)?,
              created_at:      row.get(2)?,
              updated_at:      row.get(3)?,
              translations:    Vec::new(),
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let index: HashMap<String, usize> = heads
          .iter()
          .enumerate()
          .map(|(i, h)| (h.announcement_id.clone(), i))
          .collect();

        let mut stmt = conn.prepare(
          "SELECT announcement_id, language, subject, body FROM announcement_translations",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok((
              row.get::<_, String>(0)?,
              row.get::<_, String>(1)?,
              row.get::<_, String>(2)?,
              row.get::<_, String>(3)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        for (id, language, subject, body) in rows {
          if let Some(&i) = index.get(&id) {
            heads[i].translations.push((language, subject, body));
          }
        }

        Ok(heads)
      })
      .await?;

    raws.into_iter().map(RawAnnouncement::into_announcement).collect()
  }

  async fn delete_announcement(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM announcement_translations WHERE announcement_id = ?1",
          rusqlite::params![id_str],
        )?;
        let removed = tx.execute(
          "DELETE FROM announcements WHERE announcement_id = ?1",
          rusqlite::params![id_str],
        )?;
        tx.commit()?;
        Ok(removed)
      })
      .await?;
    Ok(removed > 0)
  }
}
