//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (UTC, microsecond
//! precision) so that lexical order matches chronological order. UUIDs are
//! stored as hyphenated lowercase strings. Roles use their snake_case form.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use kiosk_core::{
  announcement::{Announcement, LocalizedText},
  identity::{Identity, StoredIdentity},
  role::Role,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

/// The current time at the precision [`encode_dt`] keeps, so values handed
/// back to callers equal what a later read returns.
pub fn stored_now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Role ─────────────────────────────────────────────────────────────────────

pub fn encode_role(role: Role) -> &'static str {
  match role {
    Role::User => "user",
    Role::Admin => "admin",
    Role::RootAdmin => "root_admin",
  }
}

pub fn decode_role(s: &str) -> Result<Role> { Ok(Role::parse(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `identities` row.
pub struct RawIdentity {
  pub identifier:  String,
  pub name:        String,
  pub email:       String,
  pub secret_hash: String,
  pub role:        String,
  pub created_at:  String,
  pub updated_at:  String,
}

/// Column list matching [`RawIdentity::from_row`].
pub const IDENTITY_COLUMNS: &str =
  "identifier, name, email, secret_hash, role, created_at, updated_at";

impl RawIdentity {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      identifier:  row.get(0)?,
      name:        row.get(1)?,
      email:       row.get(2)?,
      secret_hash: row.get(3)?,
      role:        row.get(4)?,
      created_at:  row.get(5)?,
      updated_at:  row.get(6)?,
    })
  }

  pub fn into_stored(self) -> Result<StoredIdentity> {
    Ok(StoredIdentity {
      identity:    Identity {
        identifier: self.identifier,
        name:       self.name,
        email:      self.email,
        role:       decode_role(&self.role)?,
        created_at: decode_dt(&self.created_at)?,
        updated_at: decode_dt(&self.updated_at)?,
      },
      secret_hash: self.secret_hash,
    })
  }

  pub fn into_identity(self) -> Result<Identity> {
    self.into_stored().map(|s| s.identity)
  }
}

/// Raw strings read from an `announcements` row plus its translation rows.
pub struct RawAnnouncement {
  pub announcement_id: String,
  pub source_language: String,
  pub created_at:      String,
  pub updated_at:      String,
  /// `(language, subject, body)` triples.
  pub translations:    Vec<(String, String, String)>,
}

impl RawAnnouncement {
  pub fn into_announcement(self) -> Result<Announcement> {
    let translations: BTreeMap<String, LocalizedText> = self
      .translations
      .into_iter()
      .map(|(language, subject, body)| (language, LocalizedText { subject, body }))
      .collect();

    if !translations.contains_key(&self.source_language) {
      return Err(kiosk_core::Error::MissingSourceLanguage(self.source_language).into());
    }

    Ok(Announcement {
      announcement_id: decode_uuid(&self.announcement_id)?,
      source_language: self.source_language,
      translations,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
