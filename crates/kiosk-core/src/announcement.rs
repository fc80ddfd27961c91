//! Localized content records.
//!
//! An announcement is stored once with every language variant already
//! populated. Readers select a single locale on the way out; nothing is
//! translated at read time.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// One language variant of an announcement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
  pub subject: String,
  pub body:    String,
}

/// A persisted multilingual announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
  pub announcement_id: Uuid,
  /// The language the author wrote in. Its entry in `translations` is
  /// authoritative and exactly what was submitted.
  pub source_language: String,
  /// Language code → variant. Always contains `source_language`.
  pub translations:    BTreeMap<String, LocalizedText>,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

/// An announcement flattened to a single language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedAnnouncement {
  pub announcement_id: Uuid,
  /// The language actually served, which may differ from the one requested.
  pub language:        String,
  pub subject:         String,
  pub body:            String,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

impl Announcement {
  /// The author's original text.
  pub fn source(&self) -> Option<&LocalizedText> {
    self.translations.get(&self.source_language)
  }

  /// Select `locale`, falling back to the source language when the record
  /// holds no variant for it.
  pub fn localize(&self, locale: &str) -> LocalizedAnnouncement {
    let (language, text) = self
      .translations
      .get_key_value(locale)
      .or_else(|| self.translations.get_key_value(&self.source_language))
      .map(|(code, text)| (code.clone(), text.clone()))
      .unwrap_or_else(|| (self.source_language.clone(), LocalizedText::default()));

    LocalizedAnnouncement {
      announcement_id: self.announcement_id,
      language,
      subject: text.subject,
      body: text.body,
      created_at: self.created_at,
      updated_at: self.updated_at,
    }
  }
}

/// Input to [`crate::store::AnnouncementStore::insert_announcement`].
/// The id and timestamps are always set by the store.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
  source_language: String,
  translations:    BTreeMap<String, LocalizedText>,
}

impl NewAnnouncement {
  /// Fails if `translations` has no entry for `source_language`.
  pub fn new(
    source_language: impl Into<String>,
    translations: BTreeMap<String, LocalizedText>,
  ) -> Result<Self> {
    let source_language = source_language.into();
    if !translations.contains_key(&source_language) {
      return Err(Error::MissingSourceLanguage(source_language));
    }
    Ok(Self { source_language, translations })
  }

  pub fn into_parts(self) -> (String, BTreeMap<String, LocalizedText>) {
    (self.source_language, self.translations)
  }
}
