//! Announcement authoring and locale-aware reads.

use std::{collections::BTreeMap, sync::Arc};

use kiosk_core::{
  announcement::{Announcement, LocalizedAnnouncement, LocalizedText, NewAnnouncement},
  language::LanguageSet,
  role::Role,
  store::AnnouncementStore,
};
use kiosk_translate::{MyMemory, TranslationBackend, Translator};
use tracing::info;
use uuid::Uuid;

use crate::{Error, Result, guard};

pub struct ContentService<S, B = MyMemory> {
  store:      Arc<S>,
  translator: Translator<B>,
}

impl<S: AnnouncementStore, B: TranslationBackend> ContentService<S, B> {
  pub fn new(store: Arc<S>, translator: Translator<B>) -> Self {
    Self { store, translator }
  }

  pub fn languages(&self) -> &LanguageSet { self.translator.languages() }

  /// Translate `subject` and `body` into every configured language and
  /// persist the record. Translation failures degrade to the source text.
  pub async fn create_announcement(&self, subject: &str, body: &str) -> Result<Announcement> {
    if subject.trim().is_empty() || body.trim().is_empty() {
      return Err(Error::InvalidInput("subject and body are required".into()));
    }

    let source = self.languages().source.as_str();
    let (subjects, mut bodies) = tokio::join!(
      self.translator.translate_to_all(subject, source),
      self.translator.translate_to_all(body, source),
    );

    let translations: BTreeMap<String, LocalizedText> = subjects
      .into_iter()
      .map(|(language, translated_subject)| {
        let translated_body = bodies.remove(&language).unwrap_or_else(|| body.to_owned());
        (language, LocalizedText { subject: translated_subject, body: translated_body })
      })
      .collect();

    let input = NewAnnouncement::new(source, translations)
      .map_err(|e| Error::Internal(e.to_string()))?;
    let announcement = self
      .store
      .insert_announcement(input)
      .await
      .map_err(Error::store)?;

    info!(
      id = %announcement.announcement_id,
      languages = announcement.translations.len(),
      "created announcement"
    );
    Ok(announcement)
  }

  /// Every announcement, newest first, flattened to `locale`.
  pub async fn list_announcements(
    &self,
    locale: Option<&str>,
  ) -> Result<Vec<LocalizedAnnouncement>> {
    let locale = self.languages().resolve(locale);
    let all = self.store.list_announcements().await.map_err(Error::store)?;
    Ok(all.iter().map(|a| a.localize(locale)).collect())
  }

  /// One announcement flattened to `locale`; unsupported locales get the
  /// source text.
  pub async fn get_announcement(
    &self,
    id:     Uuid,
    locale: Option<&str>,
  ) -> Result<LocalizedAnnouncement> {
    let record = self.get_announcement_record(id).await?;
    Ok(record.localize(self.languages().resolve(locale)))
  }

  /// The full multilingual record.
  pub async fn get_announcement_record(&self, id: Uuid) -> Result<Announcement> {
    self
      .store
      .get_announcement(id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::NotFound(format!("announcement {id}")))
  }

  pub async fn delete_announcement(&self, requester: Role, id: Uuid) -> Result<()> {
    guard::require(requester, Role::Admin)?;
    if !self.store.delete_announcement(id).await.map_err(Error::store)? {
      return Err(Error::NotFound(format!("announcement {id}")));
    }
    info!(%id, deleted_by = %requester, "deleted announcement");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use kiosk_store_sqlite::SqliteStore;
  use kiosk_translate::TranslatorConfig;

  use super::*;

  /// Prefixes text with the target language.
  struct Prefixing;

  impl TranslationBackend for Prefixing {
    async fn translate(
      &self,
      text:   &str,
      _:      &str,
      target: &str,
    ) -> kiosk_translate::Result<String> {
      Ok(format!("[{target}] {text}"))
    }
  }

  struct Unreachable;

  impl TranslationBackend for Unreachable {
    async fn translate(&self, _: &str, _: &str, _: &str) -> kiosk_translate::Result<String> {
      Err(kiosk_translate::Error::Malformed("connection refused".into()))
    }
  }

  async fn service<B: TranslationBackend>(backend: B) -> ContentService<SqliteStore, B> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let translator = Translator::new(backend, LanguageSet::default(), &TranslatorConfig::default());
    ContentService::new(Arc::new(store), translator)
  }

  #[tokio::test]
  async fn create_stores_source_exactly_and_translations() {
    let svc = service(Prefixing).await;
    let created = svc
      .create_announcement("Exam Notice", "Exams start Monday.")
      .await
      .unwrap();

    assert_eq!(created.source_language, "en");
    let en = created.source().unwrap();
    assert_eq!(en.subject, "Exam Notice");
    assert_eq!(en.body, "Exams start Monday.");
    assert_eq!(created.translations["hi"].subject, "[hi] Exam Notice");
    assert_eq!(created.translations["pa"].body, "[pa] Exams start Monday.");

    let stored = svc.get_announcement_record(created.announcement_id).await.unwrap();
    assert_eq!(stored, created);
  }

  #[tokio::test]
  async fn translator_outage_copies_source_everywhere() {
    let svc = service(Unreachable).await;
    let created = svc
      .create_announcement("Exam Notice", "Exams start Monday.")
      .await
      .unwrap();

    assert_eq!(created.translations.len(), 3);
    for text in created.translations.values() {
      assert_eq!(text.subject, "Exam Notice");
      assert_eq!(text.body, "Exams start Monday.");
    }
  }

  #[tokio::test]
  async fn blank_fields_are_rejected() {
    let svc = service(Prefixing).await;
    assert!(matches!(svc.create_announcement(" ", "body").await, Err(Error::InvalidInput(_))));
    assert!(matches!(svc.create_announcement("subject", "").await, Err(Error::InvalidInput(_))));
  }

  #[tokio::test]
  async fn reads_select_locale_with_source_fallback() {
    let svc = service(Prefixing).await;
    let created = svc.create_announcement("Library hours", "Open till 9.").await.unwrap();
    let id = created.announcement_id;

    let hi = svc.get_announcement(id, Some("hi")).await.unwrap();
    assert_eq!(hi.language, "hi");
    assert_eq!(hi.subject, "[hi] Library hours");

    let unknown = svc.get_announcement(id, Some("zz")).await.unwrap();
    assert_eq!(unknown.language, "en");
    assert_eq!(unknown.subject, "Library hours");

    let default = svc.get_announcement(id, None).await.unwrap();
    assert_eq!(default.body, "Open till 9.");
  }

  #[tokio::test]
  async fn list_is_newest_first_and_localized() {
    let svc = service(Prefixing).await;
    svc.create_announcement("first", "1").await.unwrap();
    svc.create_announcement("second", "2").await.unwrap();

    let list = svc.list_announcements(Some("pa")).await.unwrap();
    let subjects: Vec<_> = list.iter().map(|a| a.subject.as_str()).collect();
    assert_eq!(subjects, ["[pa] second", "[pa] first"]);
  }

  #[tokio::test]
  async fn missing_announcement_is_not_found() {
    let svc = service(Prefixing).await;
    let err = svc.get_announcement(Uuid::new_v4(), Some("en")).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
  }

  #[tokio::test]
  async fn delete_requires_admin_and_is_not_repeatable() {
    let svc = service(Prefixing).await;
    let id = svc.create_announcement("gone", "soon").await.unwrap().announcement_id;

    assert!(matches!(svc.delete_announcement(Role::User, id).await, Err(Error::Forbidden(_))));

    svc.delete_announcement(Role::Admin, id).await.unwrap();
    assert!(matches!(svc.delete_announcement(Role::Admin, id).await, Err(Error::NotFound(_))));
    assert!(matches!(svc.get_announcement(id, None).await, Err(Error::NotFound(_))));
  }
}
