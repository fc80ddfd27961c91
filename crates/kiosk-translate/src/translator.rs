//! Chunked, failure-absorbing translation.

use std::{collections::BTreeMap, time::Duration};

use futures::future::join_all;
use kiosk_core::language::LanguageSet;
use tracing::{debug, warn};

use crate::{
  Error, MyMemory, TranslatorConfig,
  backend::TranslationBackend,
  chunk,
};

/// Drives a [`TranslationBackend`] over chunked text.
///
/// No method here returns an error: every per-chunk failure is logged and
/// replaced by the chunk's original text.
pub struct Translator<B = MyMemory> {
  backend:       B,
  languages:     LanguageSet,
  max_chunk_len: usize,
  chunk_timeout: Duration,
}

impl<B: TranslationBackend> Translator<B> {
  pub fn new(backend: B, languages: LanguageSet, config: &TranslatorConfig) -> Self {
    Self {
      backend,
      languages,
      max_chunk_len: config.max_chunk_len.max(1),
      chunk_timeout: config.timeout(),
    }
  }

  /// Override the per-chunk deadline.
  pub fn with_chunk_timeout(mut self, timeout: Duration) -> Self {
    self.chunk_timeout = timeout;
    self
  }

  pub fn languages(&self) -> &LanguageSet { &self.languages }

  /// Translate one chunk. `Err` carries the original chunk, ready to be
  /// substituted.
  pub async fn translate_chunk(
    &self,
    chunk: &str,
    source: &str,
    target: &str,
  ) -> Result<String, String> {
    let call = self.backend.translate(chunk, source, target);
    let outcome = match tokio::time::timeout(self.chunk_timeout, call).await {
      Ok(result) => result,
      Err(_) => Err(Error::Timeout(self.chunk_timeout)),
    };

    outcome.map_err(|e| {
      warn!(
        source,
        target,
        chars = chunk.chars().count(),
        error = %e,
        "translation failed; keeping source text for chunk"
      );
      chunk.to_owned()
    })
  }

  /// Translate `text` from `source` into `target`.
  ///
  /// Returns `text` unchanged when the languages match or the text is empty.
  /// Chunks are translated in order and reassembled with the chunker's
  /// separator.
  pub async fn translate(&self, text: &str, target: &str, source: &str) -> String {
    if target == source || text.is_empty() {
      return text.to_owned();
    }

    let chunks = chunk::split(text, self.max_chunk_len);
    debug!(source, target, chunks = chunks.len(), "translating");

    let mut translated = Vec::with_capacity(chunks.len());
    for c in chunks {
      if c.trim().is_empty() {
        translated.push(c.to_owned());
        continue;
      }
      let piece = self
        .translate_chunk(c, source, target)
        .await
        .unwrap_or_else(|original| original);
      translated.push(piece);
    }
    chunk::join(&translated)
  }

  /// Translate `text` into every configured target concurrently.
  ///
  /// The result always contains `text` itself under `source`, and one entry
  /// per target language.
  pub async fn translate_to_all(&self, text: &str, source: &str) -> BTreeMap<String, String> {
    let targets: Vec<&str> = self
      .languages
      .effective_targets()
      .into_iter()
      .filter(|t| *t != source)
      .collect();

    let results = join_all(
      targets
        .iter()
        .map(|target| self.translate(text, target, source)),
    )
    .await;

    let mut out: BTreeMap<String, String> = targets
      .into_iter()
      .map(str::to_owned)
      .zip(results)
      .collect();
    out.insert(source.to_owned(), text.to_owned());
    out
  }
}
