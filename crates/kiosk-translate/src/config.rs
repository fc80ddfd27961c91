//! Translator settings, deserialised from the `[translator]` config table.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.mymemory.translated.net/get";

/// The backend's per-request character limit.
pub const DEFAULT_MAX_CHUNK_LEN: usize = 500;

#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorConfig {
  #[serde(default = "default_base_url")]
  pub base_url:      String,
  /// Sent as the `de` parameter; raises MyMemory's anonymous quota.
  #[serde(default)]
  pub contact_email: Option<String>,
  /// Upper bound on a single chunk request.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs:  u64,
  #[serde(default = "default_max_chunk_len")]
  pub max_chunk_len: usize,
}

impl Default for TranslatorConfig {
  fn default() -> Self {
    Self {
      base_url:      default_base_url(),
      contact_email: None,
      timeout_secs:  default_timeout_secs(),
      max_chunk_len: default_max_chunk_len(),
    }
  }
}

impl TranslatorConfig {
  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs.max(1)) }
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_owned() }

fn default_timeout_secs() -> u64 { 10 }

fn default_max_chunk_len() -> usize { DEFAULT_MAX_CHUNK_LEN }
