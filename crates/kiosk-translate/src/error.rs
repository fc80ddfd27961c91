//! Error type for `kiosk-translate`.
//!
//! These errors describe a degraded upstream. They are produced by a
//! [`TranslationBackend`](crate::TranslationBackend) and absorbed by the
//! [`Translator`](crate::Translator), which logs them and falls back to the
//! source text.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("upstream returned HTTP {0}")]
  Status(reqwest::StatusCode),

  #[error("provider error {status}: {details}")]
  Provider { status: String, details: String },

  #[error("malformed response: {0}")]
  Malformed(String),

  #[error("no response within {0:?}")]
  Timeout(Duration),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
