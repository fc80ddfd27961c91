//! Error types for `kiosk-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown role: {0:?}")]
  UnknownRole(String),

  #[error("announcement is missing its source language {0:?}")]
  MissingSourceLanguage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
