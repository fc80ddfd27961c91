//! Error taxonomy for the kiosk services and its axum `IntoResponse`
//! implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Missing, malformed, tampered, or expired session token.
  #[error("unauthenticated")]
  Unauthenticated,

  /// Valid session, but the role or a hierarchy rule forbids the operation.
  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("internal error: {0}")]
  Internal(String),
}

impl Error {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Error::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::Unauthenticated | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
      Error::Forbidden(_) => StatusCode::FORBIDDEN,
      Error::Conflict(_) => StatusCode::CONFLICT,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
      Error::Store(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
      tracing::error!(error = %self, "request failed");
      "internal server error".to_owned()
    } else {
      self.to_string()
    };

    (status, Json(json!({ "error": message }))).into_response()
  }
}
