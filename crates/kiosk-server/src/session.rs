//! Signed, time-limited session tokens (HS256 JWTs).
//!
//! The role is copied into the token at issuance, so authorization never
//! consults the store. A deleted identity's token stays valid until `exp`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{
  Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use kiosk_core::role::Role;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Claims carried by every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
  /// Identity identifier.
  pub sub:  String,
  pub role: Role,
  pub iat:  i64,
  pub exp:  i64,
}

/// Issues and verifies session tokens with one shared secret.
pub struct SessionIssuer {
  encoding:   EncodingKey,
  decoding:   DecodingKey,
  validation: Validation,
  ttl:        Duration,
}

impl SessionIssuer {
  pub fn new(secret: &[u8], ttl: Duration) -> Self {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    Self {
      encoding: EncodingKey::from_secret(secret),
      decoding: DecodingKey::from_secret(secret),
      validation,
      ttl,
    }
  }

  pub fn ttl(&self) -> Duration { self.ttl }

  /// Issue a token for `identifier` valid for the configured TTL from now.
  pub fn issue(&self, identifier: &str, role: Role) -> Result<String> {
    self.issue_at(identifier, role, Utc::now())
  }

  /// Issue a token as if the current time were `now`.
  pub fn issue_at(&self, identifier: &str, role: Role, now: DateTime<Utc>) -> Result<String> {
    let iat = now.timestamp();
    let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
    let claims = SessionClaims {
      sub: identifier.to_owned(),
      role,
      iat,
      exp: iat.saturating_add(ttl),
    };

    encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
      .map_err(|e| Error::Internal(format!("failed to sign session token: {e}")))
  }

  /// Verify signature and expiry and return the claims.
  pub fn verify(&self, token: &str) -> Result<SessionClaims> {
    decode::<SessionClaims>(token, &self.decoding, &self.validation)
      .map(|data| data.claims)
      .map_err(|e| {
        tracing::debug!(error = %e, "rejected session token");
        Error::Unauthenticated
      })
  }
}
