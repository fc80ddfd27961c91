//! Authorization guard: role comparison, token checks, and the axum
//! extractors that run them before any handler body.

use std::marker::PhantomData;

use axum::{
  extract::FromRequestParts,
  http::{header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use kiosk_core::role::Role;

use crate::{
  AppState, Error, KioskStore, Result,
  session::{SessionClaims, SessionIssuer},
};

/// `Forbidden` unless `role` is at least `minimum`.
pub fn require(role: Role, minimum: Role) -> Result<()> {
  if role.at_least(minimum) {
    Ok(())
  } else {
    Err(Error::Forbidden(format!("requires {minimum} or higher")))
  }
}

/// Verify `token`, then require `minimum`.
///
/// A missing or invalid token is `Unauthenticated`; a valid token with too
/// low a role is `Forbidden`.
pub fn authorize(
  issuer:  &SessionIssuer,
  token:   Option<&str>,
  minimum: Role,
) -> Result<SessionClaims> {
  let token = token.ok_or(Error::Unauthenticated)?;
  let claims = issuer.verify(token)?;
  require(claims.role, minimum)?;
  Ok(claims)
}

/// The session token from `Authorization: Bearer`, else from the session
/// cookie.
pub fn session_token(parts: &Parts, cookie_name: &str) -> Option<String> {
  let bearer = parts
    .headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|t| !t.is_empty());

  if let Some(token) = bearer {
    return Some(token.to_owned());
  }

  CookieJar::from_headers(&parts.headers)
    .get(cookie_name)
    .map(|c| c.value().to_owned())
    .filter(|t| !t.is_empty())
}

fn extract_claims<S: KioskStore>(
  parts:   &Parts,
  state:   &AppState<S>,
  minimum: Role,
) -> Result<SessionClaims> {
  let token = session_token(parts, &state.config.session.cookie_name);
  authorize(&state.sessions, token.as_deref(), minimum)
}

// ─── Extractors ──────────────────────────────────────────────────────────────

/// Any valid session, regardless of role.
pub struct Authenticated(pub SessionClaims);

impl<S: KioskStore> FromRequestParts<AppState<S>> for Authenticated {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    extract_claims(parts, state, Role::User).map(Authenticated)
  }
}

/// A role tier usable with [`Guarded`].
pub trait MinimumRole: Send + Sync + 'static {
  const ROLE: Role;
}

/// `admin` or `root_admin`.
pub struct AdminTier;

impl MinimumRole for AdminTier {
  const ROLE: Role = Role::Admin;
}

/// A valid session whose role is at least `M::ROLE`.
pub struct Guarded<M: MinimumRole> {
  pub claims: SessionClaims,
  _tier:      PhantomData<fn() -> M>,
}

pub type AdminSession = Guarded<AdminTier>;

impl<S: KioskStore, M: MinimumRole> FromRequestParts<AppState<S>> for Guarded<M> {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let claims = extract_claims(parts, state, M::ROLE)?;
    Ok(Guarded { claims, _tier: PhantomData })
  }
}
