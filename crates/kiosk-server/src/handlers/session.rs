//! Handlers for `/session` endpoints: sign-in, sign-out, and the caller's
//! own profile.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use kiosk_core::identity::{Identity, ProfileUpdate};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, KioskStore, guard::Authenticated};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub identifier: String,
  pub secret:     String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub identity:   Identity,
  /// Token lifetime in seconds.
  pub expires_in: u64,
}

/// `POST /session`: sets the session cookie.
pub async fn login<S: KioskStore>(
  State(state): State<AppState<S>>,
  jar: CookieJar,
  Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, Error> {
  let signed_in = state
    .identities
    .authenticate(&body.identifier, &body.secret)
    .await?;

  let session = &state.config.session;
  let cookie = Cookie::build((session.cookie_name.clone(), signed_in.token))
    .path("/")
    .http_only(true)
    .secure(session.cookie_secure)
    .same_site(SameSite::Lax)
    .build();

  let response = LoginResponse {
    identity:   signed_in.identity,
    expires_in: state.sessions.ttl().as_secs(),
  };
  Ok((jar.add(cookie), Json(response)))
}

/// `GET /session/logout`: clears the session cookie.
///
/// Tokens are not tracked server-side; one copied elsewhere stays valid until
/// it expires.
pub async fn logout<S: KioskStore>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  jar: CookieJar,
) -> impl IntoResponse {
  tracing::info!(identifier = %claims.sub, "signed out");
  let name = state.config.session.cookie_name.clone();
  (jar.remove(Cookie::build((name, "")).path("/")), StatusCode::NO_CONTENT)
}

/// `GET /session/me`
pub async fn me<S: KioskStore>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
) -> Result<Json<Identity>, Error> {
  Ok(Json(state.identities.current_identity(&claims.sub).await?))
}

/// `PATCH /session/me`, body `{"name"?: .., "email"?: ..}`
pub async fn update_me<S: KioskStore>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Json(update): Json<ProfileUpdate>,
) -> Result<Json<Identity>, Error> {
  Ok(Json(state.identities.update_profile(&claims.sub, update).await?))
}
