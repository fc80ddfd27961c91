//! Handlers for `/identity` endpoints.
//!
//! | Method   | Path                       | Notes |
//! |----------|----------------------------|-------|
//! | `POST`   | `/identity/bootstrap-root` | Unauthenticated; 409 once a root exists |
//! | `POST`   | `/identity`                | Admin tier; body adds `role` |
//! | `GET`    | `/identity`                | Admin tier |
//! | `DELETE` | `/identity/{id}`           | Admin tier; admins need the root |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use kiosk_core::{identity::Identity, role::Role};
use serde::Deserialize;

use crate::{AppState, Error, KioskStore, guard::AdminSession, identity::Registration};

// ─── Bootstrap ───────────────────────────────────────────────────────────────

/// `POST /identity/bootstrap-root`
pub async fn bootstrap_root<S: KioskStore>(
  State(state): State<AppState<S>>,
  Json(body): Json<Registration>,
) -> Result<impl IntoResponse, Error> {
  let identity = state.identities.bootstrap_root(body).await?;
  Ok((StatusCode::CREATED, Json(identity)))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  #[serde(flatten)]
  pub registration: Registration,
  pub role:         Role,
}

/// `POST /identity`
pub async fn create<S: KioskStore>(
  State(state): State<AppState<S>>,
  session: AdminSession,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, Error> {
  let identity = state
    .identities
    .create_identity(session.claims.role, body.registration, body.role)
    .await?;
  Ok((StatusCode::CREATED, Json(identity)))
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /identity`
pub async fn list<S: KioskStore>(
  State(state): State<AppState<S>>,
  session: AdminSession,
) -> Result<Json<Vec<Identity>>, Error> {
  let identities = state.identities.list_identities(session.claims.role).await?;
  Ok(Json(identities))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /identity/{id}`
pub async fn delete_one<S: KioskStore>(
  State(state): State<AppState<S>>,
  session: AdminSession,
  Path(id): Path<String>,
) -> Result<StatusCode, Error> {
  state.identities.delete_identity(session.claims.role, &id).await?;
  Ok(StatusCode::NO_CONTENT)
}
