//! Handlers for `/content` endpoints.
//!
//! | Method   | Path            | Notes |
//! |----------|-----------------|-------|
//! | `POST`   | `/content`      | Admin tier; body `{"subject","body"}`; returns every language |
//! | `GET`    | `/content`      | Optional `?lang=xx`; newest first |
//! | `GET`    | `/content/{id}` | Optional `?lang=xx`; 404 if not found |
//! | `DELETE` | `/content/{id}` | Admin tier |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use kiosk_core::announcement::LocalizedAnnouncement;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, Error, KioskStore, guard::AdminSession};

#[derive(Debug, Default, Deserialize)]
pub struct LocaleParams {
  pub lang: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub subject: String,
  pub body:    String,
}

/// `POST /content`
pub async fn create<S: KioskStore>(
  State(state): State<AppState<S>>,
  _session: AdminSession,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, Error> {
  let announcement = state
    .content
    .create_announcement(&body.subject, &body.body)
    .await?;
  Ok((StatusCode::CREATED, Json(announcement)))
}

/// `GET /content[?lang=xx]`
pub async fn list<S: KioskStore>(
  State(state): State<AppState<S>>,
  Query(params): Query<LocaleParams>,
) -> Result<Json<Vec<LocalizedAnnouncement>>, Error> {
  let items = state
    .content
    .list_announcements(params.lang.as_deref())
    .await?;
  Ok(Json(items))
}

/// `GET /content/{id}[?lang=xx]`
pub async fn get_one<S: KioskStore>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<LocaleParams>,
) -> Result<Json<LocalizedAnnouncement>, Error> {
  let item = state
    .content
    .get_announcement(id, params.lang.as_deref())
    .await?;
  Ok(Json(item))
}

/// `DELETE /content/{id}`
pub async fn delete_one<S: KioskStore>(
  State(state): State<AppState<S>>,
  session: AdminSession,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
  state.content.delete_announcement(session.claims.role, id).await?;
  Ok(StatusCode::NO_CONTENT)
}
