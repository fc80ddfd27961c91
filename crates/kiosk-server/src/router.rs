//! Route table.

use axum::{
  Router,
  routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
  AppState, KioskStore,
  handlers::{content, identity, session},
};

/// Build the axum [`Router`] for the kiosk API.
pub fn router<S: KioskStore>(state: AppState<S>) -> Router {
  Router::new()
    .route("/health", get(health))
    // Identities
    .route("/identity/bootstrap-root", post(identity::bootstrap_root::<S>))
    .route("/identity", get(identity::list::<S>).post(identity::create::<S>))
    .route("/identity/{id}", delete(identity::delete_one::<S>))
    // Sessions
    .route("/session", post(session::login::<S>))
    .route("/session/logout", get(session::logout::<S>))
    .route("/session/me", get(session::me::<S>).patch(session::update_me::<S>))
    // Content
    .route("/content", get(content::list::<S>).post(content::create::<S>))
    .route("/content/{id}", get(content::get_one::<S>).delete(content::delete_one::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn health() -> &'static str { "ok" }

// ─── Integration tests ────────────────────────────────────────────────────────
