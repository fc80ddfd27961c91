//! HTTP service for the campus kiosk backend.
//!
//! Wires the identity and content services over a [`KioskStore`] into an
//! axum [`Router`](axum::Router). Sessions are HS256 tokens carried in an
//! HTTP-only cookie or an `Authorization: Bearer` header.

pub mod content;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod identity;
pub mod password;
pub mod router;
pub mod session;

pub use error::{Error, Result};
pub use router::router;

use std::{path::PathBuf, sync::Arc, time::Duration};

use kiosk_core::{
  language::LanguageSet,
  store::{AnnouncementStore, CredentialStore},
};
use kiosk_translate::{MyMemory, Translator, TranslatorConfig};
use serde::Deserialize;

use content::ContentService;
use identity::IdentityService;
use session::SessionIssuer;

/// Everything the server needs from persistence.
pub trait KioskStore: CredentialStore + AnnouncementStore + 'static {}

impl<T> KioskStore for T where T: CredentialStore + AnnouncementStore + 'static {}

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `KIOSK__*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  pub session:    SessionConfig,
  #[serde(default)]
  pub languages:  LanguageSet,
  #[serde(default)]
  pub translator: TranslatorConfig,
}

#[derive(Deserialize, Clone)]
pub struct SessionConfig {
  /// HMAC key for session tokens.
  pub secret:        String,
  #[serde(default = "default_ttl_secs")]
  pub ttl_secs:      u64,
  #[serde(default = "default_cookie_name")]
  pub cookie_name:   String,
  /// Mark the cookie `Secure`; enable behind TLS.
  #[serde(default)]
  pub cookie_secure: bool,
}

impl SessionConfig {
  pub fn new(secret: impl Into<String>) -> Self {
    Self {
      secret:        secret.into(),
      ttl_secs:      default_ttl_secs(),
      cookie_name:   default_cookie_name(),
      cookie_secure: false,
    }
  }
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("kiosk.db") }

fn default_ttl_secs() -> u64 { 3600 }

fn default_cookie_name() -> String { "token".to_owned() }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub identities: Arc<IdentityService<S>>,
  pub content:    Arc<ContentService<S>>,
  pub sessions:   Arc<SessionIssuer>,
  pub config:     Arc<ServerConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      identities: self.identities.clone(),
      content:    self.content.clone(),
      sessions:   self.sessions.clone(),
      config:     self.config.clone(),
    }
  }
}

impl<S: KioskStore> AppState<S> {
  /// Build the services over `store`, translating through MyMemory.
  pub fn new(store: Arc<S>, config: ServerConfig) -> kiosk_translate::Result<Self> {
    let sessions = Arc::new(SessionIssuer::new(
      config.session.secret.as_bytes(),
      Duration::from_secs(config.session.ttl_secs),
    ));
    let backend = MyMemory::new(&config.translator)?;
    let translator = Translator::new(backend, config.languages.clone(), &config.translator);

    Ok(Self {
      identities: Arc::new(IdentityService::new(store.clone(), sessions.clone())),
      content:    Arc::new(ContentService::new(store, translator)),
      sessions,
      config:     Arc::new(config),
    })
  }
}
