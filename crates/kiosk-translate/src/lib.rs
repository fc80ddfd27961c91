//! Best-effort text translation for kiosk content.
//!
//! Text is split into paragraph-aligned chunks small enough for the external
//! backend, each chunk is translated independently, and any chunk that fails
//! is replaced by its original text. Callers of [`Translator`] never see a
//! translation error.

pub mod backend;
pub mod chunk;
pub mod config;
pub mod error;
pub mod translator;

pub use backend::{MyMemory, TranslationBackend};
pub use config::TranslatorConfig;
pub use error::{Error, Result};
pub use translator::Translator;
