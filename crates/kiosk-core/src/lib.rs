//! Core types and trait definitions for the campus kiosk backend.
//!
//! No HTTP or database code lives here; every other crate in the workspace
//! depends on this one.

pub mod announcement;
pub mod error;
pub mod identity;
pub mod language;
pub mod role;
pub mod store;

pub use error::{Error, Result};
