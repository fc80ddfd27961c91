//! axum handlers, one module per resource.
//!
//! Every handler is generic over the store and takes [`crate::AppState`].
//! Authorization happens in the [`crate::guard`] extractors, which run before
//! the body is read.

pub mod content;
pub mod identity;
pub mod session;
