//! HTTP request handlers.

/// Paste create/fetch endpoints.
pub mod paste;
