//! Data models for persistence and the HTTP API.

/// Paste records and request/response payloads.
pub mod paste;
