//! Core domain library for Snippy (config, short-code allocation, storage).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// redb storage layer.
pub mod db;
/// Application error types (storage/domain).
pub mod error;
/// Persisted records and API payloads.
pub mod models;
/// Short-code generation and collision-resolving allocation.
pub mod shortcode;
/// Paste store with expiry enforcement.
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::*;
pub use db::{Database, PasteStorage};
pub use error::{AppError, StorageError};
pub use shortcode::{CodeGenerator, RandomCodeGenerator, ShortCodeAllocator};
pub use store::PasteStore;
