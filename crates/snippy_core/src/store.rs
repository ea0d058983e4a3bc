//! Paste store: creation through the allocator and expiry-aware reads.

use crate::config::Config;
use crate::constants::DEFAULT_EXPIRY_DAYS;
use crate::db::PasteStorage;
use crate::error::AppError;
use crate::models::paste::{PasteDraft, PasteRecord, PasteState};
use crate::shortcode::ShortCodeAllocator;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Create/read service over an injected storage handle.
///
/// Holds no mutable state of its own; clones share the same storage.
#[derive(Clone)]
pub struct PasteStore {
    storage: Arc<dyn PasteStorage>,
    allocator: ShortCodeAllocator,
    expiry_days: u32,
}

impl PasteStore {
    /// Store with the default random allocator and expiry policy.
    pub fn new(storage: Arc<dyn PasteStorage>) -> Self {
        Self {
            storage,
            allocator: ShortCodeAllocator::default(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
        }
    }

    /// Store configured from runtime settings.
    pub fn from_config(storage: Arc<dyn PasteStorage>, config: &Config) -> Self {
        Self::new(storage)
            .with_allocator(ShortCodeAllocator::random(config.max_allocation_attempts))
            .with_expiry_days(config.expiry_days)
    }

    pub fn with_allocator(mut self, allocator: ShortCodeAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    pub fn with_expiry_days(mut self, expiry_days: u32) -> Self {
        self.expiry_days = expiry_days;
        self
    }

    pub fn expiry_days(&self) -> u32 {
        self.expiry_days
    }

    /// Store `content` under a fresh short code.
    ///
    /// # Errors
    /// [`AppError::Conflict`] when allocation attempts run out, otherwise
    /// [`AppError::Storage`].
    pub fn create(&self, content: String) -> Result<PasteRecord, AppError> {
        self.create_at(content, Utc::now())
    }

    /// Same as [`PasteStore::create`] with an explicit creation time.
    pub fn create_at(&self, content: String, now: DateTime<Utc>) -> Result<PasteRecord, AppError> {
        let draft = PasteDraft {
            content,
            expiry_days: self.expiry_days,
            created_at: now,
        };
        let record = self.allocator.allocate(self.storage.as_ref(), draft)?;
        tracing::debug!(short_code = %record.short_code, "Stored paste");
        Ok(record)
    }

    /// Content stored under `short_code`, if it has not expired.
    ///
    /// # Errors
    /// - [`AppError::NotFound`] when the code was never issued.
    /// - [`AppError::Expired`] when it was issued but its expiry has passed.
    /// - [`AppError::Storage`] when the lookup fails.
    pub fn get(&self, short_code: &str) -> Result<String, AppError> {
        self.get_at(short_code, Utc::now())
    }

    /// Same as [`PasteStore::get`] evaluated at `now`.
    pub fn get_at(&self, short_code: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        let record = self
            .storage
            .fetch(short_code)?
            .ok_or(AppError::NotFound)?;

        match record.state_at(now) {
            PasteState::Readable => Ok(record.content),
            PasteState::Expired => {
                tracing::debug!(
                    short_code,
                    expired_at = %record.expires_at(),
                    "Denied read of expired paste"
                );
                Err(AppError::Expired)
            }
        }
    }
}
