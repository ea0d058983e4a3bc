//! Paste records, expiry arithmetic, and API payloads.

use crate::constants::MILLIS_PER_DAY;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored paste.
///
/// Serialized field names match the persisted document layout
/// (`id`, `code`, `url`, `expiry_time`, `created_at`). Records are never
/// mutated after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteRecord {
    /// Opaque record identifier, distinct from the short code.
    #[serde(rename = "id")]
    pub record_id: String,
    #[serde(rename = "code")]
    pub content: String,
    /// Unique lookup key handed out to clients.
    #[serde(rename = "url")]
    pub short_code: String,
    #[serde(rename = "expiry_time")]
    pub expiry_days: u32,
    pub created_at: DateTime<Utc>,
}

/// Read-time lifecycle state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteState {
    /// `now` is at or before the expiry instant.
    Readable,
    /// `now` is past the expiry instant. Terminal.
    Expired,
}

/// Paste content waiting for a short code.
#[derive(Debug, Clone)]
pub struct PasteDraft {
    pub content: String,
    pub expiry_days: u32,
    pub created_at: DateTime<Utc>,
}

impl PasteDraft {
    /// Stamp the draft with a short code and a fresh record id.
    pub fn assign(self, short_code: String) -> PasteRecord {
        PasteRecord {
            record_id: Uuid::new_v4().to_string(),
            content: self.content,
            short_code,
            expiry_days: self.expiry_days,
            created_at: self.created_at,
        }
    }
}

impl PasteRecord {
    /// Instant after which reads are denied.
    ///
    /// Saturates at the maximum representable time instead of overflowing.
    pub fn expires_at(&self) -> DateTime<Utc> {
        let ttl = Duration::milliseconds(i64::from(self.expiry_days) * MILLIS_PER_DAY);
        self.created_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Lifecycle state as observed at `now`.
    pub fn state_at(&self, now: DateTime<Utc>) -> PasteState {
        if now > self.expires_at() {
            PasteState::Expired
        } else {
            PasteState::Readable
        }
    }

    /// Whether reads at `now` must be denied.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.state_at(now) == PasteState::Expired
    }
}

/// Request payload for `POST /set`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePasteRequest {
    pub code: String,
}

/// Response payload for a successful `POST /set`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePasteResponse {
    pub message: String,
    pub url: String,
}

/// Response payload for a successful `GET /:url`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PasteResponse {
    pub code: String,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
