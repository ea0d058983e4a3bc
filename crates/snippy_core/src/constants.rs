//! Shared constants used across Snippy crates.

/// Default API port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default maximum request body accepted by the API layer.
pub const DEFAULT_MAX_PASTE_SIZE: usize = 10 * 1024 * 1024;

/// Number of days a new paste stays readable.
pub const DEFAULT_EXPIRY_DAYS: u32 = 10;

/// Milliseconds in one expiry day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Length of every generated short code.
pub const SHORT_CODE_LEN: usize = 7;

/// Symbols short codes are drawn from (62 total).
pub const SHORT_CODE_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Insert attempts before the allocator gives up with a conflict.
pub const DEFAULT_MAX_ALLOCATION_ATTEMPTS: u32 = 5;

/// Default base URL for CLI/API clients.
pub const DEFAULT_CLI_SERVER_URL: &str = "http://localhost:5000";

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "snippy.redb";
