//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_EXPIRY_DAYS, DEFAULT_MAX_ALLOCATION_ATTEMPTS, DEFAULT_MAX_PASTE_SIZE, DEFAULT_PORT,
};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for Snippy.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding the redb file.
    pub db_path: String,
    pub port: u16,
    /// Base URL that generated short codes are appended to.
    pub public_url: String,
    pub max_paste_size: usize,
    /// Expiry policy stamped onto new pastes.
    pub expiry_days: u32,
    /// Insert attempts per create before reporting a conflict.
    pub max_allocation_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            port: DEFAULT_PORT,
            public_url: default_public_url(DEFAULT_PORT),
            max_paste_size: DEFAULT_MAX_PASTE_SIZE,
            expiry_days: DEFAULT_EXPIRY_DAYS,
            max_allocation_attempts: DEFAULT_MAX_ALLOCATION_ATTEMPTS,
        }
    }
}

fn default_public_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}

fn default_db_path() -> String {
    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".cache")
        .join("snippy")
        .join("db")
        .to_string_lossy()
        .to_string()
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    for key in ["HOME", "USERPROFILE"] {
        if let Ok(home) = env::var(key) {
            if !home.trim().is_empty() {
                return Some(PathBuf::from(home));
            }
        }
    }
    std::env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn parse_var<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|raw| raw.trim().parse().ok())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to their defaults. `PUBLIC_URL` defaults to
    /// `http://localhost:<PORT>` and loses any trailing slash.
    /// `MAX_ALLOCATION_ATTEMPTS` is clamped to at least one attempt.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_var(lookup("PORT")).unwrap_or(DEFAULT_PORT);
        let public_url = lookup("PUBLIC_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default_public_url(port));

        Self {
            db_path: lookup("DB_PATH")
                .filter(|value| !value.trim().is_empty())
                .map(expand_tilde)
                .unwrap_or_else(default_db_path),
            port,
            public_url,
            max_paste_size: parse_var(lookup("MAX_PASTE_SIZE")).unwrap_or(DEFAULT_MAX_PASTE_SIZE),
            expiry_days: parse_var(lookup("EXPIRY_DAYS")).unwrap_or(DEFAULT_EXPIRY_DAYS),
            max_allocation_attempts: parse_var(lookup("MAX_ALLOCATION_ATTEMPTS"))
                .unwrap_or(DEFAULT_MAX_ALLOCATION_ATTEMPTS)
                .max(1),
        }
    }
}
