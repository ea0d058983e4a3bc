//! Shared test-only helpers for snippy_core.

use crate::db::PasteStorage;
use crate::models::paste::PasteRecord;
use crate::shortcode::CodeGenerator;
use crate::{AppError, Database};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

/// Creates an isolated temporary database and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing files.
pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = Database::new(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

/// Hands out queued codes first, then unique `z000001`-style fallbacks.
pub(crate) struct ScriptedGenerator {
    queue: Mutex<VecDeque<String>>,
    fallback: AtomicU32,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub(crate) fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: Mutex::new(codes.into_iter().map(Into::into).collect()),
            fallback: AtomicU32::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CodeGenerator for ScriptedGenerator {
    fn generate(&self) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(code) = self.queue.lock().expect("generator queue").pop_front() {
            return code;
        }
        let n = self.fallback.fetch_add(1, Ordering::SeqCst) + 1;
        format!("z{:06}", n)
    }
}

/// Storage whose every call fails like an unreachable backend.
pub(crate) struct FailingStorage;

impl PasteStorage for FailingStorage {
    fn insert_unique(&self, _record: &PasteRecord) -> Result<bool, AppError> {
        Err(AppError::storage("connection refused"))
    }

    fn fetch(&self, _short_code: &str) -> Result<Option<PasteRecord>, AppError> {
        Err(AppError::storage("connection refused"))
    }
}

/// Storage that reports every insert as a collision and records nothing.
#[derive(Default)]
pub(crate) struct SaturatedStorage {
    pub(crate) inserts: AtomicUsize,
}

impl PasteStorage for SaturatedStorage {
    fn insert_unique(&self, _record: &PasteRecord) -> Result<bool, AppError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }

    fn fetch(&self, _short_code: &str) -> Result<Option<PasteRecord>, AppError> {
        Ok(None)
    }
}
