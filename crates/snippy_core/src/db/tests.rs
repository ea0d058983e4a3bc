//! Database integration tests.

use super::*;
use crate::models::paste::PasteDraft;
use crate::test_support::setup_temp_db;
use chrono::{Duration, Utc};
use std::sync::Barrier;
use std::thread;
use tempfile::TempDir;

fn record(short_code: &str, content: &str) -> PasteRecord {
    PasteDraft {
        content: content.to_string(),
        expiry_days: 10,
        created_at: Utc::now(),
    }
    .assign(short_code.to_string())
}

#[test]
fn database_new_creates_redb_file_in_directory() {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("nested").join("db");

    let db = Database::new(db_path.to_str().expect("path")).expect("open");
    drop(db);

    assert!(db_path.join(REDB_FILE_NAME).exists());
}

#[test]
fn insert_and_get_roundtrip() {
    let (db, _temp) = setup_temp_db();
    let paste = record("abcDEF1", "hello");

    assert!(db.pastes.insert(&paste).expect("insert"));
    let fetched = db.pastes.get("abcDEF1").expect("get").expect("present");
    assert_eq!(fetched, paste);
}

#[test]
fn get_missing_returns_none() {
    let (db, _temp) = setup_temp_db();
    assert!(db.pastes.get("nothere").expect("get").is_none());
}

#[test]
fn duplicate_short_code_is_rejected_without_overwrite() {
    let (db, _temp) = setup_temp_db();
    let original = record("collide", "original");
    let intruder = record("collide", "intruder");

    assert!(db.pastes.insert(&original).expect("first insert"));
    assert!(!db.pastes.insert(&intruder).expect("second insert"));

    let stored = db.pastes.get("collide").expect("get").expect("present");
    assert_eq!(stored.content, "original");
    assert_eq!(stored.record_id, original.record_id);
    assert_eq!(db.pastes.count().expect("count"), 1);
}

#[test]
fn records_survive_reopen() {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let path = db_path.to_str().expect("path");
    let mut paste = record("persist", "durable");
    paste.created_at = Utc::now() - Duration::days(2);

    {
        let db = Database::new(path).expect("open");
        assert!(db.pastes.insert(&paste).expect("insert"));
    }

    let reopened = Database::new(path).expect("reopen");
    let fetched = reopened
        .pastes
        .get("persist")
        .expect("get")
        .expect("present after reopen");
    assert_eq!(fetched, paste);
}

#[test]
fn corrupt_document_maps_to_storage_error() {
    let (db, _temp) = setup_temp_db();
    let write_txn = db.db.begin_write().expect("begin write");
    {
        let mut table = write_txn.open_table(tables::PASTES).expect("open table");
        table.insert("garbled", "{not json").expect("raw insert");
    }
    write_txn.commit().expect("commit");

    let err = db.pastes.get("garbled").expect_err("decode should fail");
    assert!(matches!(
        err,
        AppError::Storage(crate::StorageError::Serialization(_))
    ));
}

#[test]
fn concurrent_inserts_of_same_code_commit_once() {
    let (db, _temp) = setup_temp_db();
    let workers = 6;
    let barrier = Barrier::new(workers);

    let outcomes: Vec<bool> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let pastes = db.pastes.clone();
                let barrier = &barrier;
                scope.spawn(move || {
                    let paste = record("contest", &format!("worker {}", worker));
                    barrier.wait();
                    pastes.insert(&paste).expect("insert")
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("join"))
            .collect()
    });

    assert_eq!(outcomes.iter().filter(|inserted| **inserted).count(), 1);
    assert_eq!(db.pastes.count().expect("count"), 1);
}

#[test]
fn scan_visits_every_record() {
    let (db, _temp) = setup_temp_db();
    for code in ["bbbbbbb", "aaaaaaa", "ccccccc"] {
        assert!(db.pastes.insert(&record(code, code)).expect("insert"));
    }

    let mut seen = Vec::new();
    db.pastes
        .scan(|paste| {
            seen.push(paste.short_code);
            Ok(())
        })
        .expect("scan");

    assert_eq!(seen, vec!["aaaaaaa", "bbbbbbb", "ccccccc"]);
}
