//! Paste storage operations backed by redb.

use super::{tables::PASTES, PasteStorage};
use crate::{error::AppError, models::paste::PasteRecord};
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

/// Accessor for the paste table.
#[derive(Clone)]
pub struct PasteDb {
    db: Arc<redb::Database>,
}

impl PasteDb {
    /// Initialize the paste table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(PASTES)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Insert a record keyed by its short code.
    ///
    /// The existence check and the insert share one write transaction. redb
    /// admits a single writer at a time, so a racing insert of the same code
    /// observes the committed row and reports a collision.
    ///
    /// # Returns
    /// `Ok(true)` when committed, `Ok(false)` when the short code is taken.
    ///
    /// # Errors
    /// Returns an error when serialization or storage operations fail.
    pub fn insert(&self, record: &PasteRecord) -> Result<bool, AppError> {
        let encoded = serde_json::to_string(record)?;

        let write_txn = self.db.begin_write()?;
        let inserted = {
            let mut pastes = write_txn.open_table(PASTES)?;
            if pastes.get(record.short_code.as_str())?.is_some() {
                false
            } else {
                pastes.insert(record.short_code.as_str(), encoded.as_str())?;
                true
            }
        };

        if inserted {
            write_txn.commit()?;
        } else {
            write_txn.abort()?;
        }
        Ok(inserted)
    }

    /// Fetch a record by short code.
    ///
    /// # Returns
    /// `Ok(Some(record))` when found, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, short_code: &str) -> Result<Option<PasteRecord>, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        match pastes.get(short_code)? {
            Some(value) => Ok(Some(serde_json::from_str(value.value())?)),
            None => Ok(None),
        }
    }

    /// Number of stored records, expired ones included.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn count(&self) -> Result<usize, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        let mut total = 0;
        for item in pastes.iter()? {
            item?;
            total += 1;
        }
        Ok(total)
    }

    /// Visit every stored record in short-code order.
    ///
    /// # Errors
    /// Returns an error when storage access, deserialization, or `visit` fails.
    pub fn scan<F>(&self, mut visit: F) -> Result<(), AppError>
    where
        F: FnMut(PasteRecord) -> Result<(), AppError>,
    {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        for item in pastes.iter()? {
            let (_, value) = item?;
            visit(serde_json::from_str(value.value())?)?;
        }
        Ok(())
    }
}

impl PasteStorage for PasteDb {
    fn insert_unique(&self, record: &PasteRecord) -> Result<bool, AppError> {
        self.insert(record)
    }

    fn fetch(&self, short_code: &str) -> Result<Option<PasteRecord>, AppError> {
        self.get(short_code)
    }
}
