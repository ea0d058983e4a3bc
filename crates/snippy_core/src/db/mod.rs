//! Database layer for Snippy.

/// Paste table accessor.
pub mod paste;
/// redb table definitions.
pub mod tables;

use crate::constants::REDB_FILE_NAME;
use crate::error::AppError;
use crate::models::paste::PasteRecord;
use std::path::Path;
use std::sync::Arc;

pub use paste::PasteDb;

#[cfg(test)]
mod tests;

/// Persistence seam used by the allocator and the paste store.
///
/// Implementations must make [`PasteStorage::insert_unique`] atomic: two
/// concurrent inserts of the same short code can never both return `true`.
pub trait PasteStorage: Send + Sync {
    /// Insert `record` unless its short code is already taken.
    ///
    /// # Returns
    /// `Ok(true)` when the record was committed, `Ok(false)` on a short-code
    /// collision (nothing is written).
    ///
    /// # Errors
    /// Returns [`AppError::Storage`] for any other persistence failure.
    fn insert_unique(&self, record: &PasteRecord) -> Result<bool, AppError>;

    /// Fetch a record by short code.
    ///
    /// # Returns
    /// `Ok(None)` when no record was ever stored under `short_code`.
    ///
    /// # Errors
    /// Returns [`AppError::Storage`] when access or decoding fails.
    fn fetch(&self, short_code: &str) -> Result<Option<PasteRecord>, AppError>;
}

/// Database handle with access to the underlying redb tables.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub pastes: PasteDb,
}

impl Database {
    /// Open (or create) the database inside the `path` directory.
    ///
    /// # Returns
    /// A fully initialized [`Database`].
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the file is held
    /// by another process, or tables cannot be initialized.
    pub fn new(path: &str) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::storage(format!(
                "Failed to create database directory '{}': {}",
                dir.display(),
                err
            ))
        })?;

        let file = dir.join(REDB_FILE_NAME);
        let db = match redb::Database::create(&file) {
            Ok(db) => Arc::new(db),
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                return Err(AppError::storage(format!(
                    "Database '{}' is already open in another process.\n\
                    Stop the other Snippy instance, or set DB_PATH to a different location.",
                    file.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };

        Self::from_shared(db)
    }

    /// Build a database handle from an already opened redb instance.
    ///
    /// # Errors
    /// Returns an error if the paste table cannot be initialized.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            pastes: PasteDb::new(db.clone())?,
            db,
        })
    }
}
