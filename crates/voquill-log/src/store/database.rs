//! Preference store backed by redb.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};

use super::PreferenceStore;
use crate::error::LogResult;

const PREFERENCES_TABLE: TableDefinition<&str, &str> = TableDefinition::new("preferences");

/// ACID preference store in a single redb file.
///
/// Storage faults never reach callers of [`PreferenceStore`]; they are
/// logged and treated as a missing value or a lost write.
#[derive(Clone)]
pub struct RedbPreferenceStore {
    db: Arc<Database>,
    path: PathBuf,
}

impl RedbPreferenceStore {
    /// Open (or create) the preference database at `path`.
    ///
    /// Creates the parent directory and the preferences table if needed.
    pub fn open(path: impl AsRef<Path>) -> LogResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(PREFERENCES_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            path: path.to_path_buf(),
        })
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_read(&self, key: &str) -> LogResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PREFERENCES_TABLE)?;
        Ok(table.get(key)?.map(|v| v.value().to_string()))
    }

    fn try_write(&self, key: &str, value: &str) -> LogResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(PREFERENCES_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl PreferenceStore for RedbPreferenceStore {
    fn read(&self, key: &str) -> Option<String> {
        match self.try_read(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read preference");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.try_write(key, value) {
            tracing::warn!(key, value, error = %e, "Failed to write preference");
        }
    }
}

impl std::fmt::Debug for RedbPreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbPreferenceStore")
            .field("path", &self.path)
            .finish()
    }
}
