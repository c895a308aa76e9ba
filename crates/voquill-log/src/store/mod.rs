//! Persisted verbosity preference.
//!
//! The preference lives in an external key-value store under a single fixed
//! key. [`VerbosityStore`] reads it on every call and never fails: a missing
//! or unrecognized value is simply `info`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::level::VerbosityLevel;

mod database;

pub use database::RedbPreferenceStore;

/// Key the verbosity preference is stored under.
pub const LOG_LEVEL_KEY: &str = "voquill_log_level";

/// Synchronous string key-value store holding user preferences.
///
/// Neither operation has an error channel. Implementations backed by
/// fallible storage report faults on their own diagnostic channel and
/// behave as if the key were missing (on read) or the write were lost.
pub trait PreferenceStore: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
}

/// In-process preference store.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.values.write().insert(key.to_string(), value.to_string());
    }
}

/// Reads and writes the verbosity preference.
#[derive(Clone)]
pub struct VerbosityStore {
    prefs: Arc<dyn PreferenceStore>,
}

impl VerbosityStore {
    pub fn new(prefs: Arc<dyn PreferenceStore>) -> Self {
        Self { prefs }
    }

    /// Current verbosity level, read fresh from the store.
    pub fn get_level(&self) -> VerbosityLevel {
        VerbosityLevel::from_stored(self.prefs.read(LOG_LEVEL_KEY).as_deref())
    }

    /// Persist `level`, overwriting whatever was stored before.
    pub fn set_level(&self, level: VerbosityLevel) {
        self.prefs.write(LOG_LEVEL_KEY, level.as_str());
    }
}

impl std::fmt::Debug for VerbosityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerbosityStore").finish_non_exhaustive()
    }
}
