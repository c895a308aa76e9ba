//! Logging configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable holding filter directives for the console relay.
pub const FILTER_ENV: &str = "VOQUILL_LOG";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "VOQUILL_DATA_DIR";

const DEFAULT_FILTER: &str = "info,voquill_app=debug";
const PREFERENCES_FILE: &str = "preferences.redb";

/// Configuration for the console relay and the preference database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directives (e.g., "info,voquill_app=debug")
    pub filter: String,

    /// Colorize console output
    pub ansi: bool,

    /// Print the event target alongside each line
    pub with_target: bool,

    /// Directory holding the preference database
    pub data_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            ansi: true,
            with_target: true,
            data_dir: None,
        }
    }
}

impl LoggingConfig {
    /// Defaults overridden by `VOQUILL_LOG` and `VOQUILL_DATA_DIR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(filter) = std::env::var(FILTER_ENV) {
            if !filter.trim().is_empty() {
                config.filter = filter;
            }
        }
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        config
    }

    /// Data directory, defaulting to the platform data dir.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("voquill")
        })
    }

    /// Location of the preference database.
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir().join(PREFERENCES_FILE)
    }
}
