//! Verbosity preference and message severity.

use std::fmt;

/// User-selected filter controlling whether `verbose` calls are emitted.
///
/// `Verbose` shows everything `Info` shows, plus verbose records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerbosityLevel {
    #[default]
    Info,
    Verbose,
}

impl VerbosityLevel {
    /// The literal persisted for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Verbose => "verbose",
        }
    }

    /// Interpret a persisted value.
    ///
    /// Only the exact literals `"info"` and `"verbose"` are recognized.
    /// Anything else, including a missing value, is `Info`.
    pub fn from_stored(stored: Option<&str>) -> Self {
        match stored {
            Some("verbose") => Self::Verbose,
            _ => Self::Info,
        }
    }

    pub fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }
}

impl fmt::Display for VerbosityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity a record is delivered to the sink with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
    /// Delivered at the sink's debug level.
    Verbose,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
            Self::Verbose => "debug",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
