//! Voquill Logging Core
//!
//! Client-side logging façade for the Voquill desktop app.
//!
//! ## Overview
//!
//! - **Leveled logging**: `info`, `warning`, `error` are always emitted;
//!   `verbose` only when the user opted into verbose logging
//! - **Verbosity preference**: persisted under a single key, read on every
//!   verbose call, `info` whenever the stored value is missing or unknown
//! - **Stopwatch**: times an async operation and logs how long it took to
//!   succeed or fail, without touching its result
//! - **Global error capture**: panics and failed detached tasks are written
//!   straight to the sink
//!
//! Logging never fails the caller. Sink writes are fire-and-forget.
//!
//! ## Quick Start
//!
//! ```ignore
//! use voquill_log::{LogArg, LoggingBuilder, LoggingConfig, VerbosityLevel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let log = LoggingBuilder::new(LoggingConfig::from_env()).init().await?;
//!
//!     log.info([LogArg::from("Recorder ready")]);
//!     log.set_level(VerbosityLevel::Verbose);
//!     log.verbose([LogArg::from("sample rate"), LogArg::value(&48_000)]);
//!
//!     let text = log
//!         .stopwatch("transcribe", || async { transcribe().await })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
mod dispatch;
pub mod error;
pub mod format;
pub mod hooks;
mod init;
pub mod level;
pub mod logger;
pub mod sink;
pub mod store;

// Re-exports
pub use config::LoggingConfig;
pub use error::{LogError, LogResult};
pub use format::{render, LogArg, LogFailure, LogValue, ViaAnyhow, ViaBoxed, ViaError};
pub use hooks::{install_error_hooks, report_unhandled_rejection, spawn_detached};
pub use init::{init_logging, LoggingBuilder};
pub use level::{Severity, VerbosityLevel};
pub use logger::Logger;
pub use sink::{CapturedRecord, LogSink, MemorySink, TracingSink};
pub use store::{
    MemoryPreferenceStore, PreferenceStore, RedbPreferenceStore, VerbosityStore, LOG_LEVEL_KEY,
};
