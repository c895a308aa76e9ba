//! One-time logging setup.

use std::sync::Arc;

use crate::config::LoggingConfig;
use crate::error::LogResult;
use crate::hooks::install_error_hooks;
use crate::logger::Logger;
use crate::sink::{LogSink, TracingSink};
use crate::store::{PreferenceStore, RedbPreferenceStore, VerbosityStore};

/// Attach the sink's delivery channel, then install the global error hooks.
///
/// Call once at startup and await it before relying on delivery. If the
/// sink cannot attach, the error is returned and no hooks are installed.
pub async fn init_logging(sink: Arc<dyn LogSink>) -> LogResult<()> {
    sink.attach().await?;
    install_error_hooks(sink);
    Ok(())
}

/// Builder wiring a sink and a preference store into a ready [`Logger`].
///
/// ```ignore
/// use voquill_log::{LoggingBuilder, LoggingConfig, LogArg};
///
/// let log = LoggingBuilder::new(LoggingConfig::from_env()).init().await?;
/// log.info(["Recorder ready".into()]);
/// ```
pub struct LoggingBuilder {
    config: LoggingConfig,
    sink: Option<Arc<dyn LogSink>>,
    prefs: Option<Arc<dyn PreferenceStore>>,
}

impl LoggingBuilder {
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            config,
            sink: None,
            prefs: None,
        }
    }

    /// Use `sink` instead of relaying into `tracing`.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Use `prefs` instead of the redb file under the data directory.
    pub fn with_preferences(mut self, prefs: Arc<dyn PreferenceStore>) -> Self {
        self.prefs = Some(prefs);
        self
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Open the preference store, run [`init_logging`] and return the logger.
    pub async fn init(self) -> LogResult<Logger> {
        let prefs: Arc<dyn PreferenceStore> = match self.prefs {
            Some(prefs) => prefs,
            None => Arc::new(RedbPreferenceStore::open(self.config.preferences_path())?),
        };
        let sink: Arc<dyn LogSink> = match self.sink {
            Some(sink) => sink,
            None => Arc::new(TracingSink::new(&self.config)),
        };

        init_logging(Arc::clone(&sink)).await?;

        let levels = VerbosityStore::new(prefs);
        tracing::debug!(level = %levels.get_level(), "Logging initialized");
        Ok(Logger::new(sink, levels))
    }
}
