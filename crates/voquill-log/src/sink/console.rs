//! Sink that relays records into `tracing`.
//!
//! Attaching installs the global subscriber (env filter + formatted console
//! output). If the host already installed one, records flow through it.

use futures::future::{self, BoxFuture, FutureExt};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use super::LogSink;
use crate::config::LoggingConfig;
use crate::error::{LogError, LogResult};
use crate::level::Severity;

/// Target every relayed record is emitted under.
pub const APP_TARGET: &str = "voquill_app";

/// Relays records as `tracing` events under [`APP_TARGET`].
#[derive(Debug, Clone)]
pub struct TracingSink {
    filter: String,
    ansi: bool,
    with_target: bool,
}

impl TracingSink {
    pub fn new(config: &LoggingConfig) -> Self {
        Self {
            filter: config.filter.clone(),
            ansi: config.ansi,
            with_target: config.with_target,
        }
    }

    /// Filter directives the subscriber is installed with.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    fn install_subscriber(&self) -> LogResult<()> {
        let filter =
            EnvFilter::try_new(&self.filter).map_err(|e| LogError::SinkSetup(e.to_string()))?;

        let console = fmt::layer()
            .with_ansi(self.ansi)
            .with_target(self.with_target);

        if let Err(e) = tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .try_init()
        {
            // A host subscriber is already in place; relay through it
            tracing::debug!(error = %e, "Global subscriber already installed");
        }

        Ok(())
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(&LoggingConfig::default())
    }
}

impl LogSink for TracingSink {
    fn write(&self, severity: Severity, message: String) -> BoxFuture<'static, LogResult<()>> {
        match severity {
            Severity::Info => tracing::info!(target: APP_TARGET, "{}", message),
            Severity::Warning => tracing::warn!(target: APP_TARGET, "{}", message),
            Severity::Error => tracing::error!(target: APP_TARGET, "{}", message),
            Severity::Verbose => tracing::debug!(target: APP_TARGET, "{}", message),
        }
        future::ready(Ok(())).boxed()
    }

    fn attach(&self) -> BoxFuture<'static, LogResult<()>> {
        future::ready(self.install_subscriber()).boxed()
    }
}
