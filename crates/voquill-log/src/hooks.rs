//! Process-wide capture of uncaught errors and unhandled rejections.
//!
//! Uncaught errors are panics: the process panic hook is replaced with one
//! that writes a single error record. Unhandled rejections are failures of
//! detached tasks nobody awaits; they are routed through
//! [`report_unhandled_rejection`], usually via [`spawn_detached`].
//!
//! Both handlers write straight to the sink given at install time and skip
//! the [`Logger`](crate::Logger) entirely. Installing again replaces both.

use std::any::Any;
use std::fmt::Display;
use std::future::Future;
use std::panic::{self, Location};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;

use crate::dispatch::dispatch;
use crate::level::Severity;
use crate::sink::LogSink;

static REJECTION_SINK: RwLock<Option<Arc<dyn LogSink>>> = parking_lot::const_rwlock(None);

/// Install both global handlers, replacing any installed before.
pub fn install_error_hooks(sink: Arc<dyn LogSink>) {
    let panic_sink = Arc::clone(&sink);
    panic::set_hook(Box::new(move |info| {
        let message = uncaught_error_message(info.payload(), info.location());
        dispatch(panic_sink.as_ref(), Severity::Error, message);
    }));

    *REJECTION_SINK.write() = Some(sink);
    tracing::debug!("Installed uncaught error and unhandled rejection hooks");
}

/// Report a failure nothing else observed.
pub fn report_unhandled_rejection(reason: impl Display) {
    let message = format!("Unhandled rejection: {}", reason);

    // Clone out of the slot so a sink that re-enters cannot deadlock
    let sink = REJECTION_SINK.read().clone();
    match sink {
        Some(sink) => dispatch(sink.as_ref(), Severity::Error, message),
        None => tracing::error!("{}", message),
    }
}

/// Spawn a task whose failure is reported as an unhandled rejection.
///
/// Must be called from within a tokio runtime.
pub fn spawn_detached<F, T, E>(future: F) -> JoinHandle<()>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(reason) = future.await {
            report_unhandled_rejection(reason);
        }
    })
}

/// `"Uncaught error: <message> at <file>:<line>:<column>"`
fn uncaught_error_message(payload: &(dyn Any + Send), location: Option<&Location<'_>>) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown");

    match location {
        Some(loc) => format!(
            "Uncaught error: {} at {}:{}:{}",
            message,
            loc.file(),
            loc.line(),
            loc.column()
        ),
        None => format!("Uncaught error: {} at unknown:0:0", message),
    }
}
