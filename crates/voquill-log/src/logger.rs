//! The logging façade handed to the rest of the application.

use std::future::Future;
use std::sync::Arc;

use tokio::time::Instant;

use crate::dispatch::dispatch;
use crate::format::{render, LogArg, LogFailure};
use crate::level::{Severity, VerbosityLevel};
use crate::sink::LogSink;
use crate::store::VerbosityStore;

/// Leveled logger writing through a [`LogSink`].
///
/// `info`, `warning` and `error` are always emitted. `verbose` is emitted
/// only while the persisted preference is [`VerbosityLevel::Verbose`]. No
/// method ever fails; the only error a caller sees is the one returned by the
/// operation wrapped in [`Logger::stopwatch`].
///
/// Cloning is cheap and clones share the sink and the preference store.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    levels: VerbosityStore,
}

impl Logger {
    pub fn new(sink: Arc<dyn LogSink>, levels: VerbosityStore) -> Self {
        Self { sink, levels }
    }

    /// The verbosity preference this logger consults.
    pub fn levels(&self) -> &VerbosityStore {
        &self.levels
    }

    pub fn get_level(&self) -> VerbosityLevel {
        self.levels.get_level()
    }

    pub fn set_level(&self, level: VerbosityLevel) {
        self.levels.set_level(level);
    }

    pub fn info<'a, I>(&self, args: I)
    where
        I: IntoIterator<Item = LogArg<'a>>,
    {
        self.emit(Severity::Info, args);
    }

    pub fn warning<'a, I>(&self, args: I)
    where
        I: IntoIterator<Item = LogArg<'a>>,
    {
        self.emit(Severity::Warning, args);
    }

    pub fn error<'a, I>(&self, args: I)
    where
        I: IntoIterator<Item = LogArg<'a>>,
    {
        self.emit(Severity::Error, args);
    }

    /// Emit at debug severity, only when the preference is `verbose`.
    ///
    /// Arguments are not rendered at all when the record is suppressed.
    pub fn verbose<'a, I>(&self, args: I)
    where
        I: IntoIterator<Item = LogArg<'a>>,
    {
        if !self.levels.get_level().is_verbose() {
            return;
        }
        self.emit(Severity::Verbose, args);
    }

    /// Time an asynchronous operation.
    ///
    /// Logs `"<label> completed in <N>ms"` at info on success, or
    /// `"<label> failed in <N>ms"` followed by the error at error severity on
    /// failure. The record is emitted after the operation settles and before
    /// its result is returned; the result itself is passed through untouched.
    /// There is no timeout: an operation that never settles is awaited
    /// forever.
    ///
    /// The error may be any [`std::error::Error`], an [`anyhow::Error`] or a
    /// boxed `dyn Error`.
    pub async fn stopwatch<T, E, M, F, Fut>(&self, label: &str, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: LogFailure<M>,
    {
        let start = Instant::now();
        let result = operation().await;
        let elapsed = start.elapsed().as_millis();

        match &result {
            Ok(_) => self.info([LogArg::from(format!("{} completed in {}ms", label, elapsed))]),
            Err(e) => self.error([
                LogArg::from(format!("{} failed in {}ms", label, elapsed)),
                LogArg::failure(e),
            ]),
        }

        result
    }

    fn emit<'a, I>(&self, severity: Severity, args: I)
    where
        I: IntoIterator<Item = LogArg<'a>>,
    {
        dispatch(self.sink.as_ref(), severity, render(args));
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("levels", &self.levels)
            .finish_non_exhaustive()
    }
}
