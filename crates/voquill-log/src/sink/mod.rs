//! Log sinks: the channel that finally records leveled messages.
//!
//! A sink accepts one already-formatted string per record. Delivery is
//! asynchronous and best-effort: the façade never awaits a write, it hands
//! the returned future to [`crate::dispatch`].

use futures::future::BoxFuture;

use crate::error::LogResult;
use crate::level::Severity;

mod console;
mod memory;

pub use console::{TracingSink, APP_TARGET};
pub use memory::{CapturedRecord, MemorySink};

/// Destination for formatted log records.
pub trait LogSink: Send + Sync {
    /// Deliver one record at `severity`.
    ///
    /// Each returned future is driven on its own task, so on a multi-thread
    /// runtime two futures may be polled in either order. Implementations
    /// that care about call order must hand the record off inside `write`
    /// itself and leave only completion to the future, as [`TracingSink`]
    /// and [`MemorySink`] do.
    fn write(&self, severity: Severity, message: String) -> BoxFuture<'static, LogResult<()>>;

    /// Establish the delivery channel. Awaited once at startup.
    fn attach(&self) -> BoxFuture<'static, LogResult<()>>;
}
