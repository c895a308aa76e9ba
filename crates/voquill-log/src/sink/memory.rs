//! In-memory sink that captures every record it receives.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use parking_lot::Mutex;

use super::LogSink;
use crate::error::LogResult;
use crate::level::Severity;

/// A record as received by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    /// ISO 8601 timestamp (e.g., "2026-01-21T14:30:45.123Z")
    pub ts: String,

    pub severity: Severity,

    pub message: String,
}

impl CapturedRecord {
    fn new(severity: Severity, message: String) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            severity,
            message,
        }
    }
}

/// Sink that keeps records in memory.
///
/// Records are captured synchronously inside [`LogSink::write`], so they are
/// visible as soon as the emitting call returns. Clones share storage.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
    attached: Arc<AtomicUsize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records received so far, in delivery order.
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().clone()
    }

    /// Messages received at `severity`, in delivery order.
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.severity == severity)
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// How many times [`LogSink::attach`] was called.
    pub fn attach_count(&self) -> usize {
        self.attached.load(Ordering::SeqCst)
    }
}

impl LogSink for MemorySink {
    fn write(&self, severity: Severity, message: String) -> BoxFuture<'static, LogResult<()>> {
        self.records.lock().push(CapturedRecord::new(severity, message));
        future::ready(Ok(())).boxed()
    }

    fn attach(&self) -> BoxFuture<'static, LogResult<()>> {
        self.attached.fetch_add(1, Ordering::SeqCst);
        future::ready(Ok(())).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_in_order() {
        let sink = MemorySink::new();

        let _ = sink.write(Severity::Info, "first".into());
        let _ = sink.write(Severity::Error, "second".into());
        let _ = sink.write(Severity::Info, "third".into());

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.messages(Severity::Info), vec!["first", "third"]);
        assert_eq!(sink.messages(Severity::Error), vec!["second"]);
        assert!(sink.records()[0].ts.ends_with('Z'));
    }

    #[test]
    fn test_clones_share_records() {
        let sink = MemorySink::new();
        let other = sink.clone();

        let _ = other.write(Severity::Warning, "shared".into());
        let _ = other.attach();

        assert_eq!(sink.messages(Severity::Warning), vec!["shared"]);
        assert_eq!(sink.attach_count(), 1);

        sink.clear();
        assert!(other.is_empty());
    }
}
