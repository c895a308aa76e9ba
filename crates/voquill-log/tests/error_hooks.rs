//! Global error capture tests
//!
//! The panic hook and the rejection handler are process-wide, so every test
//! here holds `HOOK_LOCK` and restores the default panic hook when done.

use std::panic;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use parking_lot::Mutex;
use tempfile::TempDir;
use voquill_log::{
    init_logging, install_error_hooks, report_unhandled_rejection, spawn_detached, LogArg,
    LogError, LogResult, LogSink, LoggingBuilder, LoggingConfig, MemoryPreferenceStore,
    MemorySink, Severity, VerbosityLevel,
};

static HOOK_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Restores the default panic hook when dropped
struct DefaultHookGuard;

impl Drop for DefaultHookGuard {
    fn drop(&mut self) {
        let _ = panic::take_hook();
    }
}

fn trigger_panic(f: impl FnOnce() + panic::UnwindSafe) {
    let result = panic::catch_unwind(f);
    assert!(result.is_err());
}

struct UnattachableSink;

impl LogSink for UnattachableSink {
    fn write(&self, _severity: Severity, _message: String) -> BoxFuture<'static, LogResult<()>> {
        future::ready(Ok(())).boxed()
    }

    fn attach(&self) -> BoxFuture<'static, LogResult<()>> {
        future::ready(Err(LogError::SinkSetup("no console".into()))).boxed()
    }
}

// ============================================================================
// Uncaught Errors
// ============================================================================

#[test]
fn test_panic_is_written_to_sink() {
    let _lock = HOOK_LOCK.lock();
    let _guard = DefaultHookGuard;
    let sink = MemorySink::new();
    install_error_hooks(Arc::new(sink.clone()));

    let line = line!() + 1;
    trigger_panic(|| panic!("mic unavailable"));

    let errors = sink.messages(Severity::Error);
    assert_eq!(errors.len(), 1);
    let prefix = format!("Uncaught error: mic unavailable at {}:{}:", file!(), line);
    assert!(errors[0].starts_with(&prefix), "{:?}", errors[0]);
}

#[test]
fn test_formatted_panic_message() {
    let _lock = HOOK_LOCK.lock();
    let _guard = DefaultHookGuard;
    let sink = MemorySink::new();
    install_error_hooks(Arc::new(sink.clone()));

    let code = 3;
    trigger_panic(move || panic!("hotkey {} already bound", code));

    let errors = sink.messages(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Uncaught error: hotkey 3 already bound at "));
}

#[test]
fn test_non_string_panic_payload_is_unknown() {
    let _lock = HOOK_LOCK.lock();
    let _guard = DefaultHookGuard;
    let sink = MemorySink::new();
    install_error_hooks(Arc::new(sink.clone()));

    trigger_panic(|| panic::panic_any(404u16));

    let errors = sink.messages(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Uncaught error: unknown at "));
}

#[test]
fn test_panic_bypasses_verbosity_and_logger() {
    let _lock = HOOK_LOCK.lock();
    let _guard = DefaultHookGuard;
    let sink = MemorySink::new();
    install_error_hooks(Arc::new(sink.clone()));

    trigger_panic(|| panic!("first"));
    trigger_panic(|| panic!("second"));

    // One record per panic, nothing else
    assert_eq!(sink.len(), 2);
    assert!(sink.messages(Severity::Verbose).is_empty());
}

// ============================================================================
// Unhandled Rejections
// ============================================================================

#[test]
fn test_rejection_is_written_to_sink() {
    let _lock = HOOK_LOCK.lock();
    let _guard = DefaultHookGuard;
    let sink = MemorySink::new();
    install_error_hooks(Arc::new(sink.clone()));

    report_unhandled_rejection("transcription timed out");

    assert_eq!(
        sink.messages(Severity::Error),
        vec!["Unhandled rejection: transcription timed out"]
    );
}

#[tokio::test]
async fn test_spawn_detached_reports_failure() {
    let _lock = HOOK_LOCK.lock();
    let _guard = DefaultHookGuard;
    let sink = MemorySink::new();
    install_error_hooks(Arc::new(sink.clone()));

    spawn_detached(async { Err::<(), _>("network down") })
        .await
        .unwrap();
    spawn_detached(async { Ok::<_, String>(5) }).await.unwrap();

    assert_eq!(
        sink.messages(Severity::Error),
        vec!["Unhandled rejection: network down"]
    );
}

// ============================================================================
// Installation
// ============================================================================

#[test]
fn test_last_installation_wins() {
    let _lock = HOOK_LOCK.lock();
    let _guard = DefaultHookGuard;
    let first = MemorySink::new();
    let second = MemorySink::new();

    install_error_hooks(Arc::new(first.clone()));
    install_error_hooks(Arc::new(second.clone()));

    trigger_panic(|| panic!("boom"));
    report_unhandled_rejection("nope");

    assert!(first.is_empty());
    assert_eq!(second.len(), 2);
    assert!(second.messages(Severity::Error)[0].starts_with("Uncaught error: boom at "));
    assert_eq!(second.messages(Severity::Error)[1], "Unhandled rejection: nope");
}

#[tokio::test]
async fn test_init_logging_attaches_then_installs() {
    let _lock = HOOK_LOCK.lock();
    let _guard = DefaultHookGuard;
    let sink = MemorySink::new();

    init_logging(Arc::new(sink.clone())).await.unwrap();
    assert_eq!(sink.attach_count(), 1);

    report_unhandled_rejection("late");
    assert_eq!(
        sink.messages(Severity::Error),
        vec!["Unhandled rejection: late"]
    );
}

#[tokio::test]
async fn test_failed_attach_leaves_previous_hooks() {
    let _lock = HOOK_LOCK.lock();
    let _guard = DefaultHookGuard;
    let previous = MemorySink::new();
    install_error_hooks(Arc::new(previous.clone()));

    let result = init_logging(Arc::new(UnattachableSink)).await;
    assert!(matches!(result, Err(LogError::SinkSetup(_))));

    report_unhandled_rejection("still routed");
    assert_eq!(
        previous.messages(Severity::Error),
        vec!["Unhandled rejection: still routed"]
    );
}

#[tokio::test]
async fn test_builder_wires_sink_and_preferences() {
    let _lock = HOOK_LOCK.lock();
    let _guard = DefaultHookGuard;
    let temp = TempDir::new().unwrap();
    let config = LoggingConfig {
        data_dir: Some(temp.path().join("voquill")),
        ..LoggingConfig::default()
    };
    let sink = MemorySink::new();

    let log = LoggingBuilder::new(config.clone())
        .with_sink(Arc::new(sink.clone()))
        .init()
        .await
        .unwrap();

    assert_eq!(sink.attach_count(), 1);
    assert!(config.preferences_path().exists());
    assert_eq!(log.get_level(), VerbosityLevel::Info);

    log.set_level(VerbosityLevel::Verbose);
    log.verbose([LogArg::from("persisted")]);
    assert_eq!(sink.messages(Severity::Verbose), vec!["persisted"]);
}

#[tokio::test]
async fn test_builder_with_memory_preferences() {
    let _lock = HOOK_LOCK.lock();
    let _guard = DefaultHookGuard;
    let sink = MemorySink::new();

    let log = LoggingBuilder::new(LoggingConfig::default())
        .with_sink(Arc::new(sink.clone()))
        .with_preferences(Arc::new(MemoryPreferenceStore::new()))
        .init()
        .await
        .unwrap();

    log.verbose([LogArg::from("hidden")]);
    log.info([LogArg::from("shown")]);

    assert_eq!(sink.len(), 1);
    assert_eq!(sink.messages(Severity::Info), vec!["shown"]);
}
