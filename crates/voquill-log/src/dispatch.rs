//! Fire-and-forget delivery of records to a sink.

use futures::FutureExt;

use crate::level::Severity;
use crate::sink::LogSink;

/// Hand `message` to `sink` without waiting for delivery.
///
/// Inside a tokio runtime the delivery is spawned; outside one it is polled
/// once and dropped if still pending. Delivery failures go to the `tracing`
/// diagnostic channel and never reach the caller.
pub(crate) fn dispatch(sink: &dyn LogSink, severity: Severity, message: String) {
    let delivery = sink.write(severity, message);

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                if let Err(e) = delivery.await {
                    tracing::warn!(target: "voquill_log::dispatch", %severity, error = %e, "Log delivery failed");
                }
            });
        }
        Err(_) => match delivery.now_or_never() {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                tracing::warn!(target: "voquill_log::dispatch", %severity, error = %e, "Log delivery failed");
            }
            None => {
                tracing::debug!(target: "voquill_log::dispatch", %severity, "Dropped pending log delivery outside a runtime");
            }
        },
    }
}
