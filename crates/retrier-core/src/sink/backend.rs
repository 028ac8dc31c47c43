use std::{error::Error, sync::Arc};

/// One failed attempt, borrowed for the duration of the sink call.
#[derive(Debug, Clone, Copy)]
pub struct AttemptRecord<'a> {
    /// Step name.
    pub step: &'a str,
    /// Zero-based index of the attempt that failed.
    pub attempt: u32,
    /// Error returned by the attempt.
    pub error: &'a (dyn Error + 'static),
}

/// Receiver of verbose failure records.
///
/// Called synchronously from the retry loop, possibly from several worker threads at once.
/// Implementations must not block and must not panic.
pub trait AttemptSink: Send + Sync + 'static {
    /// Record a non-fatal failed attempt.
    fn record_failure(&self, record: &AttemptRecord<'_>);
}

/// Shared handle to a sink, stored in the policy.
pub type SinkHandle = Arc<dyn AttemptSink>;
