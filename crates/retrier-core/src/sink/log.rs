use tracing::warn;

use super::backend::{AttemptRecord, AttemptSink};

/// Emits one `warn` event per failed attempt with `step`, `attempt` and `error` fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AttemptSink for TracingSink {
    fn record_failure(&self, record: &AttemptRecord<'_>) {
        warn!(
            step = record.step,
            attempt = record.attempt,
            error = %record.error,
            "step attempt failed"
        );
    }
}
