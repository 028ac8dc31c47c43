use super::backend::{AttemptRecord, AttemptSink};

/// Sink that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl AttemptSink for NoOpSink {
    #[inline(always)]
    fn record_failure(&self, _: &AttemptRecord<'_>) {}
}
