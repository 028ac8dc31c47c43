//! Side channel for verbose failure reporting.
//!
//! The orchestrator hands every non-fatal failed attempt to an [`AttemptSink`] when the policy is verbose.
//! Sinks are injected through [`crate::policy::option::sink`], so tests can capture records without a global logger.
mod backend;
pub use backend::{AttemptRecord, AttemptSink, SinkHandle};

mod log;
pub use log::TracingSink;

mod noop;
pub use noop::NoOpSink;

use std::sync::Arc;

/// Sink that logs failures through `tracing` (the default).
#[inline]
pub fn tracing_sink() -> SinkHandle {
    Arc::new(TracingSink)
}
