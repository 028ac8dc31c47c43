//! Retry policy: validated configuration plus the delay schedule.
pub(crate) mod delay;
pub(crate) mod fatal;
pub mod option;

pub use fatal::Sentinel;
pub use option::Opt;

use std::{error::Error, fmt, sync::Arc, time::Duration};

use retrier_model::BackoffStrategy;

use crate::sink::{SinkHandle, tracing_sink};
use option::RawPolicy;

/// Lower bound for the attempt limit.
pub const MIN_ATTEMPTS: u32 = 1;

/// Base delay used when none (or a non-positive one) is configured.
pub const MIN_DELAY: Duration = Duration::from_millis(500);

/// Validated, immutable retry policy.
///
/// Built once from options and shared freely: cloning is cheap and the policy is never mutated by orchestration
/// calls, so a single value can drive any number of concurrent `single`/`chain`/`parallel` calls.
#[derive(Clone)]
pub struct Policy {
    attempts: u32,
    base_delay: Duration,
    jitter: Duration,
    strategy: BackoffStrategy,
    parallelism: usize,
    verbose: bool,
    fatal: Arc<[Sentinel]>,
    sink: SinkHandle,
}

impl Policy {
    /// Apply `opts` in order to a zero-valued configuration, then clamp every field into its valid range.
    pub fn new<I>(opts: I) -> Self
    where
        I: IntoIterator<Item = Opt>,
    {
        let mut raw = RawPolicy::default();
        for opt in opts {
            opt.apply(&mut raw);
        }
        Self::validate(raw)
    }

    fn validate(raw: RawPolicy) -> Self {
        let attempts = raw.attempts.clamp(i64::from(MIN_ATTEMPTS), i64::from(u32::MAX)) as u32;
        let base_delay = match u64::try_from(raw.sleep_ns) {
            Ok(ns) if ns > 0 => Duration::from_nanos(ns),
            _ => MIN_DELAY,
        };
        let jitter = Duration::from_nanos(u64::try_from(raw.jitter_ns).unwrap_or(0));
        let parallelism = usize::try_from(raw.parallelism).unwrap_or(0);

        Self {
            attempts,
            base_delay,
            jitter,
            strategy: raw.strategy,
            parallelism,
            verbose: raw.verbose,
            fatal: raw.fatal.into(),
            sink: raw.sink.unwrap_or_else(tracing_sink),
        }
    }

    /// Total tries per step.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn jitter(&self) -> Duration {
        self.jitter
    }

    pub fn strategy(&self) -> BackoffStrategy {
        self.strategy
    }

    /// Parallel in-flight cap; `0` means unlimited.
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn fatal(&self) -> &[Sentinel] {
        &self.fatal
    }

    pub(crate) fn sink(&self) -> &SinkHandle {
        &self.sink
    }

    /// Delay to wait after attempt `attempt` (1-based) failed, before the next one starts.
    pub fn delay(&self, attempt: u32) -> Duration {
        delay::backoff(self.strategy, self.base_delay, self.jitter, attempt)
    }

    /// Returns `true` if `err` (or one of its causes) equals a registered fatal sentinel.
    pub fn is_fatal(&self, err: &(dyn Error + 'static)) -> bool {
        self.fatal.iter().any(|s| s.matches(err))
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new(std::iter::empty::<Opt>())
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("attempts", &self.attempts)
            .field("base_delay", &self.base_delay)
            .field("jitter", &self.jitter)
            .field("strategy", &self.strategy)
            .field("parallelism", &self.parallelism)
            .field("verbose", &self.verbose)
            .field("fatal", &self.fatal)
            .field("sink", &"<handle>")
            .finish()
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Policy(attempts={}, delay={:?}, jitter={:?}, strategy={}, parallelism={})",
            self.attempts, self.base_delay, self.jitter, self.strategy, self.parallelism,
        )
    }
}
