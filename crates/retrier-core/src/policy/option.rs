//! Option values applied in order to a zero-valued [`RawPolicy`] before validation.
//!
//! ```rust
//! use std::time::Duration;
//! use retrier_core::policy::{Policy, option};
//! use retrier_model::BackoffStrategy;
//!
//! let policy = Policy::new([
//!     option::count(5),
//!     option::sleep(Duration::from_millis(200)),
//!     option::strategy(BackoffStrategy::Exponential),
//! ]);
//! assert_eq!(policy.attempts(), 5);
//! ```
use std::{error::Error, time::Duration};

use retrier_model::BackoffStrategy;

use super::fatal::Sentinel;
use crate::sink::SinkHandle;

const NANOS_PER_MILLI: i64 = 1_000_000;

/// Unvalidated policy fields as set by options.
///
/// Counts and delays are signed so that out-of-range input survives until validation clamps it.
#[derive(Default)]
pub(crate) struct RawPolicy {
    pub(crate) attempts: i64,
    pub(crate) sleep_ns: i64,
    pub(crate) jitter_ns: i64,
    pub(crate) strategy: BackoffStrategy,
    pub(crate) parallelism: i64,
    pub(crate) verbose: bool,
    pub(crate) fatal: Vec<Sentinel>,
    pub(crate) sink: Option<SinkHandle>,
}

/// A single policy mutation.
pub struct Opt(Setting);

enum Setting {
    Count(i64),
    Sleep(i64),
    Jitter(i64),
    Strategy(BackoffStrategy),
    Parallelism(i64),
    Verbose(bool),
    Fatal(Vec<Sentinel>),
    Sink(SinkHandle),
}

impl Opt {
    pub(crate) fn apply(self, raw: &mut RawPolicy) {
        match self.0 {
            Setting::Count(n) => raw.attempts = n,
            Setting::Sleep(ns) => raw.sleep_ns = ns,
            Setting::Jitter(ns) => raw.jitter_ns = ns,
            Setting::Strategy(s) => raw.strategy = s,
            Setting::Parallelism(n) => raw.parallelism = n,
            Setting::Verbose(v) => raw.verbose = v,
            Setting::Fatal(sentinels) => raw.fatal.extend(sentinels),
            Setting::Sink(sink) => raw.sink = Some(sink),
        }
    }
}

/// Total number of tries per step, including the first one. Values below 1 become 1.
pub fn count(n: i64) -> Opt {
    Opt(Setting::Count(n))
}

/// Base delay between attempts. Zero becomes the 500ms floor.
pub fn sleep(d: Duration) -> Opt {
    Opt(Setting::Sleep(nanos(d)))
}

/// Base delay in signed milliseconds; non-positive values become the 500ms floor.
pub fn sleep_ms(ms: i64) -> Opt {
    Opt(Setting::Sleep(ms.saturating_mul(NANOS_PER_MILLI)))
}

/// Additive jitter term.
pub fn jitter(d: Duration) -> Opt {
    Opt(Setting::Jitter(nanos(d)))
}

/// Jitter in signed milliseconds; negative values become zero.
pub fn jitter_ms(ms: i64) -> Opt {
    Opt(Setting::Jitter(ms.saturating_mul(NANOS_PER_MILLI)))
}

pub fn strategy(s: BackoffStrategy) -> Opt {
    Opt(Setting::Strategy(s))
}

/// Max steps in flight during parallel execution; `0` (and anything negative) means unlimited.
pub fn parallelism(n: i64) -> Opt {
    Opt(Setting::Parallelism(n))
}

/// Report every non-fatal failed attempt to the sink.
pub fn verbose(v: bool) -> Opt {
    Opt(Setting::Verbose(v))
}

/// Register a fatal sentinel. Repeated calls accumulate.
pub fn fatal<E>(sentinel: E) -> Opt
where
    E: Error + PartialEq + Send + Sync + 'static,
{
    Opt(Setting::Fatal(vec![Sentinel::new(sentinel)]))
}

/// Register several fatal sentinels at once, possibly of different types.
pub fn fatals<I>(sentinels: I) -> Opt
where
    I: IntoIterator<Item = Sentinel>,
{
    Opt(Setting::Fatal(sentinels.into_iter().collect()))
}

/// Replace the sink receiving verbose failure records (default: [`crate::TracingSink`]).
pub fn sink(handle: SinkHandle) -> Opt {
    Opt(Setting::Sink(handle))
}

fn nanos(d: Duration) -> i64 {
    i64::try_from(d.as_nanos()).unwrap_or(i64::MAX)
}
