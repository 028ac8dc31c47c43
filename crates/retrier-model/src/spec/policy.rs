use serde::{Deserialize, Serialize};

use crate::{domain::DelayMs, strategy::BackoffStrategy};

/// Declarative retry policy as it appears in plan files and CLI overrides.
///
/// Every field is optional and every value is raw: negative counts and delays are accepted
/// here and clamped to safe minimums when the core builds a `Policy` from this spec.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct PolicySpec {
    /// Total number of tries per step, including the first one.
    pub attempts: i64,
    /// Base delay between attempts.
    pub delay_ms: DelayMs,
    /// Additive jitter term; how it scales depends on `strategy`.
    pub jitter_ms: DelayMs,
    /// Delay growth function.
    pub strategy: BackoffStrategy,
    /// Max steps in flight for parallel plans; `0` means unlimited.
    pub parallelism: i64,
    /// Report intermediate failures to the log.
    pub verbose: bool,
}
