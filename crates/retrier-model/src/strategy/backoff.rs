use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::{ModelError, ModelResult};

/// Selects how the inter-attempt delay grows with the attempt number `n`.
///
/// With `base` the configured delay and `jitter` the additive term:
/// - `Simple`:      `base + jitter * n`
/// - `Linear`:      `base * n + jitter`
/// - `Exponential`: `base * 2^n + jitter`
/// - `Fibonacci`:   `base * fib(n) + jitter`
///
/// The enum only names the policy; the math lives in the core policy engine.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum BackoffStrategy {
    /// Constant base delay; jitter grows with the attempt number.
    #[default]
    Simple,
    /// Base delay multiplied by the attempt number.
    Linear,
    /// Base delay doubled on every attempt.
    Exponential,
    /// Base delay multiplied by the attempt-th Fibonacci number.
    Fibonacci,
}

impl BackoffStrategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BackoffStrategy::Simple => "simple",
            BackoffStrategy::Linear => "linear",
            BackoffStrategy::Exponential => "exponential",
            BackoffStrategy::Fibonacci => "fibonacci",
        }
    }
}

impl fmt::Display for BackoffStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackoffStrategy {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "simple" | "default" => Ok(BackoffStrategy::Simple),
            "linear" => Ok(BackoffStrategy::Linear),
            "exponential" | "exp" => Ok(BackoffStrategy::Exponential),
            "fibonacci" | "fib" => Ok(BackoffStrategy::Fibonacci),
            other => Err(ModelError::UnknownStrategy(other.to_string())),
        }
    }
}
