use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::{ModelError, ModelResult};

/// How a set of steps is executed.
///
/// - `Single`: exactly one step, retried on its own.
/// - `Chain`: steps run one after another; the first unrecovered failure stops the rest.
/// - `Parallel`: steps run concurrently under the policy's parallelism cap; every step runs to completion.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum Topology {
    #[default]
    Single,
    Chain,
    Parallel,
}

impl Topology {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Topology::Single => "single",
            Topology::Chain => "chain",
            Topology::Parallel => "parallel",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topology {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "single" => Ok(Topology::Single),
            "chain" | "sequential" => Ok(Topology::Chain),
            "parallel" | "fanout" | "fan-out" => Ok(Topology::Parallel),
            other => Err(ModelError::UnknownTopology(other.to_string())),
        }
    }
}
