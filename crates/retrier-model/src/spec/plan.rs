use std::{collections::HashSet, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Flag, StepName},
    error::{ModelError, ModelResult},
    spec::PolicySpec,
    strategy::Topology,
};

/// One named command to run under the retry policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct StepSpec {
    /// Name used in error messages and failure logs.
    pub name: StepName,
    /// Program to execute (e.g. `"curl"`, `"/usr/bin/pg_isready"`).
    pub command: String,
    /// Command-line arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Working directory. If `None`, inherits from the parent process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    /// Whether a non-zero exit code counts as a failed attempt.
    #[serde(default)]
    pub fail_on_non_zero: Flag,
}

impl StepSpec {
    /// Minimal step: `command` with no arguments and default failure handling.
    pub fn new(name: impl Into<StepName>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            args: Vec::new(),
            cwd: None,
            fail_on_non_zero: Flag::default(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Rules: `name` and `command` are not empty or whitespace-only.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Invalid("step name is empty".into()));
        }
        if self.command.trim().is_empty() {
            return Err(ModelError::Invalid(format!(
                "step '{}': command is empty",
                self.name
            )));
        }
        Ok(())
    }
}

/// A complete, file-loadable description of what to retry and how.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PlanSpec {
    #[serde(default)]
    pub policy: PolicySpec,
    #[serde(default)]
    pub topology: Topology,
    #[serde(default)]
    pub steps: Vec<StepSpec>,
    /// Exit codes that stop retrying immediately, for any step of the plan.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fatal_exit_codes: Vec<i32>,
}

impl PlanSpec {
    /// Validate every step and reject duplicate step names.
    ///
    /// A `single` plan must hold exactly one step.
    pub fn validate(&self) -> ModelResult<()> {
        if self.topology == Topology::Single && self.steps.len() != 1 {
            return Err(ModelError::Invalid(format!(
                "single topology expects exactly one step, got {}",
                self.steps.len()
            )));
        }
        let mut seen = HashSet::with_capacity(self.steps.len());
        for step in &self.steps {
            step.validate()?;
            if !seen.insert(step.name.as_str()) {
                return Err(ModelError::Invalid(format!(
                    "duplicate step name: {}",
                    step.name
                )));
            }
        }
        Ok(())
    }
}
