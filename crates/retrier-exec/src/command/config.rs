use std::{fmt, path::PathBuf};

use retrier_model::{Flag, StepSpec};
use tracing::trace;

use crate::ExecError;

/// Resolved configuration for one command step.
#[derive(Debug, Clone)]
pub struct CommandConfig {
    /// Step name, used in logs.
    pub(crate) name: String,
    /// Program to execute.
    pub(crate) command: String,
    pub(crate) args: Vec<String>,
    /// Working directory; inherited from the parent process when `None`.
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) fail_on_non_zero: Flag,
}

impl CommandConfig {
    pub fn from_spec(spec: &StepSpec) -> Self {
        Self {
            name: spec.name.clone(),
            command: spec.command.clone(),
            args: spec.args.clone(),
            cwd: spec.cwd.clone(),
            fail_on_non_zero: spec.fail_on_non_zero,
        }
    }

    /// Rules:
    /// - `command` is not empty or whitespace-only.
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.command.trim().is_empty() {
            return Err(ExecError::InvalidSpec(format!(
                "step '{}': command is empty",
                self.name
            )));
        }
        Ok(())
    }

    /// Emit a trace-level log with the resolved fields.
    pub fn trace_state(&self) {
        trace!(
            step = %self.name,
            command = %self.command,
            args = ?self.args,
            cwd = ?self.cwd,
            fail_on_non_zero = self.fail_on_non_zero.is_enabled(),
            "command config resolved"
        );
    }
}

impl fmt::Display for CommandConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CommandConfig(cmd='{}', args={}, cwd={:?}, fail_on_non_zero={})",
            self.command,
            self.args.len(),
            self.cwd,
            self.fail_on_non_zero.is_enabled(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_spec_copies_fields() {
        let spec = StepSpec::new("health", "curl").with_args(["-f", "http://localhost"]);
        let cfg = CommandConfig::from_spec(&spec);

        assert_eq!(cfg.name, "health");
        assert_eq!(cfg.command, "curl");
        assert_eq!(cfg.args, vec!["-f", "http://localhost"]);
        assert!(cfg.fail_on_non_zero.is_enabled());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_blank_command() {
        let cfg = CommandConfig::from_spec(&StepSpec::new("health", " "));
        assert!(matches!(
            cfg.validate(),
            Err(ExecError::InvalidSpec(msg)) if msg.contains("health")
        ));
    }

    #[test]
    fn display_is_compact() {
        let cfg = CommandConfig::from_spec(&StepSpec::new("ls", "ls").with_args(["-la"]));
        assert_eq!(
            cfg.to_string(),
            "CommandConfig(cmd='ls', args=1, cwd=None, fail_on_non_zero=true)"
        );
    }
}
