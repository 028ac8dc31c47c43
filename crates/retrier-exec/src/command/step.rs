use std::{io, process::Command};

use retrier_core::{Sentinel, Step};
use retrier_model::{PlanSpec, StepSpec};
use tracing::{debug, trace};

use crate::{ExecError, command::CommandConfig};

/// Build a step that runs the command described by `spec` once per attempt.
///
/// The command inherits stdin/stdout/stderr. Each attempt blocks until the process exits.
pub fn command_step(spec: &StepSpec) -> Result<Step<'static>, ExecError> {
    let cfg = CommandConfig::from_spec(spec);
    cfg.validate()?;
    cfg.trace_state();

    Ok(Step::new(cfg.name.clone(), move || run_once(&cfg)))
}

/// Steps for every entry of `plan`, in plan order.
pub fn plan_steps(plan: &PlanSpec) -> Result<Vec<Step<'static>>, ExecError> {
    plan.steps.iter().map(command_step).collect()
}

/// Fatal sentinels implied by `plan`.
///
/// - a missing executable never fixes itself: `NotFound` for each step's command;
/// - every `fatalExitCodes` entry becomes `NonZeroExit { code }`.
pub fn plan_sentinels(plan: &PlanSpec) -> Vec<Sentinel> {
    let missing = plan.steps.iter().map(|s| {
        Sentinel::new(ExecError::NotFound {
            command: s.command.clone(),
        })
    });
    let codes = plan
        .fatal_exit_codes
        .iter()
        .map(|&code| Sentinel::new(ExecError::NonZeroExit { code }));

    missing.chain(codes).collect()
}

fn run_once(cfg: &CommandConfig) -> Result<(), ExecError> {
    trace!(step = %cfg.name, command = %cfg.command, "spawning command");

    let mut cmd = Command::new(&cfg.command);
    cmd.args(&cfg.args);
    if let Some(cwd) = &cfg.cwd {
        cmd.current_dir(cwd);
    }

    let status = cmd.status().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ExecError::NotFound {
            command: cfg.command.clone(),
        },
        _ => ExecError::Io(format!("spawn failed: {e}")),
    })?;

    if status.success() || cfg.fail_on_non_zero.is_disabled() {
        debug!(step = %cfg.name, code = ?status.code(), "command finished");
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(ExecError::NonZeroExit { code }),
        None => Err(ExecError::Signaled),
    }
}
