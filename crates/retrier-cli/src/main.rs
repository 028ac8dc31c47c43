mod cli;

use std::{fs, path::Path, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use retrier_core::{
    RetryError,
    map::to_options,
    policy::{Policy, option},
};
use retrier_exec::{plan_sentinels, plan_steps};
use retrier_model::{Flag, PlanSpec, PolicySpec, StepSpec, Topology};
use retrier_observe::{LoggerConfig, init_logger};

use crate::cli::{Cli, Commands, DelaysArgs, PlanArgs, RunArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log = LoggerConfig {
        format: cli.log.log_format,
        level: cli.log.log_level.clone(),
        ..Default::default()
    };
    if let Err(e) = init_logger(&log) {
        eprintln!("retrier: {e}");
        return ExitCode::from(USAGE_ERROR);
    }

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = failure_code(&e);
            if code == RETRIES_FAILED {
                error!(error = %e, "retries failed");
            } else {
                eprintln!("retrier: {e:#}");
            }
            ExitCode::from(code)
        }
    }
}

const RETRIES_FAILED: u8 = 1;
const USAGE_ERROR: u8 = 2;

/// `1` when a step ran out of attempts or hit a fatal error, `2` for anything that stopped the plan from running.
fn failure_code(e: &anyhow::Error) -> u8 {
    match e.downcast_ref::<RetryError>() {
        Some(RetryError::Plan(_)) | None => USAGE_ERROR,
        Some(_) => RETRIES_FAILED,
    }
}

fn execute(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => run_command(args),
        Commands::Plan(args) => run_plan_file(args),
        Commands::Delays(args) => print_delays(args),
    }
}

fn run_command(args: RunArgs) -> anyhow::Result<()> {
    let (program, rest) = args
        .command
        .split_first()
        .context("missing command to run")?;

    let mut step = StepSpec::new(args.name.as_deref().unwrap_or(program), program.as_str())
        .with_args(rest.iter().cloned());
    step.fail_on_non_zero = Flag::from(!args.ignore_exit_code);

    let mut plan = PlanSpec {
        steps: vec![step],
        topology: Topology::Single,
        fatal_exit_codes: args.policy.fatal_exit_codes.clone(),
        ..Default::default()
    };
    args.policy.apply(&mut plan.policy);
    execute_plan(&plan)
}

fn run_plan_file(args: PlanArgs) -> anyhow::Result<()> {
    let mut plan = load_plan(&args.file)?;
    args.policy.apply(&mut plan.policy);
    plan.fatal_exit_codes.extend(&args.policy.fatal_exit_codes);
    if let Some(topology) = args.topology {
        plan.topology = topology;
    }
    execute_plan(&plan)
}

fn print_delays(args: DelaysArgs) -> anyhow::Result<()> {
    let mut spec = PolicySpec::default();
    args.policy.apply(&mut spec);
    let policy = Policy::new(to_options(&spec));

    println!("{policy}");
    for attempt in 1..=args.upto {
        println!("{attempt}\t{:?}", policy.delay(attempt));
    }
    Ok(())
}

fn load_plan(path: &Path) -> anyhow::Result<PlanSpec> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read plan {}", path.display()))?;
    let plan: PlanSpec = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse plan {}", path.display()))?;
    Ok(plan)
}

fn execute_plan(plan: &PlanSpec) -> anyhow::Result<()> {
    plan.validate().context("invalid plan")?;

    let mut opts = to_options(&plan.policy);
    opts.push(option::fatals(plan_sentinels(plan)));
    let policy = Policy::new(opts);
    let steps = plan_steps(plan).context("invalid plan")?;

    info!(%policy, topology = %plan.topology, steps = steps.len(), "starting");
    policy.run(plan.topology, steps)?;
    info!("all steps succeeded");
    Ok(())
}
