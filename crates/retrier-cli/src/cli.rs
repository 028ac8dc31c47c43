//! Command-line arguments.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use retrier_model::{BackoffStrategy, PolicySpec, Topology};
use retrier_observe::{LoggerFormat, LoggerLevel};

/// Retry commands under a backoff policy.
#[derive(Parser, Debug)]
#[command(name = "retrier")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Retry a single command: `retrier run -n 5 -- curl -f http://localhost`
    Run(RunArgs),

    /// Run a JSON plan of named commands
    Plan(PlanArgs),

    /// Print the delay schedule a policy produces
    Delays(DelaysArgs),
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Log output format (text, json, journald)
    #[arg(long, global = true, env = "RETRIER_LOG_FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,

    /// Log filter expression (e.g. "info", "retrier_core=trace,warn")
    #[arg(long, global = true, env = "RETRIER_LOG", default_value = "info")]
    pub log_level: LoggerLevel,
}

/// Policy overrides; anything not given keeps the plan's (or the default) value.
#[derive(Args, Debug, Default)]
pub struct PolicyArgs {
    /// Total tries per step, including the first
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub attempts: Option<i64>,

    /// Base delay between attempts, in milliseconds
    #[arg(long, allow_negative_numbers = true)]
    pub delay_ms: Option<i64>,

    /// Jitter term, in milliseconds
    #[arg(long, allow_negative_numbers = true)]
    pub jitter_ms: Option<i64>,

    /// Delay growth (simple, linear, exponential, fibonacci)
    #[arg(long)]
    pub strategy: Option<BackoffStrategy>,

    /// Max steps in flight for parallel plans (0 = unlimited)
    #[arg(long, allow_negative_numbers = true)]
    pub parallelism: Option<i64>,

    /// Log every failed attempt
    #[arg(short, long)]
    pub verbose: bool,

    /// Exit code that stops retrying immediately (repeatable)
    #[arg(long = "fatal-exit-code", value_name = "CODE")]
    pub fatal_exit_codes: Vec<i32>,
}

impl PolicyArgs {
    /// Overlay the flags that were given onto `spec`.
    pub fn apply(&self, spec: &mut PolicySpec) {
        if let Some(n) = self.attempts {
            spec.attempts = n;
        }
        if let Some(ms) = self.delay_ms {
            spec.delay_ms = ms;
        }
        if let Some(ms) = self.jitter_ms {
            spec.jitter_ms = ms;
        }
        if let Some(s) = self.strategy {
            spec.strategy = s;
        }
        if let Some(n) = self.parallelism {
            spec.parallelism = n;
        }
        if self.verbose {
            spec.verbose = true;
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Step name used in logs and errors (defaults to the program name)
    #[arg(long)]
    pub name: Option<String>,

    /// Treat any exit code as success; only spawn failures are retried
    #[arg(long)]
    pub ignore_exit_code: bool,

    /// Program and arguments
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the plan file (JSON)
    pub file: PathBuf,

    /// Override the plan's topology (single, chain, parallel)
    #[arg(long)]
    pub topology: Option<Topology>,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Args, Debug)]
pub struct DelaysArgs {
    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Last attempt number to print
    #[arg(long, default_value_t = 5)]
    pub upto: u32,
}
