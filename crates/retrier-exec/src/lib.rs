//! Subprocess-backed steps.
//!
//! Turns [`retrier_model::StepSpec`] values into [`retrier_core::Step`]s that spawn a command per attempt,
//! and derives the fatal sentinels a plan implies.
mod error;
pub use error::ExecError;

mod command;
pub use command::{CommandConfig, command_step, plan_sentinels, plan_steps};
