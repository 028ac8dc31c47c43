mod config;
pub use config::CommandConfig;

mod step;
pub use step::{command_step, plan_sentinels, plan_steps};
