mod domain;
pub use domain::{DelayMs, Flag, StepName};

mod error;
pub use error::{ModelError, ModelResult};

mod spec;
pub use spec::{PlanSpec, PolicySpec, StepSpec};

mod strategy;
pub use strategy::{BackoffStrategy, Topology};
