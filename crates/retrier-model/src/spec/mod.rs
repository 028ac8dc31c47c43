mod plan;
pub use plan::{PlanSpec, StepSpec};

mod policy;
pub use policy::PolicySpec;
